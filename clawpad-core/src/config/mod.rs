//! Configuration types
//!
//! Board-agnostic configuration: touch calibration, screen geometry and
//! loop timing. Everything here is compile-time data; there is no
//! persistent configuration storage.

pub mod calibration;
pub mod layout;
pub mod timing;

pub use calibration::*;
pub use layout::*;
pub use timing::*;
