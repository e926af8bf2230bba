//! Hardware abstraction traits
//!
//! These traits define the interface between the core logic and the
//! hardware drivers. The display, touch and bus-clock traits are blocking:
//! each call is a short register transaction on the shared SPI bus. The
//! collaborators that wait on the outside world (command link, speaker,
//! status readout) are async.

pub mod bus;
pub mod display;
pub mod feedback;
pub mod link;
pub mod touch;

pub use bus::BusClock;
pub use display::{DisplayPanel, TextStyle};
pub use feedback::{Indicator, Note, Readout, Speaker};
pub use link::{Link, LinkStatus};
pub use touch::{TouchPanel, TouchSample};
