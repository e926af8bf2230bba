//! Touch UI state
//!
//! Pure state: no drawing and no I/O. The control loop feeds touch samples
//! in and acts on the events that come out.

pub mod arm;
pub mod easter_egg;
pub mod events;
pub mod grid;
pub mod long_press;
pub mod zone;

pub use arm::{ArmState, ClawIntent};
pub use easter_egg::{EasterEgg, EggUpdate};
pub use events::{GridEvent, GridEvents};
pub use grid::ButtonGrid;
pub use long_press::LongPress;
pub use zone::Zone;
