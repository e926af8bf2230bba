//! Chip-agnostic hardware traits for the pendant
//!
//! `clawpad-drivers` is written against these traits only, which keeps
//! the display and touch drivers testable on the host with mock pins and
//! buses. `clawpad-hal-rp2040` implements them on top of `embassy-rp`.
//!
//! ```text
//! clawpad-drivers  ──uses──▶  clawpad-hal  ◀──implements──  clawpad-hal-rp2040
//! ```
//!
//! - [`gpio`]: chip-select, data/command, reset and interrupt lines
//! - [`spi`]: the shared bus, including runtime clock changes
//! - [`pwm`]: variable-frequency tone output and PWM divider maths

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod spi;

pub use gpio::{InputPin, OutputPin};
pub use pwm::{PwmTiming, ToneOutput};
pub use spi::{Mode, SpiBus, SpiConfig};
