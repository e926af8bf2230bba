//! Board-agnostic core logic for the touchscreen pendant
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Peripheral and collaborator traits (display, touch, bus clock, link, feedback)
//! - Touch calibration and screen layout
//! - Button grid debouncing, arm latch, long-press and easter-egg state
//! - Shared-bus speed arbitration
//! - Screen painting routines
//! - The polling control loop tying it all together

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod command;
pub mod config;
pub mod control;
pub mod error;
pub mod state;
pub mod traits;
pub mod ui;

pub use command::Command;
pub use control::{ControlLoop, Emission, Parts, TickOutcome, TickReport};
pub use error::{BusError, CalibrationError, ControlError, LinkError};
