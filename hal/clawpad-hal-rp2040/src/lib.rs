//! RP2040-specific HAL for the pendant firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `clawpad-hal` traits on top of `embassy-rp`:
//!
//! - A GPIO wrapper implementing `OutputPin`
//! - A blocking SPI bus shared by several devices, with runtime clock changes
//! - PWM helpers for the status light and the buzzer

#![no_std]

pub mod gpio;
pub mod pwm;
pub mod spi;

pub use gpio::RpOutput;
pub use pwm::{duty_config, PwmTone};
pub use spi::{mode0, rp_config, SharedSpi, SpiBusCell};

// Re-export shared traits from clawpad-hal for convenience
pub use clawpad_hal::{InputPin, OutputPin, SpiBus, ToneOutput};
