//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in clawpad-core for the pendant's peripherals:
//!
//! - ILI9341 TFT panel with a 5×8 bitmap font ([`DisplayPanel`](clawpad_core::traits::DisplayPanel))
//! - TSC2046 resistive touch controller ([`TouchPanel`](clawpad_core::traits::TouchPanel))
//! - SSD1306 OLED status readout ([`Readout`](clawpad_core::traits::Readout))
//! - Bus clock adapter for the shared SPI bus ([`BusClock`](clawpad_core::traits::BusClock))
//! - RGB status light and piezo buzzer ([`Indicator`](clawpad_core::traits::Indicator),
//!   [`Speaker`](clawpad_core::traits::Speaker))

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod font;
pub mod ili9341;
pub mod led;
pub mod spi_clock;
pub mod ssd1306;
pub mod tsc2046;

pub use buzzer::Buzzer;
pub use ili9341::{DisplayConfig, Ili9341, Orientation};
pub use led::RgbLed;
pub use spi_clock::SpiClock;
pub use ssd1306::Ssd1306;
pub use tsc2046::Tsc2046;
