//! Control loop task
//!
//! Owns every peripheral for the lifetime of the firmware and runs the
//! touch polling loop until the long-press shutdown.

use clawpad_core::config::ControlConfig;
use clawpad_core::{ControlLoop, Parts};
use clawpad_drivers::{Buzzer, Ili9341, RgbLed, SpiClock, Ssd1306, Tsc2046};
use clawpad_hal::gpio::NoPin;
use clawpad_hal_rp2040::{PwmTone, RpOutput, SharedSpi};
use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::{I2C1, SPI0};
use embassy_rp::pwm::PwmOutput;
use embassy_time::Delay;

use crate::link::BleLink;

type Bus = SharedSpi<'static, 'static, SPI0>;

pub type Display = Ili9341<Bus, RpOutput<'static>, RpOutput<'static>, NoPin>;
pub type Touch = Tsc2046<Bus, RpOutput<'static>, NoPin, Delay>;
pub type StatusLed = RgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;
pub type Beeper = Buzzer<PwmTone<'static>, Delay>;
pub type Oled = Ssd1306<I2c<'static, I2C1, Async>>;

pub type ControlParts =
    Parts<Display, Touch, SpiClock<Bus>, BleLink, StatusLed, Beeper, Oled, Delay>;

/// Run the pendant until shutdown
#[embassy_executor::task]
pub async fn control_task(parts: ControlParts) {
    info!("Control task started");

    let mut control = match ControlLoop::new(parts, ControlConfig::default()) {
        Ok(control) => control,
        Err(e) => {
            error!("Invalid control configuration: {}", e);
            return;
        }
    };

    match control.run().await {
        Ok(()) => info!("Control loop finished, pendant idle"),
        Err(e) => error!("Control loop stopped: {}", e),
    }
}
