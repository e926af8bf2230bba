//! TSC2046 resistive touch controller (SPI)
//!
//! Each axis is a separate conversion: one command byte selects the
//! channel, then two bytes clock out the 12-bit result (MSB first, left
//! aligned). The controller wants a slow bus clock; callers switch the
//! shared bus before sampling.
//!
//! The chip-select edges need a few microseconds either side for the
//! sample-and-hold to settle, so the driver owns a blocking delay.

use clawpad_core::config::{Calibration, PRESSURE_THRESHOLD};
use clawpad_core::error::BusError;
use clawpad_core::traits::{TouchPanel, TouchSample};
use clawpad_hal::{InputPin, OutputPin, SpiBus};
use embedded_hal::delay::DelayNs;

/// Conversion commands (12-bit, differential, power-down between)
pub mod cmd {
    pub const READ_X: u8 = 0x90;
    pub const READ_Y: u8 = 0xD0;
    pub const READ_Z: u8 = 0xB0;
}

/// Settle time around chip-select edges
const CS_SETTLE_US: u32 = 3;
/// Wait between command and result
const CONVERSION_US: u32 = 1;

/// Uncalibrated conversion results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub x: u16,
    pub y: u16,
    /// Pressure, higher is firmer
    pub z: u16,
}

/// Decode the two result bytes into a 12-bit value
pub const fn decode(msb: u8, lsb: u8) -> u16 {
    (((msb as u16) << 4) | ((lsb as u16) >> 4)) & 0x0FFF
}

/// TSC2046 driver
pub struct Tsc2046<SPI, CS, IRQ, D> {
    spi: SPI,
    cs: CS,
    irq: Option<IRQ>,
    delay: D,
    calibration: Calibration,
}

impl<SPI, CS, IRQ, D> Tsc2046<SPI, CS, IRQ, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    /// Create a driver with full-scale calibration
    ///
    /// Without an `irq` line, touch detection falls back to the pressure
    /// channel.
    pub fn new(spi: SPI, mut cs: CS, irq: Option<IRQ>, delay: D) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            irq,
            delay,
            calibration: Calibration::FULL_SCALE,
        }
    }

    /// Acquire X, Y and Z without calibration
    pub fn read_raw(&mut self) -> Result<RawSample, BusError> {
        let x = self.read_axis(cmd::READ_X)?;
        let y = self.read_axis(cmd::READ_Y)?;
        let z = self.read_axis(cmd::READ_Z)?;
        Ok(RawSample { x, y, z })
    }

    fn read_axis(&mut self, command: u8) -> Result<u16, BusError> {
        self.select();
        let result = self.convert(command);
        self.deselect();
        result
    }

    fn convert(&mut self, command: u8) -> Result<u16, BusError> {
        self.spi.write(&[command]).map_err(|_| BusError::Spi)?;
        self.delay.delay_us(CONVERSION_US);
        let mut buf = [0u8; 2];
        self.spi.read(&mut buf).map_err(|_| BusError::Spi)?;
        Ok(decode(buf[0], buf[1]))
    }

    fn select(&mut self) {
        self.delay.delay_us(CS_SETTLE_US);
        self.cs.set_low();
        self.delay.delay_us(CS_SETTLE_US);
    }

    fn deselect(&mut self) {
        self.delay.delay_us(CS_SETTLE_US);
        self.cs.set_high();
        self.delay.delay_us(CS_SETTLE_US);
    }
}

impl<SPI, CS, IRQ, D> TouchPanel for Tsc2046<SPI, CS, IRQ, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    IRQ: InputPin,
    D: DelayNs,
{
    fn read(&mut self) -> Result<TouchSample, BusError> {
        let raw = self.read_raw()?;
        let (x, y) = self.calibration.normalize(raw.x, raw.y);
        Ok(TouchSample {
            x,
            y,
            pressure: raw.z,
        })
    }

    fn is_touched(&mut self) -> Result<bool, BusError> {
        match self.irq.as_ref() {
            // Pen interrupt is active low
            Some(irq) => Ok(irq.is_low()),
            None => Ok(self.read_raw()?.z > PRESSURE_THRESHOLD),
        }
    }

    fn set_calibration(&mut self, calibration: Calibration) {
        self.calibration = calibration;
    }

    fn calibration(&self) -> Calibration {
        self.calibration
    }
}
