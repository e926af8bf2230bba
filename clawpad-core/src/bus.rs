//! Shared-bus speed arbitration
//!
//! The display and the touch controller hang off the same SPI bus. The
//! display wants a fast clock for pixel throughput, the touch ADC needs a
//! slow one for conversion accuracy. [`BusArbiter`] tracks which speed is
//! programmed and switches it right before the operation that needs it.

use crate::error::BusError;
use crate::traits::BusClock;

/// Who the bus is currently clocked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusSpeed {
    /// Slow clock for touch acquisitions
    Touch,
    /// Fast clock for display block transfers
    Display,
}

/// Owns the bus clock and the speed policy
pub struct BusArbiter<C> {
    clock: C,
    touch_hz: u32,
    display_hz: u32,
    current: Option<BusSpeed>,
}

impl<C: BusClock> BusArbiter<C> {
    /// Create an arbiter; the first switch always programs the clock
    pub fn new(clock: C, touch_hz: u32, display_hz: u32) -> Self {
        Self {
            clock,
            touch_hz,
            display_hz,
            current: None,
        }
    }

    /// Downshift for a touch acquisition
    pub fn for_touch(&mut self) -> Result<(), BusError> {
        self.switch(BusSpeed::Touch)
    }

    /// Upshift for a display operation
    pub fn for_display(&mut self) -> Result<(), BusError> {
        self.switch(BusSpeed::Display)
    }

    /// Speed last programmed, if any
    pub fn current(&self) -> Option<BusSpeed> {
        self.current
    }

    /// Frequency for a given speed
    pub fn frequency(&self, speed: BusSpeed) -> u32 {
        match speed {
            BusSpeed::Touch => self.touch_hz,
            BusSpeed::Display => self.display_hz,
        }
    }

    fn switch(&mut self, speed: BusSpeed) -> Result<(), BusError> {
        if self.current == Some(speed) {
            return Ok(());
        }
        // Unknown until the write succeeds
        self.current = None;
        self.clock.set_frequency(self.frequency(speed))?;
        self.current = Some(speed);
        Ok(())
    }

    #[cfg(test)]
    fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
