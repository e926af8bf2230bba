//! Bus clock adapter
//!
//! Exposes the clock of any [`clawpad_hal::SpiBus`] handle as a
//! [`BusClock`], so the control loop can switch the shared bus between
//! touch and display speeds without knowing the chip.

use clawpad_core::error::BusError;
use clawpad_core::traits::BusClock;
use clawpad_hal::SpiBus;

/// [`BusClock`] over an SPI handle
pub struct SpiClock<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus> SpiClock<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Clock currently programmed on the bus
    pub fn frequency(&self) -> u32 {
        self.spi.frequency()
    }
}

impl<SPI: SpiBus> BusClock for SpiClock<SPI> {
    fn set_frequency(&mut self, hz: u32) -> Result<(), BusError> {
        self.spi.set_frequency(hz).map_err(|_| BusError::Spi)
    }
}
