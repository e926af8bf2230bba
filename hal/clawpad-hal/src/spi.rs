//! Shared SPI bus
//!
//! The display and the touch controller share one bus but need very
//! different clock rates, so unlike `embedded-hal`'s `SpiBus` this trait
//! lets the owner reprogram the clock between transactions. Chip select
//! belongs to the device drivers.

/// Blocking SPI master with a runtime-adjustable clock
pub trait SpiBus {
    type Error;

    /// Clock out `data`, discarding whatever comes back
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Clock in `buf.len()` bytes while sending zeros
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Reprogram the bus clock for the next transfer
    ///
    /// Peripherals round to the closest rate they can divide down to.
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Rate last requested through [`SpiBus::set_frequency`] or at setup
    fn frequency(&self) -> u32;
}

/// Clock polarity and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Whether the clock idles high
    pub const fn idles_high(self) -> bool {
        matches!(self, Mode::Mode2 | Mode::Mode3)
    }

    /// Whether data is sampled on the second clock edge
    pub const fn samples_second_edge(self) -> bool {
        matches!(self, Mode::Mode1 | Mode::Mode3)
    }
}

/// Initial bus setup handed to a chip HAL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Starting clock in Hz
    pub frequency: u32,
    pub mode: Mode,
}

impl SpiConfig {
    pub const fn new(frequency: u32, mode: Mode) -> Self {
        Self { frequency, mode }
    }
}
