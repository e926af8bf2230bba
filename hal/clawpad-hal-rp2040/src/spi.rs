//! Shared blocking SPI bus
//!
//! The display and the touch controller sit on the same SPI peripheral
//! and run at different clock rates. [`SpiBusCell`] owns the peripheral;
//! each device and the bus-clock adapter get a [`SharedSpi`] handle.
//! Chip select stays with the device drivers.
//!
//! Everything runs inside one task, so the cell uses a no-op mutex: the
//! lock only guards against re-entrant borrows.

use core::cell::RefCell;

use clawpad_hal::spi::{Mode, SpiConfig};
use embassy_rp::spi::{self, Blocking, Error, Instance, Phase, Polarity, Spi};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Translate a shared bus setup into the embassy-rp form
pub fn rp_config(config: SpiConfig) -> spi::Config {
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = if config.mode.idles_high() {
        Polarity::IdleHigh
    } else {
        Polarity::IdleLow
    };
    rp.phase = if config.mode.samples_second_edge() {
        Phase::CaptureOnSecondTransition
    } else {
        Phase::CaptureOnFirstTransition
    };
    rp
}

/// Mode 0 at `frequency`, which both pendant devices use
pub fn mode0(frequency: u32) -> spi::Config {
    rp_config(SpiConfig::new(frequency, Mode::Mode0))
}

struct BusState<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
    frequency: u32,
}

/// Owner of an SPI peripheral shared between devices
pub struct SpiBusCell<'d, T: Instance> {
    state: Mutex<NoopRawMutex, RefCell<BusState<'d, T>>>,
}

impl<'d, T: Instance> SpiBusCell<'d, T> {
    /// Wrap a configured bus; `frequency` is the clock it was created with
    pub fn new(spi: Spi<'d, T, Blocking>, frequency: u32) -> Self {
        Self {
            state: Mutex::new(RefCell::new(BusState { spi, frequency })),
        }
    }

    /// A handle for one device
    pub fn handle(&self) -> SharedSpi<'_, 'd, T> {
        SharedSpi { cell: self }
    }

    fn with<R>(&self, f: impl FnOnce(&mut BusState<'d, T>) -> R) -> R {
        self.state.lock(|state| f(&mut state.borrow_mut()))
    }
}

/// Device handle on a [`SpiBusCell`]
pub struct SharedSpi<'a, 'd, T: Instance> {
    cell: &'a SpiBusCell<'d, T>,
}

impl<T: Instance> clawpad_hal::SpiBus for SharedSpi<'_, '_, T> {
    type Error = Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        self.cell.with(|s| s.spi.blocking_write(data))
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        self.cell.with(|s| s.spi.blocking_read(buf))
    }

    fn set_frequency(&mut self, hz: u32) -> Result<(), Error> {
        self.cell.with(|s| {
            if s.frequency != hz {
                s.spi.set_frequency(hz);
                s.frequency = hz;
            }
        });
        Ok(())
    }

    fn frequency(&self) -> u32 {
        self.cell.with(|s| s.frequency)
    }
}
