//! Shared bus clock control

use crate::error::BusError;

/// Clock of the bus shared by the display and the touch controller
pub trait BusClock {
    /// Reprogram the bus clock; takes effect for the next transaction
    fn set_frequency(&mut self, hz: u32) -> Result<(), BusError>;
}

impl<T: BusClock + ?Sized> BusClock for &mut T {
    fn set_frequency(&mut self, hz: u32) -> Result<(), BusError> {
        (**self).set_frequency(hz)
    }
}
