//! Digital control lines
//!
//! Pin writes on the supported chips cannot fail, so these traits are
//! infallible, unlike their `embedded-hal` counterparts.

/// Digital output pin
///
/// Used for chip-select, data/command and reset lines. Implementations
/// drive the actual hardware register for the specific chip.
pub trait OutputPin {
    fn set_high(&mut self);

    fn set_low(&mut self);

    /// Drive the pin to `high`
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level last driven
    fn is_set_high(&self) -> bool;

    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Used for the touch controller's pen-interrupt line.
pub trait InputPin {
    fn is_high(&self) -> bool;

    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Placeholder for an optional pin that is not wired on a board
///
/// Reads as released (high) and ignores writes, so a driver can be
/// instantiated with `None::<NoPin>` for its reset or interrupt line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl OutputPin for NoPin {
    fn set_high(&mut self) {}

    fn set_low(&mut self) {}

    fn is_set_high(&self) -> bool {
        true
    }
}

impl InputPin for NoPin {
    fn is_high(&self) -> bool {
        true
    }
}
