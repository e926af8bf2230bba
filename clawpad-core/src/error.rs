//! Error types shared by the core and the drivers

/// Peripheral transport failure
///
/// Raised when a register transaction on the shared bus or a control line
/// fails. The core has no recovery policy for these; they end the current
/// tick and propagate to whoever owns the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// SPI transfer or clock reconfiguration failed
    Spi,
    /// Chip-select, data/command or reset line could not be driven
    Pin,
}

/// Calibration extents with a zero span on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// `x_min == x_max`
    DegenerateX,
    /// `y_min == y_max`
    DegenerateY,
}

/// Command link failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No remote controller is connected
    NotConnected,
    /// The transport accepted the command but failed to deliver it
    Write,
}

/// Errors that end a control-loop tick or prevent the loop from starting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Display, touch or bus clock transaction failed
    Bus(BusError),
    /// Configured calibration is unusable
    Calibration(CalibrationError),
}

impl From<BusError> for ControlError {
    fn from(err: BusError) -> Self {
        ControlError::Bus(err)
    }
}

impl From<CalibrationError> for ControlError {
    fn from(err: CalibrationError) -> Self {
        ControlError::Calibration(err)
    }
}
