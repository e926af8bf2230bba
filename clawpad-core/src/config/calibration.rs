//! Touch calibration
//!
//! Maps raw 12-bit ADC readings from the resistive panel into normalized
//! coordinates in `[0, 1]`.

use crate::error::CalibrationError;

/// Raw ADC extents of the touch panel
///
/// `x_min`/`x_max` are the readings at the left and right edges of the
/// sensor's X axis. They may be given in either order: a reversed pair
/// mirrors the axis. The Y axis is inverted during normalization because the
/// sensor's vertical axis runs opposite to the display's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub x_min: u16,
    pub x_max: u16,
    pub y_min: u16,
    pub y_max: u16,
}

/// Calibration measured on the reference panel
pub const DEFAULT_CALIBRATION: Calibration = Calibration::raw(1880, 150, 270, 1830);

impl Default for Calibration {
    fn default() -> Self {
        Self::FULL_SCALE
    }
}

impl Calibration {
    /// Full 12-bit range, used until a calibration is supplied
    pub const FULL_SCALE: Calibration = Calibration::raw(0, 4095, 0, 4095);

    /// Build a calibration without checking the spans
    pub const fn raw(x_min: u16, x_max: u16, y_min: u16, y_max: u16) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Build a calibration, rejecting zero-span axes
    pub fn new(x_min: u16, x_max: u16, y_min: u16, y_max: u16) -> Result<Self, CalibrationError> {
        let calibration = Self::raw(x_min, x_max, y_min, y_max);
        calibration.validate()?;
        Ok(calibration)
    }

    /// Check that neither axis has a zero span
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if self.x_min == self.x_max {
            return Err(CalibrationError::DegenerateX);
        }
        if self.y_min == self.y_max {
            return Err(CalibrationError::DegenerateY);
        }
        Ok(())
    }

    /// Normalize a raw X reading, clamped to `[0, 1]`
    pub fn normalize_x(&self, raw: u16) -> f32 {
        ratio(raw as f32 - self.x_min as f32, self.x_max as f32 - self.x_min as f32)
    }

    /// Normalize a raw Y reading, clamped to `[0, 1]` (axis inverted)
    pub fn normalize_y(&self, raw: u16) -> f32 {
        ratio(self.y_max as f32 - raw as f32, self.y_max as f32 - self.y_min as f32)
    }

    /// Normalize a raw `(x, y)` pair
    pub fn normalize(&self, raw_x: u16, raw_y: u16) -> (f32, f32) {
        (self.normalize_x(raw_x), self.normalize_y(raw_y))
    }
}

/// `num / span` clamped to `[0, 1]`; a zero span maps everything to 0
fn ratio(num: f32, span: f32) -> f32 {
    if span == 0.0 {
        return 0.0;
    }
    (num / span).clamp(0.0, 1.0)
}
