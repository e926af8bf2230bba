//! Touch panel trait

use crate::config::Calibration;
use crate::error::BusError;
use crate::ui::Point;

/// One calibrated touch acquisition
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    /// Normalized X in `[0, 1]`
    pub x: f32,
    /// Normalized Y in `[0, 1]`
    pub y: f32,
    /// Raw pressure reading, higher is firmer
    pub pressure: u16,
}

impl TouchSample {
    /// Map onto screen pixels
    ///
    /// The sensor is mounted rotated against the panel, so the sensor's Y
    /// axis runs along the screen's width and X along its height. Results
    /// are truncated and clamped to the last pixel.
    pub fn to_screen(&self, width: u16, height: u16) -> Point {
        Point {
            x: scale_axis(self.y, width),
            y: scale_axis(self.x, height),
        }
    }
}

fn scale_axis(norm: f32, extent: u16) -> u16 {
    let max = extent.saturating_sub(1);
    let v = (norm.clamp(0.0, 1.0) * extent as f32) as u16;
    v.min(max)
}

/// Resistive touch controller
pub trait TouchPanel {
    /// Acquire X, Y and pressure and apply the calibration
    fn read(&mut self) -> Result<TouchSample, BusError>;

    /// Check whether the panel is currently touched
    ///
    /// Without an interrupt line this performs a full acquisition and must
    /// not be called faster than the polling period.
    fn is_touched(&mut self) -> Result<bool, BusError>;

    /// Replace the calibration used by subsequent reads
    fn set_calibration(&mut self, calibration: Calibration);

    /// Calibration currently in use
    fn calibration(&self) -> Calibration;
}
