//! Loop timing and tunables

use super::calibration::{Calibration, DEFAULT_CALIBRATION};

/// Bus clock while sampling the touch controller
pub const TOUCH_BUS_HZ: u32 = 1_000_000;

/// Bus clock while streaming pixels to the display
pub const DISPLAY_BUS_HZ: u32 = 30_000_000;

/// Touch polling period
pub const POLL_PERIOD_MS: u32 = 10;

/// Pause between the release repaint and the outbound command
pub const VISUAL_SETTLE_MS: u32 = 500;

/// Time allowed for the arm to finish a movement
pub const MOVEMENT_WAIT_MS: u32 = 1000;

/// Ticks CLOSE must be held before shutting down (≈2 s)
pub const LONG_PRESS_TICKS: u16 = 200;

/// Easter-egg counter ceiling
pub const EASTER_EGG_CEILING: u8 = 3;

/// Saturated ticks between colour steps
pub const EASTER_EGG_PERIOD: u16 = 100;

/// Pressure above which a sample counts as a touch when no IRQ line exists
pub const PRESSURE_THRESHOLD: u16 = 100;

/// Wait after the first paint before homing the arm
pub const STARTUP_SETTLE_MS: u32 = 2000;

/// Wait between the homing command and opening the claw
pub const HOMING_GAP_MS: u32 = 500;

/// Runtime configuration of the control loop
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Raw ADC extents of the touch panel
    pub calibration: Calibration,
    /// Bus clock for touch acquisitions
    pub touch_bus_hz: u32,
    /// Bus clock for display operations
    pub display_bus_hz: u32,
    /// Polling period in milliseconds
    pub poll_period_ms: u32,
    /// Pause before a command is sent after its release repaint
    pub visual_settle_ms: u32,
    /// Movement wait after each sent command
    pub movement_wait_ms: u32,
    /// Long-press shutdown threshold in ticks
    pub long_press_ticks: u16,
    /// Easter-egg counter ceiling
    pub easter_egg_ceiling: u8,
    /// Easter-egg colour period in saturated ticks
    pub easter_egg_period: u16,
    /// Settle after the first paint during start-up
    pub startup_settle_ms: u32,
    /// Gap between the two start-up commands
    pub homing_gap_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            calibration: DEFAULT_CALIBRATION,
            touch_bus_hz: TOUCH_BUS_HZ,
            display_bus_hz: DISPLAY_BUS_HZ,
            poll_period_ms: POLL_PERIOD_MS,
            visual_settle_ms: VISUAL_SETTLE_MS,
            movement_wait_ms: MOVEMENT_WAIT_MS,
            long_press_ticks: LONG_PRESS_TICKS,
            easter_egg_ceiling: EASTER_EGG_CEILING,
            easter_egg_period: EASTER_EGG_PERIOD,
            startup_settle_ms: STARTUP_SETTLE_MS,
            homing_gap_ms: HOMING_GAP_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControlConfig::default();
        assert_eq!(config.calibration, DEFAULT_CALIBRATION);
        assert!(config.touch_bus_hz < config.display_bus_hz);
        assert_eq!(config.poll_period_ms, 10);
        assert_eq!(config.long_press_ticks, 200);
    }
}
