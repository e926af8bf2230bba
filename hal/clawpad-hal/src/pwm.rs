//! PWM abstractions
//!
//! Plain duty-cycle outputs (the status light) use
//! `embedded_hal::pwm::SetDutyCycle` directly. Tone generation needs the
//! period to change at runtime, which that trait does not cover.

/// PWM output whose frequency can be changed, used for the buzzer
pub trait ToneOutput {
    /// Sound a square wave at `hz` with 50 % duty
    fn set_tone(&mut self, hz: u32);

    /// Hold the output low
    fn silence(&mut self);
}

/// Counter settings for a PWM slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider (1-255)
    pub divider: u8,
    /// Counter wrap value; the period is `top + 1` divided ticks
    pub top: u16,
}

impl PwmTiming {
    /// Smallest divider that fits `freq_hz` into a 16-bit counter
    ///
    /// Returns `None` when the frequency is zero or cannot be produced
    /// from `clock_hz`.
    pub const fn for_frequency(clock_hz: u32, freq_hz: u32) -> Option<Self> {
        if freq_hz == 0 || freq_hz > clock_hz / 2 {
            return None;
        }
        let per_tick = freq_hz as u64 * 65_536;
        let mut divider = (clock_hz as u64).div_ceil(per_tick);
        if divider == 0 {
            divider = 1;
        }
        if divider > 255 {
            return None;
        }
        let top = clock_hz as u64 / (divider * freq_hz as u64) - 1;
        Some(Self {
            divider: divider as u8,
            top: top as u16,
        })
    }

    /// Compare value for a duty cycle of `num / denom`
    pub const fn compare(&self, num: u32, denom: u32) -> u16 {
        if denom == 0 {
            return 0;
        }
        let period = self.top as u64 + 1;
        let value = period * num as u64 / denom as u64;
        if value > self.top as u64 + 1 {
            self.top.saturating_add(1)
        } else {
            value as u16
        }
    }
}
