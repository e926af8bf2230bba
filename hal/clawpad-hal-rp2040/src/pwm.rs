//! PWM helpers
//!
//! Counter settings come from [`PwmTiming`], computed against the live
//! system clock.

use clawpad_hal::{PwmTiming, ToneOutput};
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::types::U12F4;

fn apply_timing(config: &mut Config, timing: PwmTiming) {
    config.divider = U12F4::from_num(timing.divider);
    config.top = timing.top;
}

/// Slice configuration for plain duty-cycle outputs at `freq_hz`
///
/// Both channels start at 0 % duty. Falls back to the slice defaults if
/// the frequency cannot be produced.
pub fn duty_config(freq_hz: u32) -> Config {
    let mut config = Config::default();
    if let Some(timing) = PwmTiming::for_frequency(clk_sys_freq(), freq_hz) {
        apply_timing(&mut config, timing);
    }
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Buzzer on channel A of a PWM slice
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PwmTone<'d> {
    pub fn new(pwm: Pwm<'d>) -> Self {
        let mut tone = Self {
            pwm,
            config: Config::default(),
        };
        tone.silence();
        tone
    }
}

impl ToneOutput for PwmTone<'_> {
    fn set_tone(&mut self, hz: u32) {
        match PwmTiming::for_frequency(clk_sys_freq(), hz) {
            Some(timing) => {
                apply_timing(&mut self.config, timing);
                self.config.compare_a = timing.compare(1, 2);
                self.pwm.set_config(&self.config);
            }
            None => self.silence(),
        }
    }

    fn silence(&mut self) {
        self.config.compare_a = 0;
        self.pwm.set_config(&self.config);
    }
}
