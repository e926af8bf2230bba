//! RGB status light on three PWM channels

use clawpad_core::traits::Indicator;
use embedded_hal::pwm::SetDutyCycle;

/// Common-cathode RGB LED
///
/// Each 8-bit channel value becomes a duty cycle of `value / 255`.
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self { red, green, blue };
        led.off();
        led
    }
}

impl<R, G, B> Indicator for RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, r: u8, g: u8, b: u8) {
        // PWM channel writes cannot fail on the supported boards
        let _ = self.red.set_duty_cycle_fraction(r as u16, 255);
        let _ = self.green.set_duty_cycle_fraction(g as u16, 255);
        let _ = self.blue.set_duty_cycle_fraction(b as u16, 255);
    }
}
