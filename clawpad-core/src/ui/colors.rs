//! Colour constants
//!
//! The panel is driven with display inversion enabled, so every colour is
//! stored pre-inverted: the value written for "white" is all zeroes.

/// 16-bit 5-6-5 packed colour as sent on the wire
pub type Rgb565 = u16;

pub const WHITE: Rgb565 = 0x0000;
pub const BLACK: Rgb565 = 0xFFFF;
pub const GRAY: Rgb565 = 0x7BEF;
pub const RED: Rgb565 = 0x07FF;
pub const GREEN: Rgb565 = 0xF81F;

/// Step between easter-egg colours
pub const RAINBOW_STEP: Rgb565 = 0x000A;

/// The two colours idle widgets are painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    /// Cell faces and toggle buttons
    pub primary: Rgb565,
    /// Background, borders and highlight panels
    pub secondary: Rgb565,
}

impl Palette {
    pub const BASELINE: Palette = Palette {
        primary: WHITE,
        secondary: BLACK,
    };

    /// Baseline palette with a different primary colour
    pub const fn with_primary(primary: Rgb565) -> Self {
        Self {
            primary,
            secondary: BLACK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Next colour of the easter-egg rainbow, wrapping to zero past `0xFFFF`
pub fn next_rainbow(color: Rgb565) -> Rgb565 {
    color.checked_add(RAINBOW_STEP).unwrap_or(0)
}
