//! User feedback peripherals
//!
//! All of these are fire-and-forget: implementations log their own
//! failures and never report them back to the state machine.

use crate::config::{READOUT_GLYPH_WIDTH, READOUT_WIDTH};

/// One note of a melody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Tone frequency, 0 for a rest
    pub freq_hz: u32,
    /// Length in 120 ms units
    pub units: u8,
}

impl Note {
    /// Length of one duration unit
    pub const UNIT_MS: u32 = 120;

    /// Silence after every note
    pub const GAP_MS: u32 = 50;

    pub const fn new(freq_hz: u32, units: u8) -> Self {
        Self { freq_hz, units }
    }

    /// How long the tone sounds
    pub const fn duration_ms(&self) -> u32 {
        Self::UNIT_MS * self.units as u32
    }

    pub const fn is_rest(&self) -> bool {
        self.freq_hz == 0
    }
}

/// Tri-colour status light
pub trait Indicator {
    /// Set the colour, 8 bits per channel
    fn set_color(&mut self, r: u8, g: u8, b: u8);

    fn off(&mut self) {
        self.set_color(0, 0, 0);
    }
}

/// Tone generator
#[allow(async_fn_in_trait)]
pub trait Speaker {
    /// Play a melody, returning once the last gap has elapsed
    async fn play(&mut self, melody: &[Note]);
}

/// Small text display used for status messages
#[allow(async_fn_in_trait)]
pub trait Readout {
    /// Draw `text` at pixel `(x, y)`, optionally clearing the screen first
    async fn write(&mut self, text: &str, x: u8, y: u8, clear: bool);

    /// Blank the readout
    async fn clear(&mut self);

    /// Draw `text` horizontally centred on row `y`
    async fn write_centered(&mut self, text: &str, y: u8, clear: bool) {
        let width = (text.len() as u32 * READOUT_GLYPH_WIDTH as u32).min(READOUT_WIDTH as u32);
        let x = (READOUT_WIDTH as u32 - width) / 2;
        self.write(text, x as u8, y, clear).await
    }
}
