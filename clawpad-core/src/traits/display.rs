//! Display panel trait
//!
//! A pixel-addressable 16-bit colour surface with windowed block writes
//! and a fixed 5×8 bitmap font.

use embedded_hal_async::delay::DelayNs;

use crate::config::{CHAR_SPACING, LINE_SPACING};
use crate::error::BusError;
use crate::ui::Rgb565;

/// Glyph cell width in font pixels
pub const GLYPH_WIDTH: u16 = 5;

/// Glyph cell height in font pixels
pub const GLYPH_HEIGHT: u16 = 8;

/// Colours and metrics for a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub fg: Rgb565,
    pub bg: Rgb565,
    /// Integer blow-up factor, at least 1
    pub scale: u16,
    /// Pixels between glyphs
    pub spacing: u16,
    /// Pixels between lines
    pub line_spacing: u16,
}

impl TextStyle {
    pub const fn new(fg: Rgb565, bg: Rgb565) -> Self {
        Self {
            fg,
            bg,
            scale: 1,
            spacing: CHAR_SPACING,
            line_spacing: LINE_SPACING,
        }
    }

    pub const fn scale(mut self, scale: u16) -> Self {
        self.scale = if scale == 0 { 1 } else { scale };
        self
    }

    pub const fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }
}

/// Pixel-addressable display surface
///
/// Coordinates are never validated by the panel: callers must keep every
/// rectangle inside `width() × height()`.
#[allow(async_fn_in_trait)]
pub trait DisplayPanel {
    /// Logical width in pixels
    fn width(&self) -> u16;

    /// Logical height in pixels
    fn height(&self) -> u16;

    /// Run the controller bring-up sequence and clear the screen
    ///
    /// The settle delays between stages are hardware requirements.
    async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError>;

    /// Program the addressable window for the next pixel stream
    ///
    /// Exactly `w * h` pixels must follow before any other operation.
    fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), BusError>;

    /// Fill a rectangle with one colour
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565)
        -> Result<(), BusError>;

    /// Rasterize one glyph, returning its advance box `(width, height)`
    ///
    /// Characters outside printable ASCII render as a space.
    fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgb565,
        bg: Rgb565,
        scale: u16,
    ) -> Result<(u16, u16), BusError>;

    /// Write a single pixel
    fn pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), BusError> {
        self.fill_rect(x, y, 1, 1, color)
    }

    /// Fill the whole surface
    fn fill(&mut self, color: Rgb565) -> Result<(), BusError> {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, color)
    }

    /// Render a string left to right
    ///
    /// A newline returns to the starting column and moves down one line.
    fn text(&mut self, s: &str, x: u16, y: u16, style: TextStyle) -> Result<(), BusError> {
        let mut cx = x;
        let mut cy = y;
        for ch in s.chars() {
            if ch == '\n' {
                cx = x;
                let line = GLYPH_HEIGHT.saturating_mul(style.scale);
                cy = cy.saturating_add(line).saturating_add(style.line_spacing);
                continue;
            }
            let (w, _) = self.draw_char(cx, cy, ch, style.fg, style.bg, style.scale)?;
            cx = cx.saturating_add(w).saturating_add(style.spacing);
        }
        Ok(())
    }
}

/// Width in pixels of `text` rendered on a single line
pub fn text_width(text: &str, scale: u16, spacing: u16) -> u16 {
    let n = text.chars().count() as u16;
    if n == 0 {
        return 0;
    }
    n.saturating_mul(GLYPH_WIDTH.saturating_mul(scale))
        .saturating_add((n - 1).saturating_mul(spacing))
}
