//! ILI9341 TFT display driver (SPI)
//!
//! 320×240 RGB565 panel with a 4-wire SPI interface: data/command select
//! on a separate line, chip select held low for each transaction, optional
//! hardware reset.
//!
//! # Pixel streaming
//!
//! Every drawing operation programs a window (CASET/RASET/RAMWR) and then
//! streams exactly `w * h` big-endian colour words. Fills are sent in
//! 512-byte chunks plus one trailing partial chunk.

use clawpad_core::error::BusError;
use clawpad_core::traits::DisplayPanel;
use clawpad_core::ui::Rgb565;
use clawpad_hal::{OutputPin, SpiBus};
use embedded_hal_async::delay::DelayNs;

use crate::font::{glyph, GLYPH_COLUMNS, GLYPH_ROWS};

/// ILI9341 command bytes
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Exit sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Display inversion on
    pub const INVON: u8 = 0x21;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Row (page) address set
    pub const RASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control
    pub const MADCTL: u8 = 0x36;
    /// Interface pixel format
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL flag bits
pub mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// Vertical refresh order
    pub const ML: u8 = 0x10;
    /// BGR colour filter
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order
    pub const MH: u8 = 0x04;
}

/// 16 bits per pixel
pub const COLOR_MODE_RGB565: u8 = 0x55;

/// Bytes per SPI write when streaming pixels
pub const CHUNK_BYTES: usize = 512;
const CHUNK_PIXELS: u32 = (CHUNK_BYTES / 2) as u32;

/// Panel orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Portrait,
    Landscape,
    PortraitInverted,
    LandscapeInverted,
}

impl Orientation {
    /// MADCTL register value
    pub const fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => madctl::MX | madctl::BGR,
            Orientation::Landscape => madctl::MV | madctl::BGR,
            Orientation::PortraitInverted => madctl::MY | madctl::BGR,
            Orientation::LandscapeInverted => madctl::MV | madctl::MY | madctl::BGR,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Logical width after orientation
    pub width: u16,
    /// Logical height after orientation
    pub height: u16,
    pub orientation: Orientation,
    /// COLMOD value
    pub color_mode: u8,
    /// Default gap between glyphs
    pub char_spacing: u16,
    /// Default gap between text lines
    pub line_spacing: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            orientation: Orientation::LandscapeInverted,
            color_mode: COLOR_MODE_RGB565,
            char_spacing: 1,
            line_spacing: 1,
        }
    }
}

/// ILI9341 driver
///
/// Owns its chip-select, data/command and optional reset lines. The SPI
/// handle may be shared with other devices; the bus clock is managed
/// outside the driver.
pub struct Ili9341<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: Option<RST>,
    config: DisplayConfig,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver; the panel is not touched until [`DisplayPanel::init`]
    pub fn new(spi: SPI, mut cs: CS, dc: DC, rst: Option<RST>, config: DisplayConfig) -> Self {
        cs.set_high();
        Self {
            spi,
            cs,
            dc,
            rst,
            config,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Release the bus handle and pins
    pub fn release(self) -> (SPI, CS, DC, Option<RST>) {
        (self.spi, self.cs, self.dc, self.rst)
    }

    fn write_command(&mut self, command: u8) -> Result<(), BusError> {
        self.dc.set_low();
        self.transaction(&[command])
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), BusError> {
        self.dc.set_high();
        self.transaction(data)
    }

    fn transaction(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result.map_err(|_| BusError::Spi)
    }

    /// Stream `count` copies of one colour into the current window
    fn stream_color(&mut self, color: Rgb565, count: u32) -> Result<(), BusError> {
        let mut chunk = [0u8; CHUNK_BYTES];
        for px in chunk.chunks_exact_mut(2) {
            px.copy_from_slice(&color.to_be_bytes());
        }

        for _ in 0..count / CHUNK_PIXELS {
            self.write_data(&chunk)?;
        }
        let remaining = (count % CHUNK_PIXELS) as usize;
        if remaining > 0 {
            self.write_data(&chunk[..remaining * 2])?;
        }
        Ok(())
    }
}

impl<SPI, CS, DC, RST> DisplayPanel for Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    fn width(&self) -> u16 {
        self.config.width
    }

    fn height(&self) -> u16 {
        self.config.height
    }

    async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError> {
        if let Some(rst) = self.rst.as_mut() {
            rst.set_low();
            delay.delay_ms(50).await;
            rst.set_high();
            delay.delay_ms(150).await;
        }

        self.write_command(cmd::SWRESET)?;
        delay.delay_ms(150).await;
        self.write_command(cmd::SLPOUT)?;
        delay.delay_ms(255).await;

        self.write_command(cmd::MADCTL)?;
        self.write_data(&[self.config.orientation.madctl()])?;

        self.write_command(cmd::COLMOD)?;
        self.write_data(&[self.config.color_mode])?;
        delay.delay_ms(10).await;

        self.write_command(cmd::INVON)?;
        delay.delay_ms(10).await;

        self.write_command(cmd::DISPON)?;
        delay.delay_ms(100).await;

        self.fill(0x0000)
    }

    fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), BusError> {
        let x_end = (x + w).saturating_sub(1);
        let y_end = (y + h).saturating_sub(1);

        self.write_command(cmd::CASET)?;
        let [xs_hi, xs_lo] = x.to_be_bytes();
        let [xe_hi, xe_lo] = x_end.to_be_bytes();
        self.write_data(&[xs_hi, xs_lo, xe_hi, xe_lo])?;

        self.write_command(cmd::RASET)?;
        let [ys_hi, ys_lo] = y.to_be_bytes();
        let [ye_hi, ye_lo] = y_end.to_be_bytes();
        self.write_data(&[ys_hi, ys_lo, ye_hi, ye_lo])?;

        self.write_command(cmd::RAMWR)
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), BusError> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        self.set_window(x, y, w, h)?;
        self.stream_color(color, w as u32 * h as u32)
    }

    fn pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), BusError> {
        self.set_window(x, y, 1, 1)?;
        self.write_data(&color.to_be_bytes())
    }

    fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgb565,
        bg: Rgb565,
        scale: u16,
    ) -> Result<(u16, u16), BusError> {
        let scale = scale.max(1);
        let columns = glyph(ch);

        for (col, bits) in columns.iter().enumerate() {
            for row in 0..GLYPH_ROWS {
                // Rows come from the high bit down
                let on = (bits >> (7 - row)) & 0x01 != 0;
                let color = if on { fg } else { bg };
                let px = x + col as u16 * scale;
                let py = y + row as u16 * scale;
                if scale == 1 {
                    self.pixel(px, py, color)?;
                } else {
                    self.fill_rect(px, py, scale, scale, color)?;
                }
            }
        }

        Ok((GLYPH_COLUMNS as u16 * scale, GLYPH_ROWS as u16 * scale))
    }
}
