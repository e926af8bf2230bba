//! SSD1306 OLED status readout
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C, used for short
//! status messages. Text is drawn into a page-organised frame buffer with
//! the 5×8 font in 8×8 cells at arbitrary pixel positions, then the whole
//! buffer is flushed.

use clawpad_core::config::{READOUT_GLYPH_WIDTH, READOUT_WIDTH};
use clawpad_core::traits::Readout;
#[cfg(feature = "defmt")]
use defmt::warn;

use crate::font::{glyph, GLYPH_ROWS};

/// Default I2C address
pub const SSD1306_ADDR: u8 = 0x3C;

const WIDTH: usize = READOUT_WIDTH as usize;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 readout
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C> Ssd1306<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SSD1306_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Run the power-up sequence and blank the panel
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80,
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14,
            cmd::SET_MEMORY_MODE,
            0x02, // Page addressing
            cmd::SET_SEG_REMAP,
            cmd::SET_COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        self.clear_buffer();
        self.flush().await
    }

    async fn command(&mut self, c: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, c]).await
    }

    pub fn clear_buffer(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
    }

    /// Draw `text` with its top-left corner at pixel `(x, y)`
    ///
    /// Glyphs falling off the right or bottom edge are clipped.
    pub fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        let mut cx = x as usize;
        for ch in text.chars() {
            if cx >= WIDTH {
                break;
            }
            for (col, bits) in glyph(ch).iter().enumerate() {
                for row in 0..GLYPH_ROWS {
                    let on = (bits >> row) & 0x01 != 0;
                    self.set_pixel(cx + col, y as usize + row, on);
                }
            }
            cx += READOUT_GLYPH_WIDTH as usize;
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let mask = 1 << (y % 8);
        let cell = &mut self.buffer[y / 8][x];
        if on {
            *cell |= mask;
        } else {
            *cell &= !mask;
        }
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Send the frame buffer to the panel
    pub async fn flush(&mut self) -> Result<(), I2C::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN).await?;
            self.command(cmd::SET_HIGH_COLUMN).await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.address, &data).await?;
        }
        Ok(())
    }
}

impl<I2C> Readout for Ssd1306<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    async fn write(&mut self, text: &str, x: u8, y: u8, clear: bool) {
        if clear {
            self.clear_buffer();
        }
        self.draw_text(text, x, y);
        if self.flush().await.is_err() {
            #[cfg(feature = "defmt")]
            warn!("Readout flush failed");
        }
    }

    async fn clear(&mut self) {
        self.clear_buffer();
        if self.flush().await.is_err() {
            #[cfg(feature = "defmt")]
            warn!("Readout clear failed");
        }
    }
}
