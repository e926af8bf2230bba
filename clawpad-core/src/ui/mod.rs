//! Screen model: colours, geometry and painting routines

pub mod colors;
pub mod painter;

pub use colors::{Palette, Rgb565};

/// A pixel position in logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, half-open on the right and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Check whether `p` lies inside the rectangle
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && (p.x as u32) < self.x as u32 + self.w as u32
            && p.y >= self.y
            && (p.y as u32) < self.y as u32 + self.h as u32
    }

    /// Shrink by `border` pixels on every side
    pub const fn inset(&self, border: u16) -> Self {
        Self {
            x: self.x + border,
            y: self.y + border,
            w: self.w.saturating_sub(2 * border),
            h: self.h.saturating_sub(2 * border),
        }
    }

    pub const fn area(&self) -> u32 {
        self.w as u32 * self.h as u32
    }
}
