//! Button zones
//!
//! Ten fixed screen regions: eight momentary pose buttons in a 4×2 grid
//! (`D1..D4` on the top row, `U1..U4` below) and the CLOSE/OPEN claw
//! toggles across the bottom third.

use crate::command::Command;
use crate::config::{CELL_SIZE, SCREEN_HEIGHT, TOGGLE_TOP, TOGGLE_WIDTH};
use crate::state::arm::ClawIntent;
use crate::ui::{Point, Rect};

/// A logical button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    D1,
    D2,
    D3,
    D4,
    U1,
    U2,
    U3,
    U4,
    Close,
    Open,
}

impl Zone {
    /// Hit-test order; the first matching zone wins
    pub const SCAN_ORDER: [Zone; 10] = [
        Zone::D1,
        Zone::D2,
        Zone::D3,
        Zone::D4,
        Zone::U1,
        Zone::U2,
        Zone::U3,
        Zone::U4,
        Zone::Close,
        Zone::Open,
    ];

    /// The eight momentary buttons in grid order
    pub const MOMENTARY: [Zone; 8] = [
        Zone::D1,
        Zone::D2,
        Zone::D3,
        Zone::D4,
        Zone::U1,
        Zone::U2,
        Zone::U3,
        Zone::U4,
    ];

    /// Find the zone containing `p`
    pub fn hit(p: Point) -> Option<Zone> {
        Self::SCAN_ORDER.iter().copied().find(|z| z.rect().contains(p))
    }

    /// Position in [`Zone::SCAN_ORDER`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Touch-sensitive region
    pub const fn rect(self) -> Rect {
        match self.cell() {
            Some((row, col)) => Rect::new(col * CELL_SIZE, row * CELL_SIZE, CELL_SIZE, CELL_SIZE),
            None => {
                let x = if matches!(self, Zone::Close) { 0 } else { TOGGLE_WIDTH };
                Rect::new(x, TOGGLE_TOP, TOGGLE_WIDTH, SCREEN_HEIGHT - TOGGLE_TOP)
            }
        }
    }

    /// `(row, column)` of a momentary button
    pub const fn cell(self) -> Option<(u16, u16)> {
        match self {
            Zone::D1 => Some((0, 0)),
            Zone::D2 => Some((0, 1)),
            Zone::D3 => Some((0, 2)),
            Zone::D4 => Some((0, 3)),
            Zone::U1 => Some((1, 0)),
            Zone::U2 => Some((1, 1)),
            Zone::U3 => Some((1, 2)),
            Zone::U4 => Some((1, 3)),
            Zone::Close | Zone::Open => None,
        }
    }

    pub const fn is_toggle(self) -> bool {
        matches!(self, Zone::Close | Zone::Open)
    }

    /// Whether a momentary cell sits on an even checkerboard square
    pub const fn is_even_cell(self) -> bool {
        match self.cell() {
            Some((row, col)) => (row + col) % 2 == 0,
            None => false,
        }
    }

    /// Command emitted when a momentary button is released
    pub const fn command(self) -> Option<Command> {
        match self {
            Zone::D1 => Some(Command::D1),
            Zone::D2 => Some(Command::D2),
            Zone::D3 => Some(Command::D3),
            Zone::D4 => Some(Command::D4),
            Zone::U1 => Some(Command::U1),
            Zone::U2 => Some(Command::U2),
            Zone::U3 => Some(Command::U3),
            Zone::U4 => Some(Command::U4),
            Zone::Close | Zone::Open => None,
        }
    }

    /// Claw intent of a toggle
    pub const fn intent(self) -> Option<ClawIntent> {
        match self {
            Zone::Close => Some(ClawIntent::Close),
            Zone::Open => Some(ClawIntent::Open),
            _ => None,
        }
    }

    /// Label painted on the button
    pub const fn label(self) -> &'static str {
        match self {
            Zone::D1 => "D1",
            Zone::D2 => "D2",
            Zone::D3 => "D3",
            Zone::D4 => "D4",
            Zone::U1 => "U1",
            Zone::U2 => "U2",
            Zone::U3 => "U3",
            Zone::U4 => "U4",
            Zone::Close => "Close",
            Zone::Open => "Open",
        }
    }
}
