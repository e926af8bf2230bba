//! Rainbow easter egg
//!
//! Purely cosmetic. A counter clamped to `[0, ceiling]` goes up on every
//! U1 release and down on every D1 release. While it sits at the ceiling,
//! every `period`-th tick (starting with the first) steps the primary
//! colour through a rainbow. Dropping below the ceiling restores the
//! baseline colours and starts the counter and the rainbow over.

use super::zone::Zone;
use crate::ui::colors::{next_rainbow, Rgb565, WHITE};

/// What the loop has to repaint after an easter-egg tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EggUpdate {
    /// Nothing changed
    None,
    /// Repaint with this primary colour
    Advance(Rgb565),
    /// Repaint with the baseline palette
    Restore,
}

/// Easter-egg counters
#[derive(Debug, Clone)]
pub struct EasterEgg {
    ceiling: u8,
    period: u16,
    level: u8,
    saturated_ticks: u16,
    color: Rgb565,
    active: bool,
}

impl EasterEgg {
    pub fn new(ceiling: u8, period: u16) -> Self {
        Self {
            ceiling,
            period: period.max(1),
            level: 0,
            saturated_ticks: 0,
            color: WHITE,
            active: false,
        }
    }

    /// Account for a released momentary button
    pub fn on_release(&mut self, zone: Zone) {
        match zone {
            Zone::U1 => self.level = self.level.saturating_add(1).min(self.ceiling),
            Zone::D1 => self.level = self.level.saturating_sub(1),
            _ => {}
        }
    }

    /// Advance one loop tick
    pub fn tick(&mut self) -> EggUpdate {
        if self.level >= self.ceiling {
            let due = self.saturated_ticks == 0;
            self.saturated_ticks = (self.saturated_ticks + 1) % self.period;
            if due {
                self.color = next_rainbow(self.color);
                self.active = true;
                return EggUpdate::Advance(self.color);
            }
            return EggUpdate::None;
        }

        self.saturated_ticks = 0;
        if self.active {
            self.active = false;
            self.level = 0;
            self.color = WHITE;
            return EggUpdate::Restore;
        }
        EggUpdate::None
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether the rainbow colours are showing
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Back to level 0 without reporting a restore
    pub fn reset(&mut self) {
        self.level = 0;
        self.saturated_ticks = 0;
        self.color = WHITE;
        self.active = false;
    }
}
