//! Long-press shutdown counter
//!
//! Armed when the CLOSE intent is pressed. Every following tick with the
//! intent still held advances the count; reaching the threshold requests
//! shutdown. Releasing CLOSE disarms and zeroes the counter.

/// Tick counter for the CLOSE long-press
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LongPress {
    threshold: u16,
    count: u16,
    armed: bool,
}

impl LongPress {
    pub const fn new(threshold: u16) -> Self {
        Self {
            threshold,
            count: 0,
            armed: false,
        }
    }

    /// Start counting (CLOSE intent pressed)
    pub fn arm(&mut self) {
        self.armed = true;
        self.count = 0;
    }

    /// Stop counting and zero the counter (CLOSE intent released)
    pub fn release(&mut self) {
        self.armed = false;
        self.count = 0;
    }

    /// Advance one tick; returns `true` once the threshold is reached
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.count = self.count.saturating_add(1);
        self.count >= self.threshold
    }

    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
