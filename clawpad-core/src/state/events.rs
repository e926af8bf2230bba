//! Events produced by the button grid

use super::zone::Zone;

/// Edge-triggered button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridEvent {
    /// Idle → Pressed
    Pressed(Zone),
    /// Pressed → Idle
    Released(Zone),
}

impl GridEvent {
    pub fn zone(&self) -> Zone {
        match self {
            GridEvent::Pressed(z) | GridEvent::Released(z) => *z,
        }
    }
}

/// Events from one grid update: at most a release followed by a press
pub type GridEvents = heapless::Vec<GridEvent, 2>;
