//! Button grid debouncing
//!
//! Each zone carries a `pressed` flag. A flag is raised on the first sample
//! that lands inside the zone and lowered on the first sample that no
//! longer does, so holding a finger still yields exactly one press and one
//! release no matter how many ticks it lasts. At most one flag is raised
//! at any time.

use super::events::{GridEvent, GridEvents};
use super::zone::Zone;
use crate::ui::Point;

/// Debounce flags for all ten zones
#[derive(Debug, Clone, Default)]
pub struct ButtonGrid {
    pressed: [bool; 10],
}

impl ButtonGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample: `Some(point)` while touched, `None` once lifted
    ///
    /// A contact that moves onto another zone releases the old zone and
    /// presses the new one in the same update.
    pub fn update(&mut self, contact: Option<Point>) -> GridEvents {
        let mut events = GridEvents::new();
        let hit = contact.and_then(Zone::hit);

        if let Some(held) = self.pressed_zone() {
            if hit == Some(held) {
                return events;
            }
            self.pressed[held.index()] = false;
            let _ = events.push(GridEvent::Released(held));
        }

        if let Some(zone) = hit {
            self.pressed[zone.index()] = true;
            let _ = events.push(GridEvent::Pressed(zone));
        }

        events
    }

    /// Zone whose flag is raised
    pub fn pressed_zone(&self) -> Option<Zone> {
        Zone::SCAN_ORDER
            .iter()
            .copied()
            .find(|z| self.pressed[z.index()])
    }

    pub fn is_pressed(&self, zone: Zone) -> bool {
        self.pressed[zone.index()]
    }

    /// Lower every flag without emitting events
    pub fn reset(&mut self) {
        self.pressed = [false; 10];
    }
}
