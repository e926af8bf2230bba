//! Screen painting routines
//!
//! Stateless helpers that draw the button grid and the claw toggles on any
//! [`DisplayPanel`]. The caller is responsible for having the bus clocked
//! for display traffic.

use crate::config::{
    CELL_BORDER, CHAR_SPACING, LABEL_SCALE, TOGGLE_BUTTON_HEIGHT, TOGGLE_BUTTON_WIDTH,
    TOGGLE_INSET, TOGGLE_PANEL_HEIGHT, TOGGLE_PANEL_INSET, TOGGLE_PANEL_WIDTH, TOGGLE_TOP,
};
use crate::error::BusError;
use crate::state::{ArmState, Zone};
use crate::traits::display::{text_width, GLYPH_HEIGHT};
use crate::traits::{DisplayPanel, TextStyle};
use crate::ui::colors::{Rgb565, BLACK, GREEN};
use crate::ui::{Palette, Rect};

/// Paint all eight momentary cells as a checkerboard
///
/// With `clear` the whole screen is first filled with the secondary colour.
pub fn draw_grid<D: DisplayPanel + ?Sized>(
    display: &mut D,
    palette: Palette,
    clear: bool,
) -> Result<(), BusError> {
    if clear {
        display.fill(palette.secondary)?;
    }
    for zone in Zone::MOMENTARY {
        let (outer, inner) = idle_colors(zone, palette);
        draw_cell(display, zone, outer, inner)?;
    }
    Ok(())
}

/// Paint one momentary cell with a border and a centred label
pub fn draw_cell<D: DisplayPanel + ?Sized>(
    display: &mut D,
    zone: Zone,
    outer: Rgb565,
    inner: Rgb565,
) -> Result<(), BusError> {
    let cell = zone.rect();
    fill(display, cell, outer)?;
    fill(display, cell.inset(CELL_BORDER), inner)?;
    draw_label(display, cell, zone.label(), TextStyle::new(outer, inner))
}

/// Idle checkerboard colours `(outer, inner)` of a momentary cell
pub fn idle_colors(zone: Zone, palette: Palette) -> (Rgb565, Rgb565) {
    if zone.is_even_cell() {
        (palette.primary, palette.secondary)
    } else {
        (palette.secondary, palette.primary)
    }
}

/// Colours `(outer, inner)` of a momentary cell while it is held
pub fn pressed_colors(zone: Zone) -> (Rgb565, Rgb565) {
    if zone.is_even_cell() {
        (GREEN, BLACK)
    } else {
        (BLACK, GREEN)
    }
}

/// Paint both claw toggles for the given latch value
///
/// The toggle matching the current state is highlighted and shows the
/// state; the other shows the action it would perform.
pub fn draw_toggles<D: DisplayPanel + ?Sized>(
    display: &mut D,
    arm: ArmState,
    palette: Palette,
) -> Result<(), BusError> {
    let (highlighted, plain) = match arm {
        ArmState::Opened => (Zone::Open, Zone::Close),
        ArmState::Closed => (Zone::Close, Zone::Open),
    };
    fill(display, toggle_button(Zone::Close), palette.primary)?;
    fill(display, toggle_button(Zone::Open), palette.primary)?;
    fill(display, toggle_panel(highlighted), palette.secondary)?;
    draw_label(
        display,
        toggle_button(plain),
        toggle_label(plain, false),
        TextStyle::new(palette.secondary, palette.primary),
    )?;
    draw_label(
        display,
        toggle_button(highlighted),
        toggle_label(highlighted, true),
        TextStyle::new(palette.primary, palette.secondary),
    )
}

/// Repaint one toggle in feedback colours
///
/// A highlighted hint paints the inner panel and shows the state word
/// ("Closed"/"Opened"); a plain hint shows the action word.
pub fn draw_toggle_hint<D: DisplayPanel + ?Sized>(
    display: &mut D,
    zone: Zone,
    outer: Rgb565,
    inner: Rgb565,
    highlighted: bool,
) -> Result<(), BusError> {
    let button = toggle_button(zone);
    fill(display, button, outer)?;
    let style = if highlighted {
        fill(display, toggle_panel(zone), inner)?;
        TextStyle::new(outer, inner)
    } else {
        TextStyle::new(inner, outer)
    };
    draw_label(display, button, toggle_label(zone, highlighted), style)
}

/// Painted area of a toggle button
pub fn toggle_button(zone: Zone) -> Rect {
    let x = zone.rect().x + TOGGLE_INSET;
    Rect::new(x, TOGGLE_TOP + TOGGLE_INSET, TOGGLE_BUTTON_WIDTH, TOGGLE_BUTTON_HEIGHT)
}

/// Highlight panel inside a toggle button
pub fn toggle_panel(zone: Zone) -> Rect {
    let x = zone.rect().x + TOGGLE_PANEL_INSET;
    Rect::new(
        x,
        TOGGLE_TOP + TOGGLE_PANEL_INSET,
        TOGGLE_PANEL_WIDTH,
        TOGGLE_PANEL_HEIGHT,
    )
}

fn toggle_label(zone: Zone, state: bool) -> &'static str {
    match (zone, state) {
        (Zone::Close, true) => "Closed",
        (Zone::Open, true) => "Opened",
        _ => zone.label(),
    }
}

fn fill<D: DisplayPanel + ?Sized>(display: &mut D, r: Rect, color: Rgb565) -> Result<(), BusError> {
    display.fill_rect(r.x, r.y, r.w, r.h, color)
}

fn draw_label<D: DisplayPanel + ?Sized>(
    display: &mut D,
    area: Rect,
    label: &str,
    style: TextStyle,
) -> Result<(), BusError> {
    let style = style.scale(LABEL_SCALE).spacing(CHAR_SPACING);
    let w = text_width(label, LABEL_SCALE, CHAR_SPACING);
    let h = GLYPH_HEIGHT * LABEL_SCALE;
    let x = area.x + area.w.saturating_sub(w) / 2;
    let y = area.y + area.h.saturating_sub(h) / 2;
    display.text(label, x, y, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::colors::{RED, WHITE};
    use embedded_hal_async::delay::DelayNs;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(Rect, Rgb565),
        Text(String, u16, u16, Rgb565, Rgb565),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl DisplayPanel for Recorder {
        fn width(&self) -> u16 {
            320
        }

        fn height(&self) -> u16 {
            240
        }

        async fn init<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), BusError> {
            Ok(())
        }

        fn set_window(&mut self, _x: u16, _y: u16, _w: u16, _h: u16) -> Result<(), BusError> {
            Ok(())
        }

        fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), BusError> {
            self.ops.push(Op::Fill(Rect::new(x, y, w, h), color));
            Ok(())
        }

        fn draw_char(
            &mut self,
            _x: u16,
            _y: u16,
            _ch: char,
            _fg: Rgb565,
            _bg: Rgb565,
            scale: u16,
        ) -> Result<(u16, u16), BusError> {
            Ok((5 * scale, 8 * scale))
        }

        fn text(&mut self, s: &str, x: u16, y: u16, style: TextStyle) -> Result<(), BusError> {
            self.ops.push(Op::Text(s.to_string(), x, y, style.fg, style.bg));
            Ok(())
        }
    }

    fn texts(r: &Recorder) -> Vec<&str> {
        r.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(s, ..) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grid_checkerboard() {
        let mut r = Recorder::default();
        draw_grid(&mut r, Palette::BASELINE, true).unwrap();

        assert_eq!(r.ops[0], Op::Fill(Rect::new(0, 0, 320, 240), BLACK));
        // D1 is even: white face, black inset
        assert_eq!(r.ops[1], Op::Fill(Rect::new(0, 0, 80, 80), WHITE));
        assert_eq!(r.ops[2], Op::Fill(Rect::new(5, 5, 70, 70), BLACK));
        // D2 is odd: swapped
        assert_eq!(r.ops[4], Op::Fill(Rect::new(80, 0, 80, 80), BLACK));
        assert_eq!(r.ops[5], Op::Fill(Rect::new(85, 5, 70, 70), WHITE));

        assert_eq!(
            texts(&r),
            vec!["D1", "D2", "D3", "D4", "U1", "U2", "U3", "U4"]
        );
    }

    #[test]
    fn test_grid_without_clear() {
        let mut r = Recorder::default();
        draw_grid(&mut r, Palette::BASELINE, false).unwrap();
        assert_eq!(r.ops.len(), 8 * 3);
    }

    #[test]
    fn test_label_centred() {
        let mut r = Recorder::default();
        draw_cell(&mut r, Zone::U1, BLACK, GREEN).unwrap();
        // "U1" at scale 3 is 31×24 inside an 80×80 cell at (0, 80)
        assert_eq!(r.ops[2], Op::Text("U1".into(), 24, 108, BLACK, GREEN));
    }

    #[test]
    fn test_toggles_opened() {
        let mut r = Recorder::default();
        draw_toggles(&mut r, ArmState::Opened, Palette::BASELINE).unwrap();
        assert_eq!(r.ops[0], Op::Fill(Rect::new(5, 165, 150, 70), WHITE));
        assert_eq!(r.ops[1], Op::Fill(Rect::new(165, 165, 150, 70), WHITE));
        assert_eq!(r.ops[2], Op::Fill(Rect::new(170, 170, 140, 60), BLACK));
        assert_eq!(texts(&r), vec!["Close", "Opened"]);
    }

    #[test]
    fn test_toggles_closed() {
        let mut r = Recorder::default();
        draw_toggles(&mut r, ArmState::Closed, Palette::BASELINE).unwrap();
        assert_eq!(r.ops[2], Op::Fill(Rect::new(10, 170, 140, 60), BLACK));
        assert_eq!(texts(&r), vec!["Open", "Closed"]);
    }

    #[test]
    fn test_noop_hint_is_highlighted() {
        let mut r = Recorder::default();
        draw_toggle_hint(&mut r, Zone::Close, RED, BLACK, true).unwrap();
        assert_eq!(r.ops[0], Op::Fill(Rect::new(5, 165, 150, 70), RED));
        assert_eq!(r.ops[1], Op::Fill(Rect::new(10, 170, 140, 60), BLACK));
        match &r.ops[2] {
            Op::Text(s, _, _, fg, bg) => {
                assert_eq!(s, "Closed");
                assert_eq!((*fg, *bg), (RED, BLACK));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_action_hint_is_plain() {
        let mut r = Recorder::default();
        draw_toggle_hint(&mut r, Zone::Open, GREEN, BLACK, false).unwrap();
        assert_eq!(r.ops.len(), 2);
        assert_eq!(r.ops[0], Op::Fill(Rect::new(165, 165, 150, 70), GREEN));
        match &r.ops[1] {
            Op::Text(s, _, _, fg, bg) => {
                assert_eq!(s, "Open");
                assert_eq!((*fg, *bg), (BLACK, GREEN));
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_press_colors() {
        assert_eq!(pressed_colors(Zone::D1), (GREEN, BLACK));
        assert_eq!(pressed_colors(Zone::D2), (BLACK, GREEN));
        assert_eq!(pressed_colors(Zone::U1), (BLACK, GREEN));
        assert_eq!(idle_colors(Zone::U1, Palette::BASELINE), (BLACK, WHITE));
    }
}
