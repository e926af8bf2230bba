//! Polling control loop
//!
//! Owns every peripheral and all UI state. One call to [`ControlLoop::tick`]
//! samples the touch panel once, feeds the button grid and acts on the
//! resulting events: repainting, sending commands and running the feedback
//! sequences. [`ControlLoop::run`] wraps ticks in connection supervision
//! and the fixed polling period.
//!
//! Bus discipline: the clock is at touch speed whenever the panel is
//! sampled, and at display speed whenever anything is drawn. Every tick
//! ends at touch speed.

#[cfg(feature = "defmt")]
use defmt::{debug, info, warn};
use embedded_hal_async::delay::DelayNs;

use crate::bus::BusArbiter;
use crate::command::Command;
use crate::config::{ControlConfig, READOUT_DETAIL_ROW, READOUT_TITLE_ROW};
use crate::error::{ControlError, LinkError};
use crate::state::{
    ArmState, ButtonGrid, ClawIntent, EasterEgg, EggUpdate, GridEvent, GridEvents, LongPress,
    Zone,
};
use crate::traits::{
    BusClock, DisplayPanel, Indicator, Link, LinkStatus, Note, Readout, Speaker, TouchPanel,
};
use crate::ui::colors::{BLACK, GREEN, RED};
use crate::ui::{painter, Palette, Point};

/// Played once the link first comes up
pub const CONNECT_CHIME: [Note; 3] = [Note::new(392, 1), Note::new(415, 1), Note::new(440, 1)];

/// Played on long-press shutdown
pub const FAREWELL: [Note; 4] = [
    Note::new(392, 1),
    Note::new(369, 1),
    Note::new(392, 1),
    Note::new(523, 2),
];

/// Indicator colours
pub const LED_LINKED: (u8, u8, u8) = (0, 0, 50);
pub const LED_UNLINKED: (u8, u8, u8) = (50, 0, 0);
pub const LED_MOVING: (u8, u8, u8) = (100, 100, 0);

/// Readout column of a sent command's label
const POSE_LABEL_X: u8 = 50;
const CLAW_LABEL_X: u8 = 40;

/// Everything the loop drives
pub struct Parts<D, T, C, L, I, S, R, W> {
    pub display: D,
    pub touch: T,
    pub clock: C,
    pub link: L,
    pub indicator: I,
    pub speaker: S,
    pub readout: R,
    pub delay: W,
}

/// Whether the loop keeps going after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    Continue,
    /// Long-press shutdown ran; no further ticks
    Shutdown,
}

/// Fate of a command the loop tried to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Emission {
    Sent(Command),
    /// Dropped without retry
    Rejected(Command, LinkError),
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub events: GridEvents,
    pub emission: Option<Emission>,
}

impl TickReport {
    fn new() -> Self {
        Self {
            outcome: TickOutcome::Continue,
            events: GridEvents::new(),
            emission: None,
        }
    }
}

/// Touch-driven button state machine
pub struct ControlLoop<D, T, C, L, I, S, R, W> {
    display: D,
    touch: T,
    bus: BusArbiter<C>,
    link: L,
    indicator: I,
    speaker: S,
    readout: R,
    delay: W,
    config: ControlConfig,
    grid: ButtonGrid,
    arm: ArmState,
    long_press: LongPress,
    egg: EasterEgg,
    palette: Palette,
    /// Screen position latched on touch-down, held until lift-off
    contact: Option<Point>,
    announced: bool,
    started: bool,
    finished: bool,
}

impl<D, T, C, L, I, S, R, W> ControlLoop<D, T, C, L, I, S, R, W>
where
    D: DisplayPanel,
    T: TouchPanel,
    C: BusClock,
    L: Link,
    I: Indicator,
    S: Speaker,
    R: Readout,
    W: DelayNs,
{
    /// Validate the configuration and take ownership of the peripherals
    pub fn new(
        parts: Parts<D, T, C, L, I, S, R, W>,
        config: ControlConfig,
    ) -> Result<Self, ControlError> {
        config.calibration.validate()?;

        let mut touch = parts.touch;
        touch.set_calibration(config.calibration);

        Ok(Self {
            display: parts.display,
            touch,
            bus: BusArbiter::new(parts.clock, config.touch_bus_hz, config.display_bus_hz),
            link: parts.link,
            indicator: parts.indicator,
            speaker: parts.speaker,
            readout: parts.readout,
            delay: parts.delay,
            grid: ButtonGrid::new(),
            arm: ArmState::Opened,
            long_press: LongPress::new(config.long_press_ticks),
            egg: EasterEgg::new(config.easter_egg_ceiling, config.easter_egg_period),
            palette: Palette::BASELINE,
            contact: None,
            announced: false,
            started: false,
            finished: false,
            config,
        })
    }

    /// Supervise the link and poll until long-press shutdown
    pub async fn run(&mut self) -> Result<(), ControlError> {
        while !self.finished {
            if self.link.is_connected() {
                if !self.started {
                    self.start().await?;
                }
                self.tick().await?;
            } else {
                self.connect_link().await;
            }
            if !self.finished {
                self.delay.delay_ms(self.config.poll_period_ms).await;
            }
        }
        Ok(())
    }

    /// One connection attempt with readout and indicator feedback
    pub async fn connect_link(&mut self) -> LinkStatus {
        if self.started {
            self.announce("Reconnecting", "BLE...").await;
            self.set_indicator(LED_UNLINKED);
        } else if !self.announced {
            self.announced = true;
            self.announce("Connecting", "BLE...").await;
            self.set_indicator(LED_UNLINKED);
        }

        let status = self.link.connect().await;
        match status {
            LinkStatus::Connected => {
                #[cfg(feature = "defmt")]
                info!("Link connected");
            }
            LinkStatus::TimedOut | LinkStatus::Failed => {
                #[cfg(feature = "defmt")]
                warn!("Link connect attempt: {}", status);
            }
        }
        status
    }

    /// Bring up the display, home the arm and reset all UI state
    pub async fn start(&mut self) -> Result<(), ControlError> {
        #[cfg(feature = "defmt")]
        info!("Starting control loop");

        self.set_indicator(LED_LINKED);
        self.speaker.play(&CONNECT_CHIME).await;
        self.announce("BLE connected!", "Initializing").await;

        self.bus.for_display()?;
        self.display.init(&mut self.delay).await?;
        painter::draw_grid(&mut self.display, Palette::BASELINE, true)?;
        painter::draw_toggles(&mut self.display, ArmState::Opened, Palette::BASELINE)?;
        self.bus.for_touch()?;

        self.delay.delay_ms(self.config.startup_settle_ms).await;
        self.emit(Command::U1, false).await;
        self.delay.delay_ms(self.config.homing_gap_ms).await;
        self.emit(Command::OpenClaw, false).await;

        self.arm = ArmState::Opened;
        self.grid.reset();
        self.long_press.release();
        self.egg.reset();
        self.palette = Palette::BASELINE;
        self.contact = None;

        self.announce("Initialized", "successfully").await;
        self.started = true;
        Ok(())
    }

    /// Sample the touch panel once and act on the result
    pub async fn tick(&mut self) -> Result<TickReport, ControlError> {
        let mut report = TickReport::new();

        self.bus.for_touch()?;
        if self.touch.is_touched()? {
            if self.long_press.tick() {
                self.shutdown().await?;
                report.outcome = TickOutcome::Shutdown;
                return Ok(report);
            }
            if self.contact.is_none() {
                let sample = self.touch.read()?;
                self.contact = Some(sample.to_screen(self.display.width(), self.display.height()));
            }
        } else {
            self.contact = None;
        }

        report.events = self.grid.update(self.contact);
        for event in report.events.iter().copied() {
            let emission = match event {
                GridEvent::Pressed(zone) => {
                    self.on_press(zone)?;
                    None
                }
                GridEvent::Released(zone) => self.on_release(zone).await?,
            };
            if emission.is_some() {
                report.emission = emission;
            }
        }

        self.update_easter_egg()?;
        self.bus.for_touch()?;
        Ok(report)
    }

    /// Farewell sequence; the loop stops afterwards
    pub async fn shutdown(&mut self) -> Result<(), ControlError> {
        #[cfg(feature = "defmt")]
        info!("Long press: shutting down");

        self.announce("Disconnecting", "and exiting").await;
        self.speaker.play(&FAREWELL).await;
        self.bus.for_display()?;
        self.display.fill(BLACK)?;
        self.bus.for_touch()?;
        self.link.disconnect().await;
        self.indicator.off();
        self.readout.clear().await;
        self.finished = true;
        Ok(())
    }

    fn on_press(&mut self, zone: Zone) -> Result<(), ControlError> {
        #[cfg(feature = "defmt")]
        debug!("{} pressed", zone);

        self.bus.for_display()?;
        match zone.intent() {
            None => {
                let (outer, inner) = painter::pressed_colors(zone);
                painter::draw_cell(&mut self.display, zone, outer, inner)?;
            }
            Some(intent) => {
                if intent == ClawIntent::Close {
                    self.long_press.arm();
                }
                let noop = self.arm.is_noop(intent);
                let outer = if noop { RED } else { GREEN };
                painter::draw_toggle_hint(&mut self.display, zone, outer, BLACK, noop)?;
            }
        }
        Ok(())
    }

    async fn on_release(&mut self, zone: Zone) -> Result<Option<Emission>, ControlError> {
        #[cfg(feature = "defmt")]
        debug!("{} released", zone);

        self.bus.for_display()?;

        if let Some(command) = zone.command() {
            let (outer, inner) = painter::idle_colors(zone, self.palette);
            painter::draw_cell(&mut self.display, zone, outer, inner)?;
            self.egg.on_release(zone);
            return Ok(Some(self.deliver(command).await));
        }

        let Some(intent) = zone.intent() else {
            return Ok(None);
        };
        if intent == ClawIntent::Close {
            self.long_press.release();
        }

        match self.arm.transition(intent) {
            Some(next) => {
                painter::draw_toggles(&mut self.display, next, self.palette)?;
                self.arm = next;
                Ok(Some(self.deliver(intent.command()).await))
            }
            None => {
                let palette = self.palette;
                painter::draw_toggle_hint(
                    &mut self.display,
                    zone,
                    palette.primary,
                    palette.secondary,
                    true,
                )?;
                self.announce("Claw was", self.arm.describe()).await;
                Ok(None)
            }
        }
    }

    /// Visual settle, send, then wait for the arm to move
    async fn deliver(&mut self, command: Command) -> Emission {
        self.delay.delay_ms(self.config.visual_settle_ms).await;
        let emission = self.emit(command, true).await;
        self.movement_wait().await;
        emission
    }

    async fn emit(&mut self, command: Command, announce: bool) -> Emission {
        if !self.link.is_connected() {
            #[cfg(feature = "defmt")]
            warn!("Command {} dropped: link down", command);
            return Emission::Rejected(command, LinkError::NotConnected);
        }

        match self.link.send(command).await {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                info!("Command '{}' sent", command.as_char());
                if announce {
                    let x = if command.is_claw() {
                        CLAW_LABEL_X
                    } else {
                        POSE_LABEL_X
                    };
                    self.readout
                        .write_centered("Command sent:", READOUT_TITLE_ROW, true)
                        .await;
                    self.readout
                        .write(command.label(), x, READOUT_DETAIL_ROW, false)
                        .await;
                }
                Emission::Sent(command)
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                warn!("Command {} failed: {}", command, err);
                Emission::Rejected(command, err)
            }
        }
    }

    async fn movement_wait(&mut self) {
        self.set_indicator(LED_MOVING);
        self.delay.delay_ms(self.config.movement_wait_ms).await;
        self.set_indicator(LED_LINKED);
    }

    fn update_easter_egg(&mut self) -> Result<(), ControlError> {
        let palette = match self.egg.tick() {
            EggUpdate::None => return Ok(()),
            EggUpdate::Advance(color) => Palette::with_primary(color),
            EggUpdate::Restore => Palette::BASELINE,
        };
        self.palette = palette;
        self.bus.for_display()?;
        painter::draw_grid(&mut self.display, palette, false)?;
        painter::draw_toggles(&mut self.display, self.arm, palette)?;
        Ok(())
    }

    async fn announce(&mut self, title: &str, detail: &str) {
        self.readout
            .write_centered(title, READOUT_TITLE_ROW, true)
            .await;
        self.readout
            .write_centered(detail, READOUT_DETAIL_ROW, false)
            .await;
    }

    fn set_indicator(&mut self, (r, g, b): (u8, u8, u8)) {
        self.indicator.set_color(r, g, b);
    }

    pub fn arm_state(&self) -> ArmState {
        self.arm
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn grid(&self) -> &ButtonGrid {
        &self.grid
    }

    pub fn long_press(&self) -> &LongPress {
        &self.long_press
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Calibration, DISPLAY_BUS_HZ, TOUCH_BUS_HZ};
    use crate::error::{BusError, CalibrationError};
    use crate::traits::{TextStyle, TouchSample};
    use crate::ui::Rgb565;
    use embassy_futures::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init,
        Fill(u16, u16, u16, u16, Rgb565),
        Text(String),
        Sent(char),
        Led(u8, u8, u8),
        Play(usize),
        Readout(String),
        ReadoutClear,
        Delay(u32),
        Disconnect,
    }

    #[derive(Default)]
    struct Trace {
        speed: u32,
        calls: Vec<Call>,
        finger: Option<Point>,
        script: VecDeque<Option<Point>>,
        connected: bool,
        connects: VecDeque<LinkStatus>,
        fail_sends: bool,
        calibration: Option<Calibration>,
    }

    type Shared = Rc<RefCell<Trace>>;

    struct MockDisplay(Shared);
    struct MockTouch(Shared);
    struct MockClock(Shared);
    struct MockLink(Shared);
    struct MockIndicator(Shared);
    struct MockSpeaker(Shared);
    struct MockReadout(Shared);
    struct MockDelay(Shared);

    impl MockDisplay {
        fn record(&self, call: Call) {
            let mut t = self.0.borrow_mut();
            assert_eq!(t.speed, DISPLAY_BUS_HZ, "display traffic at touch speed");
            t.calls.push(call);
        }
    }

    impl DisplayPanel for MockDisplay {
        fn width(&self) -> u16 {
            320
        }

        fn height(&self) -> u16 {
            240
        }

        async fn init<DL: DelayNs>(&mut self, _delay: &mut DL) -> Result<(), BusError> {
            self.record(Call::Init);
            Ok(())
        }

        fn set_window(&mut self, _x: u16, _y: u16, _w: u16, _h: u16) -> Result<(), BusError> {
            Ok(())
        }

        fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> Result<(), BusError> {
            self.record(Call::Fill(x, y, w, h, color));
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

        fn text(&mut self, s: &str, _x: u16, _y: u16, _style: TextStyle) -> Result<(), BusError> {
            self.record(Call::Text(s.to_string()));
            Ok(())
        }
    }

    impl MockTouch {
        fn sample(&self) -> TouchSample {
            let t = self.0.borrow();
            assert_eq!(t.speed, TOUCH_BUS_HZ, "touch read at display speed");
            let p = t.finger.unwrap_or(Point::new(0, 0));
            // Inverse of the rotated mapping, aimed at the pixel centre
            TouchSample {
                x: (p.y as f32 + 0.5) / 240.0,
                y: (p.x as f32 + 0.5) / 320.0,
                pressure: if t.finger.is_some() { 400 } else { 0 },
            }
        }
    }

    impl TouchPanel for MockTouch {
        fn read(&mut self) -> Result<TouchSample, BusError> {
            Ok(self.sample())
        }

        fn is_touched(&mut self) -> Result<bool, BusError> {
            let mut t = self.0.borrow_mut();
            assert_eq!(t.speed, TOUCH_BUS_HZ, "touch poll at display speed");
            if let Some(next) = t.script.pop_front() {
                t.finger = next;
            }
            Ok(t.finger.is_some())
        }

        fn set_calibration(&mut self, calibration: Calibration) {
            self.0.borrow_mut().calibration = Some(calibration);
        }

        fn calibration(&self) -> Calibration {
            self.0.borrow().calibration.unwrap_or_default()
        }
    }

    impl BusClock for MockClock {
        fn set_frequency(&mut self, hz: u32) -> Result<(), BusError> {
            self.0.borrow_mut().speed = hz;
            Ok(())
        }
    }

    impl Link for MockLink {
        fn is_connected(&self) -> bool {
            self.0.borrow().connected
        }

        async fn connect(&mut self) -> LinkStatus {
            let mut t = self.0.borrow_mut();
            let status = t.connects.pop_front().unwrap_or(LinkStatus::TimedOut);
            t.connected = status == LinkStatus::Connected;
            status
        }

        async fn send(&mut self, command: Command) -> Result<(), LinkError> {
            let mut t = self.0.borrow_mut();
            if t.fail_sends {
                return Err(LinkError::Write);
            }
            t.calls.push(Call::Sent(command.as_char()));
            Ok(())
        }

        async fn disconnect(&mut self) {
            let mut t = self.0.borrow_mut();
            t.connected = false;
            t.calls.push(Call::Disconnect);
        }
    }

    impl Indicator for MockIndicator {
        fn set_color(&mut self, r: u8, g: u8, b: u8) {
            self.0.borrow_mut().calls.push(Call::Led(r, g, b));
        }
    }

    impl Speaker for MockSpeaker {
        async fn play(&mut self, melody: &[Note]) {
            self.0.borrow_mut().calls.push(Call::Play(melody.len()));
        }
    }

    impl Readout for MockReadout {
        async fn write(&mut self, text: &str, _x: u8, _y: u8, _clear: bool) {
            self.0.borrow_mut().calls.push(Call::Readout(text.to_string()));
        }

        async fn clear(&mut self) {
            self.0.borrow_mut().calls.push(Call::ReadoutClear);
        }
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().calls.push(Call::Delay(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().calls.push(Call::Delay(ms));
        }
    }

    type TestLoop = ControlLoop<
        MockDisplay,
        MockTouch,
        MockClock,
        MockLink,
        MockIndicator,
        MockSpeaker,
        MockReadout,
        MockDelay,
    >;

    fn parts(
        shared: &Shared,
    ) -> Parts<
        MockDisplay,
        MockTouch,
        MockClock,
        MockLink,
        MockIndicator,
        MockSpeaker,
        MockReadout,
        MockDelay,
    > {
        Parts {
            display: MockDisplay(shared.clone()),
            touch: MockTouch(shared.clone()),
            clock: MockClock(shared.clone()),
            link: MockLink(shared.clone()),
            indicator: MockIndicator(shared.clone()),
            speaker: MockSpeaker(shared.clone()),
            readout: MockReadout(shared.clone()),
            delay: MockDelay(shared.clone()),
        }
    }

    /// A started loop with a connected link and an empty call log
    fn rig() -> (TestLoop, Shared) {
        let shared: Shared = Rc::new(RefCell::new(Trace {
            connected: true,
            ..Default::default()
        }));
        let mut ctl = ControlLoop::new(parts(&shared), ControlConfig::default()).unwrap();
        block_on(ctl.start()).unwrap();
        shared.borrow_mut().calls.clear();
        (ctl, shared)
    }

    fn touch(shared: &Shared, x: u16, y: u16) {
        shared.borrow_mut().finger = Some(Point::new(x, y));
    }

    fn lift(shared: &Shared) {
        shared.borrow_mut().finger = None;
    }

    fn tick(ctl: &mut TestLoop, shared: &Shared) -> TickReport {
        let report = block_on(ctl.tick()).unwrap();
        assert_eq!(shared.borrow().speed, TOUCH_BUS_HZ, "tick ended at display speed");
        report
    }

    fn sent(shared: &Shared) -> Vec<char> {
        shared
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Sent(ch) => Some(*ch),
                _ => None,
            })
            .collect()
    }

    fn readouts(shared: &Shared) -> Vec<String> {
        shared
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Readout(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Press and release at a pixel, holding for `hold` ticks
    fn tap(ctl: &mut TestLoop, shared: &Shared, x: u16, y: u16, hold: usize) -> Vec<TickReport> {
        let mut reports = Vec::new();
        touch(shared, x, y);
        for _ in 0..hold {
            reports.push(tick(ctl, shared));
        }
        lift(shared);
        reports.push(tick(ctl, shared));
        reports
    }

    #[test]
    fn test_degenerate_calibration_rejected() {
        let shared: Shared = Rc::default();
        let config = ControlConfig {
            calibration: Calibration::raw(10, 10, 0, 4095),
            ..Default::default()
        };
        let result = ControlLoop::new(parts(&shared), config);
        assert!(matches!(
            result,
            Err(ControlError::Calibration(CalibrationError::DegenerateX))
        ));
    }

    #[test]
    fn test_calibration_applied_to_touch() {
        let shared: Shared = Rc::default();
        let _ctl = ControlLoop::new(parts(&shared), ControlConfig::default()).unwrap();
        assert_eq!(
            shared.borrow().calibration,
            Some(Calibration::raw(1880, 150, 270, 1830))
        );
    }

    #[test]
    fn test_start_sequence() {
        let shared: Shared = Rc::new(RefCell::new(Trace {
            connected: true,
            ..Default::default()
        }));
        let mut ctl = ControlLoop::new(parts(&shared), ControlConfig::default()).unwrap();
        block_on(ctl.start()).unwrap();

        assert!(ctl.is_started());
        assert_eq!(ctl.arm_state(), ArmState::Opened);
        assert_eq!(sent(&shared), vec!['4', '9']);

        let t = shared.borrow();
        assert_eq!(t.calls[0], Call::Led(0, 0, 50));
        assert_eq!(t.calls[1], Call::Play(3));
        assert!(t.calls.contains(&Call::Init));
        assert!(t.calls.contains(&Call::Fill(0, 0, 320, 240, BLACK)));
        assert!(t.calls.contains(&Call::Text("Opened".into())));

        // Start-up commands are silent
        let lines = t
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Readout(s) if s == "Command sent:"))
            .count();
        assert_eq!(lines, 0);

        let delays: Vec<u32> = t
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Delay(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        assert_eq!(delays, vec![2000, 500]);
        assert_eq!(t.speed, TOUCH_BUS_HZ);
    }

    #[test]
    fn test_tap_d1_sends_zero() {
        let (mut ctl, shared) = rig();
        let reports = tap(&mut ctl, &shared, 40, 40, 1);

        assert_eq!(reports[0].events.as_slice(), &[GridEvent::Pressed(Zone::D1)]);
        assert_eq!(reports[1].events.as_slice(), &[GridEvent::Released(Zone::D1)]);
        assert_eq!(reports[1].emission, Some(Emission::Sent(Command::D1)));
        assert_eq!(sent(&shared), vec!['0']);

        let t = shared.borrow();
        // Press repaint is green, release repaint restores the idle face
        assert!(t.calls.contains(&Call::Fill(0, 0, 80, 80, GREEN)));
        assert!(t.calls.contains(&Call::Fill(0, 0, 80, 80, Palette::BASELINE.primary)));
    }

    #[test]
    fn test_release_feedback_order() {
        let (mut ctl, shared) = rig();
        tap(&mut ctl, &shared, 120, 100, 1);

        let t = shared.borrow();
        let pos = |needle: &Call| t.calls.iter().position(|c| c == needle).unwrap();
        let settle = pos(&Call::Delay(500));
        let send = pos(&Call::Sent('5'));
        let moving = pos(&Call::Led(100, 100, 0));
        let wait = pos(&Call::Delay(1000));
        let linked = t.calls.iter().rposition(|c| *c == Call::Led(0, 0, 50)).unwrap();
        assert!(settle < send && send < moving && moving < wait && wait < linked);
        assert!(readouts_contain(&t.calls, "Command sent:"));
        assert!(readouts_contain(&t.calls, "U2"));
    }

    fn readouts_contain(calls: &[Call], text: &str) -> bool {
        calls.iter().any(|c| matches!(c, Call::Readout(s) if s == text))
    }

    #[test]
    fn test_hold_emits_once() {
        let (mut ctl, shared) = rig();
        let reports = tap(&mut ctl, &shared, 250, 20, 30);

        let presses = reports
            .iter()
            .flat_map(|r| r.events.iter())
            .filter(|e| matches!(e, GridEvent::Pressed(_)))
            .count();
        assert_eq!(presses, 1);
        assert_eq!(sent(&shared), vec!['3']);

        // Further idle ticks do nothing
        let idle = tick(&mut ctl, &shared);
        assert!(idle.events.is_empty());
        assert_eq!(sent(&shared), vec!['3']);
    }

    #[test]
    fn test_all_momentary_zones() {
        let (mut ctl, shared) = rig();
        for (i, zone) in Zone::MOMENTARY.iter().enumerate() {
            let r = zone.rect();
            tap(&mut ctl, &shared, r.x + 10, r.y + 10, 2);
            assert_eq!(sent(&shared).last(), Some(&((b'0' + i as u8) as char)));
        }
    }

    #[test]
    fn test_close_then_open() {
        let (mut ctl, shared) = rig();

        let reports = tap(&mut ctl, &shared, 40, 200, 1);
        assert_eq!(reports[1].emission, Some(Emission::Sent(Command::CloseClaw)));
        assert_eq!(ctl.arm_state(), ArmState::Closed);

        let reports = tap(&mut ctl, &shared, 200, 200, 1);
        assert_eq!(reports[1].emission, Some(Emission::Sent(Command::OpenClaw)));
        assert_eq!(ctl.arm_state(), ArmState::Opened);
        assert_eq!(sent(&shared), vec!['8', '9']);
    }

    #[test]
    fn test_press_hint_colors() {
        let (mut ctl, shared) = rig();

        // CLOSE while opened would change state: green hint
        touch(&shared, 40, 200);
        tick(&mut ctl, &shared);
        assert!(shared.borrow().calls.contains(&Call::Fill(5, 165, 150, 70, GREEN)));
        lift(&shared);
        tick(&mut ctl, &shared);

        // CLOSE while closed is a no-op: red hint with the state word
        shared.borrow_mut().calls.clear();
        touch(&shared, 40, 200);
        tick(&mut ctl, &shared);
        let t = shared.borrow();
        assert!(t.calls.contains(&Call::Fill(5, 165, 150, 70, RED)));
        assert!(t.calls.contains(&Call::Text("Closed".into())));
    }

    #[test]
    fn test_close_while_closed_sends_nothing() {
        let (mut ctl, shared) = rig();
        tap(&mut ctl, &shared, 40, 200, 1);
        assert_eq!(sent(&shared), vec!['8']);

        shared.borrow_mut().calls.clear();
        let reports = tap(&mut ctl, &shared, 40, 200, 3);
        assert!(reports.iter().all(|r| r.emission.is_none()));
        assert!(sent(&shared).is_empty());
        assert_eq!(ctl.arm_state(), ArmState::Closed);
        assert_eq!(readouts(&shared), vec!["Claw was", "closed"]);
    }

    #[test]
    fn test_open_while_opened_sends_nothing() {
        let (mut ctl, shared) = rig();
        tap(&mut ctl, &shared, 300, 230, 1);
        assert!(sent(&shared).is_empty());
        assert_eq!(readouts(&shared), vec!["Claw was", "opened"]);
        assert_eq!(ctl.arm_state(), ArmState::Opened);
    }

    #[test]
    fn test_long_press_fires_on_tick_200() {
        let (mut ctl, shared) = rig();
        touch(&shared, 40, 200);
        let first = tick(&mut ctl, &shared);
        assert_eq!(first.events.as_slice(), &[GridEvent::Pressed(Zone::Close)]);

        for _ in 0..199 {
            assert_eq!(tick(&mut ctl, &shared).outcome, TickOutcome::Continue);
        }
        assert_eq!(ctl.long_press().count(), 199);

        let last = tick(&mut ctl, &shared);
        assert_eq!(last.outcome, TickOutcome::Shutdown);
        assert!(ctl.is_finished());

        let t = shared.borrow();
        assert!(t.calls.contains(&Call::Play(4)));
        assert!(t.calls.contains(&Call::Disconnect));
        assert!(t.calls.contains(&Call::Led(0, 0, 0)));
        assert_eq!(t.calls.last(), Some(&Call::ReadoutClear));
        assert!(!t.calls.contains(&Call::Sent('8')));
    }

    #[test]
    fn test_release_before_threshold_resets_counter() {
        let (mut ctl, shared) = rig();
        let reports = tap(&mut ctl, &shared, 40, 200, 200);
        assert!(reports.iter().all(|r| r.outcome == TickOutcome::Continue));
        assert_eq!(ctl.long_press().count(), 0);
        assert_eq!(sent(&shared), vec!['8']);

        // A new press cycle starts from zero
        let reports = tap(&mut ctl, &shared, 40, 200, 200);
        assert!(reports.iter().all(|r| r.outcome == TickOutcome::Continue));
    }

    #[test]
    fn test_long_press_only_counts_close() {
        let (mut ctl, shared) = rig();
        let reports = tap(&mut ctl, &shared, 200, 200, 300);
        assert!(reports.iter().all(|r| r.outcome == TickOutcome::Continue));
        assert_eq!(ctl.long_press().count(), 0);
    }

    #[test]
    fn test_command_rejected_when_disconnected() {
        let (mut ctl, shared) = rig();
        touch(&shared, 40, 40);
        tick(&mut ctl, &shared);
        shared.borrow_mut().connected = false;
        lift(&shared);
        let report = tick(&mut ctl, &shared);

        assert_eq!(
            report.emission,
            Some(Emission::Rejected(Command::D1, LinkError::NotConnected))
        );
        assert!(sent(&shared).is_empty());
        // Feedback still completes
        assert!(shared.borrow().calls.contains(&Call::Led(100, 100, 0)));
    }

    #[test]
    fn test_send_failure_reported() {
        let (mut ctl, shared) = rig();
        shared.borrow_mut().fail_sends = true;
        let reports = tap(&mut ctl, &shared, 40, 200, 1);
        assert_eq!(
            reports[1].emission,
            Some(Emission::Rejected(Command::CloseClaw, LinkError::Write))
        );
        // The latch still follows the user's intent
        assert_eq!(ctl.arm_state(), ArmState::Closed);
    }

    #[test]
    fn test_coordinates_latched_on_touch_down() {
        let (mut ctl, shared) = rig();
        touch(&shared, 40, 40);
        tick(&mut ctl, &shared);
        // Finger drifts into D2 while held: still D1
        touch(&shared, 120, 40);
        let report = tick(&mut ctl, &shared);
        assert!(report.events.is_empty());
        assert!(ctl.grid().is_pressed(Zone::D1));
        lift(&shared);
        tick(&mut ctl, &shared);
        assert_eq!(sent(&shared), vec!['0']);
    }

    #[test]
    fn test_idle_tick_leaves_display_alone() {
        let (mut ctl, shared) = rig();
        let report = tick(&mut ctl, &shared);
        assert!(report.events.is_empty());
        assert!(shared.borrow().calls.is_empty());
    }

    #[test]
    fn test_easter_egg_cycle() {
        let (mut ctl, shared) = rig();
        for _ in 0..3 {
            tap(&mut ctl, &shared, 40, 120, 1);
        }
        // The third release saturates the counter in the same tick
        assert_eq!(ctl.palette(), Palette::with_primary(0x000A));

        tap(&mut ctl, &shared, 40, 40, 1);
        assert_eq!(ctl.palette(), Palette::BASELINE);
        // Commands are unaffected
        assert_eq!(sent(&shared), vec!['4', '4', '4', '0']);
    }

    #[test]
    fn test_easter_egg_restore_starts_over() {
        let (mut ctl, shared) = rig();
        for _ in 0..3 {
            tap(&mut ctl, &shared, 40, 120, 1);
        }
        tap(&mut ctl, &shared, 40, 40, 1);
        assert_eq!(ctl.palette(), Palette::BASELINE);

        // One U1 is no longer enough to re-enter the rainbow
        tap(&mut ctl, &shared, 40, 120, 1);
        assert_eq!(ctl.palette(), Palette::BASELINE);
        tap(&mut ctl, &shared, 40, 120, 1);
        assert_eq!(ctl.palette(), Palette::BASELINE);
        tap(&mut ctl, &shared, 40, 120, 1);
        assert_eq!(ctl.palette(), Palette::with_primary(0x000A));
    }

    #[test]
    fn test_easter_egg_period() {
        let (mut ctl, shared) = rig();
        for _ in 0..3 {
            tap(&mut ctl, &shared, 40, 120, 1);
        }
        for _ in 0..99 {
            tick(&mut ctl, &shared);
        }
        assert_eq!(ctl.palette().primary, 0x000A);
        tick(&mut ctl, &shared);
        assert_eq!(ctl.palette().primary, 0x0014);
    }

    #[test]
    fn test_run_connects_then_shuts_down() {
        let shared: Shared = Rc::default();
        {
            let mut t = shared.borrow_mut();
            t.connects = VecDeque::from(vec![LinkStatus::TimedOut, LinkStatus::Failed, LinkStatus::Connected]);
            // Idle for a while, then hold CLOSE until shutdown
            t.script.extend(std::iter::repeat(None).take(5));
            t.script.push_back(Some(Point::new(40, 200)));
        }
        let mut ctl = ControlLoop::new(parts(&shared), ControlConfig::default()).unwrap();
        block_on(ctl.run()).unwrap();

        assert!(ctl.is_finished());
        let lines = readouts(&shared);
        assert_eq!(lines.iter().filter(|s| *s == "Connecting").count(), 1);
        assert_eq!(lines.iter().filter(|s| *s == "Reconnecting").count(), 0);
        assert!(lines.contains(&"Disconnecting".to_string()));
        assert_eq!(sent(&shared), vec!['4', '9']);
    }

    #[test]
    fn test_reconnect_announcement() {
        let (mut ctl, shared) = rig();
        shared.borrow_mut().connected = false;
        let status = block_on(ctl.connect_link());
        assert_eq!(status, LinkStatus::TimedOut);
        assert_eq!(readouts(&shared), vec!["Reconnecting", "BLE..."]);
        assert!(shared.borrow().calls.contains(&Call::Led(50, 0, 0)));
    }
}
