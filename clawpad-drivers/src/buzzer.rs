//! Piezo buzzer melodies

use clawpad_core::traits::{Note, Speaker};
use clawpad_hal::ToneOutput;
use embedded_hal_async::delay::DelayNs;

/// Buzzer playing [`Note`] sequences on a tone output
///
/// Each note sounds for its duration, then the output is silenced for the
/// inter-note gap. A zero-frequency note is a rest.
pub struct Buzzer<T, D> {
    tone: T,
    delay: D,
}

impl<T: ToneOutput, D: DelayNs> Buzzer<T, D> {
    pub fn new(mut tone: T, delay: D) -> Self {
        tone.silence();
        Self { tone, delay }
    }
}

impl<T: ToneOutput, D: DelayNs> Speaker for Buzzer<T, D> {
    async fn play(&mut self, melody: &[Note]) {
        for note in melody {
            if note.is_rest() {
                self.tone.silence();
            } else {
                self.tone.set_tone(note.freq_hz);
            }
            self.delay.delay_ms(note.duration_ms()).await;
            self.tone.silence();
            self.delay.delay_ms(Note::GAP_MS).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Step {
        Tone(u32),
        Silence,
        Wait(u32),
    }

    struct Tone(Rc<RefCell<Vec<Step>>>);
    struct Wait(Rc<RefCell<Vec<Step>>>);

    impl ToneOutput for Tone {
        fn set_tone(&mut self, hz: u32) {
            self.0.borrow_mut().push(Step::Tone(hz));
        }

        fn silence(&mut self) {
            self.0.borrow_mut().push(Step::Silence);
        }
    }

    impl DelayNs for Wait {
        async fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Step::Wait(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(Step::Wait(ms));
        }
    }

    fn buzzer() -> (Buzzer<Tone, Wait>, Rc<RefCell<Vec<Step>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let b = Buzzer::new(Tone(log.clone()), Wait(log.clone()));
        log.borrow_mut().clear();
        (b, log)
    }

    #[test]
    fn test_note_then_gap() {
        let (mut b, log) = buzzer();
        block_on(b.play(&[Note::new(392, 1), Note::new(523, 2)]));
        assert_eq!(
            *log.borrow(),
            vec![
                Step::Tone(392),
                Step::Wait(120),
                Step::Silence,
                Step::Wait(50),
                Step::Tone(523),
                Step::Wait(240),
                Step::Silence,
                Step::Wait(50),
            ]
        );
    }

    #[test]
    fn test_rest_is_silent() {
        let (mut b, log) = buzzer();
        block_on(b.play(&[Note::new(0, 1)]));
        assert_eq!(
            *log.borrow(),
            vec![Step::Silence, Step::Wait(120), Step::Silence, Step::Wait(50)]
        );
    }
}
