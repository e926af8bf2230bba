//! Claw latch
//!
//! The OPEN/CLOSE buttons are intents, not the claw state itself. An intent
//! only changes the latch (and produces a command) when it contradicts the
//! current value.

use crate::command::Command;

/// Last commanded claw position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmState {
    /// Claw open; the start-up sequence leaves it here
    #[default]
    Opened,
    Closed,
}

/// Provisional claw action held while a toggle is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClawIntent {
    Close,
    Open,
}

impl ClawIntent {
    /// State the intent asks for
    pub const fn target(self) -> ArmState {
        match self {
            ClawIntent::Close => ArmState::Closed,
            ClawIntent::Open => ArmState::Opened,
        }
    }

    pub const fn command(self) -> Command {
        match self {
            ClawIntent::Close => Command::CloseClaw,
            ClawIntent::Open => Command::OpenClaw,
        }
    }
}

impl ArmState {
    /// Whether resolving `intent` would leave the latch unchanged
    pub fn is_noop(self, intent: ClawIntent) -> bool {
        self == intent.target()
    }

    /// Resolve an intent; `None` means the claw is already there
    pub fn transition(self, intent: ClawIntent) -> Option<ArmState> {
        if self.is_noop(intent) {
            None
        } else {
            Some(intent.target())
        }
    }

    /// Lower-case word used in "Claw was ..." messages
    pub const fn describe(self) -> &'static str {
        match self {
            ArmState::Opened => "opened",
            ArmState::Closed => "closed",
        }
    }
}
