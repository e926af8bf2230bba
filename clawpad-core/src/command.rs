//! Outbound arm commands
//!
//! Every completed tap is relayed to the arm controller as a single ASCII
//! digit. `'0'..='7'` select one of eight stored poses, `'8'` closes the
//! claw and `'9'` opens it.

/// A single-character command for the remote arm controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    D1,
    D2,
    D3,
    D4,
    U1,
    U2,
    U3,
    U4,
    CloseClaw,
    OpenClaw,
}

impl Command {
    /// All commands in wire order
    pub const ALL: [Command; 10] = [
        Command::D1,
        Command::D2,
        Command::D3,
        Command::D4,
        Command::U1,
        Command::U2,
        Command::U3,
        Command::U4,
        Command::CloseClaw,
        Command::OpenClaw,
    ];

    /// Wire character
    pub const fn as_char(self) -> char {
        match self {
            Command::D1 => '0',
            Command::D2 => '1',
            Command::D3 => '2',
            Command::D4 => '3',
            Command::U1 => '4',
            Command::U2 => '5',
            Command::U3 => '6',
            Command::U4 => '7',
            Command::CloseClaw => '8',
            Command::OpenClaw => '9',
        }
    }

    /// Wire byte
    pub const fn as_byte(self) -> u8 {
        self.as_char() as u8
    }

    /// Parse a wire character
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|cmd| cmd.as_char() == c)
    }

    /// Human readable label shown on the status readout
    pub const fn label(self) -> &'static str {
        match self {
            Command::D1 => "D1",
            Command::D2 => "D2",
            Command::D3 => "D3",
            Command::D4 => "D4",
            Command::U1 => "U1",
            Command::U2 => "U2",
            Command::U3 => "U3",
            Command::U4 => "U4",
            Command::CloseClaw => "Close",
            Command::OpenClaw => "Open",
        }
    }

    /// Whether this command moves the claw rather than selecting a pose
    pub const fn is_claw(self) -> bool {
        matches!(self, Command::CloseClaw | Command::OpenClaw)
    }
}
