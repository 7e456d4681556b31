// THEORY:
// The runtime control surface is four operations: raise threshold, lower
// threshold, toggle overlay, switch overlay style, plus quit. Key codes from
// whatever window toolkit the caller uses are mapped to a `Command` here so the
// mapping is testable without a window.

pub const THRESHOLD_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleOverlay,
    SwitchStyle,
    IncreaseThreshold,
    DecreaseThreshold,
}

/// Whether the capture loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

impl Command {
    /// Maps a key code (low byte of a `waitKey`-style result) to a command.
    pub fn from_key(key: i32) -> Option<Self> {
        if key < 0 {
            return None;
        }
        match (key & 0xFF) as u8 {
            b'q' => Some(Command::Quit),
            b't' => Some(Command::ToggleOverlay),
            b's' => Some(Command::SwitchStyle),
            b'+' | b'=' => Some(Command::IncreaseThreshold),
            b'-' => Some(Command::DecreaseThreshold),
            _ => None,
        }
    }
}
