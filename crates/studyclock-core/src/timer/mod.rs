mod engine;

pub use engine::{RunStatus, TimerEngine};

use serde::{Deserialize, Serialize};

/// A named countdown interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_focus(self) -> bool {
        self == Phase::Focus
    }

    pub fn is_break(self) -> bool {
        !self.is_focus()
    }

    /// Human-readable display name.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}
