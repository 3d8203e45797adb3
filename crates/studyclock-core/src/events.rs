use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::SessionRecord;
use crate::timer::{Phase, RunStatus};

/// Every state change in the timer produces an Event.
/// The embedding shell renders them; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        at: DateTime<Utc>,
    },
    PhaseSwitched {
        phase: Phase,
        total_secs: u32,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. For focus phases `session` carries the
    /// record that must be handed to the persistence client.
    PhaseCompleted {
        phase: Phase,
        next_phase: Phase,
        auto_started: bool,
        completed_focus_count: u32,
        session: Option<SessionRecord>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        run_status: RunStatus,
        remaining_secs: u32,
        total_secs: u32,
        completed_focus_count: u32,
        session_ordinal: u32,
        at: DateTime<Utc>,
    },
}
