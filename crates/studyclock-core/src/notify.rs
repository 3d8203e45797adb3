//! Phase-completion notifications.
//!
//! The emitter is a seam: the widget talks to a [`Notifier`] trait object so
//! tests can capture emissions. Notification is strictly best-effort - a
//! failed chime must never surface to the caller or block a phase
//! transition, so `emit` is infallible and playback errors are swallowed
//! here.

use std::io::Write;

use crate::timer::Phase;

/// What just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    FocusComplete,
    ShortBreakComplete,
    LongBreakComplete,
}

impl NotifyKind {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Focus => NotifyKind::FocusComplete,
            Phase::ShortBreak => NotifyKind::ShortBreakComplete,
            Phase::LongBreak => NotifyKind::LongBreakComplete,
        }
    }

    /// Transient human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            NotifyKind::FocusComplete => "Focus session complete. Time for a break!",
            NotifyKind::ShortBreakComplete => "Break over. Back to work!",
            NotifyKind::LongBreakComplete => "Long break over. Ready for the next round?",
        }
    }
}

/// Completion cue sink.
pub trait Notifier: Send {
    /// Surface a transient message and, when `sound` is set, an audible cue.
    /// Must never fail into the caller.
    fn emit(&self, kind: NotifyKind, sound: bool);
}

/// A short audible cue, acquired per emission and released after playback.
pub trait Chime {
    fn play(&self) -> std::io::Result<()>;
}

/// Terminal bell. The simplest cue that works everywhere a CLI runs.
pub struct TerminalChime;

impl Chime for TerminalChime {
    fn play(&self) -> std::io::Result<()> {
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()
    }
}

/// Default notifier: message to stderr, terminal bell when sound is on.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn emit(&self, kind: NotifyKind, sound: bool) {
        eprintln!("{}", kind.message());
        if sound {
            // Playback failure is non-critical; swallow it.
            let _ = TerminalChime.play();
        }
    }
}
