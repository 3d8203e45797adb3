//! Timer engine implementation.
//!
//! The timer engine is a pure state machine. It does not use internal
//! threads or wall-clock reads for the countdown - the caller invokes
//! `tick()` once per second while the timer is running, and each tick
//! subtracts exactly one second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^       |
//!   +-- completion / reset / switch_phase
//! ```
//!
//! Completion is a transient transition, not a stored state: when a tick
//! drives `remaining_secs` to zero the engine applies the auto-chaining
//! policy synchronously and returns a `PhaseCompleted` event. Side effects
//! (notification, session upload) belong to the caller; their failures can
//! never touch engine state.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Phase;
use crate::events::Event;
use crate::session::SessionRecord;
use crate::settings::TimerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
///
/// Owns the phase, the remaining time, and the completed-focus counter.
/// The caller is responsible for calling `tick()` at 1 Hz while running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    settings: TimerSettings,
    phase: Phase,
    run_status: RunStatus,
    /// Remaining time in seconds for the current phase. Never exceeds
    /// `total_secs`.
    remaining_secs: u32,
    /// Duration baseline for the current phase, captured from settings at
    /// phase entry.
    total_secs: u32,
    /// Completed focus phases. Monotonic; reset never touches it.
    completed_focus_count: u32,
}

impl TimerEngine {
    /// Create a new engine: Idle, Focus, full countdown.
    pub fn new(settings: TimerSettings) -> Self {
        let total_secs = settings.duration_secs(Phase::Focus);
        Self {
            settings,
            phase: Phase::Focus,
            run_status: RunStatus::Idle,
            remaining_secs: total_secs,
            total_secs,
            completed_focus_count: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run_status(&self) -> RunStatus {
        self.run_status
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus_count
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// 1-based display position within the current long-break cycle.
    pub fn session_ordinal(&self) -> u32 {
        self.completed_focus_count % self.settings.sessions_until_long_break() + 1
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / self.total_secs as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            run_status: self.run_status,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            completed_focus_count: self.completed_focus_count,
            session_ordinal: self.session_ordinal(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle or Paused -> Running. No-op if already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.run_status {
            RunStatus::Idle | RunStatus::Paused => {
                self.run_status = RunStatus::Running;
                Some(Event::TimerStarted {
                    phase: self.phase,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            RunStatus::Running => None,
        }
    }

    /// Toggle Running <-> Paused. No-op if Idle.
    pub fn pause_or_resume(&mut self) -> Option<Event> {
        match self.run_status {
            RunStatus::Running => {
                self.run_status = RunStatus::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            RunStatus::Paused => {
                self.run_status = RunStatus::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            RunStatus::Idle => None,
        }
    }

    /// Any state -> Idle with a full countdown for the *current* phase.
    /// Leaves `phase` and `completed_focus_count` unchanged.
    pub fn reset(&mut self) -> Option<Event> {
        self.run_status = RunStatus::Idle;
        self.total_secs = self.settings.duration_secs(self.phase);
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Explicit phase change. Cancels any active run and re-arms the
    /// countdown from current settings. `auto_start` is used only by the
    /// policy-driven auto-chain; manual switches pass `false`.
    pub fn switch_phase(&mut self, phase: Phase, auto_start: bool) -> Event {
        self.phase = phase;
        self.total_secs = self.settings.duration_secs(phase);
        self.remaining_secs = self.total_secs;
        self.run_status = if auto_start {
            RunStatus::Running
        } else {
            RunStatus::Idle
        };
        Event::PhaseSwitched {
            phase,
            total_secs: self.total_secs,
            auto_started: auto_start,
            at: Utc::now(),
        }
    }

    /// Replace the settings. Takes effect at the next phase entry
    /// (`switch_phase` or `reset`); an in-progress countdown is never
    /// rescaled, which keeps `remaining_secs <= total_secs` intact.
    pub fn update_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
    }

    /// Call once per second while running. Subtracts exactly one second;
    /// on reaching zero the completion policy runs synchronously and the
    /// returned event carries the outcome.
    pub fn tick(&mut self) -> Option<Event> {
        if self.run_status != RunStatus::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Auto-chaining policy: pick the next phase, mint the session record
    /// for focus completions, and enter the next phase.
    fn complete_phase(&mut self) -> Event {
        self.run_status = RunStatus::Idle;
        let completed = self.phase;

        let (session, next_phase) = if completed.is_focus() {
            self.completed_focus_count += 1;
            // The countdown that just ran, not the (possibly since-updated)
            // settings value.
            let record = SessionRecord::new(self.total_secs / 60);
            // Post-increment check: the Nth, 2Nth, ... completions earn the
            // long break.
            let next = if self.completed_focus_count % self.settings.sessions_until_long_break()
                == 0
            {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            };
            (Some(record), next)
        } else {
            (None, Phase::Focus)
        };

        let auto_start = if next_phase.is_focus() {
            self.settings.auto_start_focus()
        } else {
            self.settings.auto_start_breaks()
        };
        self.switch_phase(next_phase, auto_start);

        Event::PhaseCompleted {
            phase: completed,
            next_phase,
            auto_started: auto_start,
            completed_focus_count: self.completed_focus_count,
            session,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> TimerSettings {
        let mut s = TimerSettings::default();
        s.set_focus_minutes(1).unwrap();
        s.set_short_break_minutes(1).unwrap();
        s.set_long_break_minutes(2).unwrap();
        s.set_sessions_until_long_break(4).unwrap();
        s
    }

    fn run_to_completion(engine: &mut TimerEngine) -> Event {
        engine.start();
        loop {
            if let Some(ev @ Event::PhaseCompleted { .. }) = engine.tick() {
                return ev;
            }
        }
    }

    #[test]
    fn new_engine_is_idle_focus_full() {
        let engine = TimerEngine::new(TimerSettings::default());
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.run_status(), RunStatus::Idle);
        assert_eq!(engine.remaining_secs(), 25 * 60);
        assert_eq!(engine.total_secs(), 25 * 60);
        assert_eq!(engine.completed_focus_count(), 0);
        assert_eq!(engine.session_ordinal(), 1);
    }

    #[test]
    fn start_pause_resume() {
        let mut engine = TimerEngine::new(small_settings());
        assert!(engine.start().is_some());
        assert_eq!(engine.run_status(), RunStatus::Running);
        // Starting again is a no-op.
        assert!(engine.start().is_none());

        assert!(matches!(
            engine.pause_or_resume(),
            Some(Event::TimerPaused { .. })
        ));
        assert_eq!(engine.run_status(), RunStatus::Paused);

        assert!(matches!(
            engine.pause_or_resume(),
            Some(Event::TimerResumed { .. })
        ));
        assert_eq!(engine.run_status(), RunStatus::Running);
    }

    #[test]
    fn pause_or_resume_is_noop_when_idle() {
        let mut engine = TimerEngine::new(small_settings());
        assert!(engine.pause_or_resume().is_none());
        assert_eq!(engine.run_status(), RunStatus::Idle);
    }

    #[test]
    fn ticks_decrement_one_second_each() {
        let mut engine = TimerEngine::new(small_settings());
        engine.start();
        for _ in 0..10 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.remaining_secs(), 60 - 10);
    }

    #[test]
    fn tick_does_nothing_unless_running() {
        let mut engine = TimerEngine::new(small_settings());
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 60);

        engine.start();
        engine.tick();
        engine.pause_or_resume();
        for _ in 0..100 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.remaining_secs(), 59);
    }

    #[test]
    fn reset_keeps_phase_and_count() {
        let mut engine = TimerEngine::new(small_settings());
        run_to_completion(&mut engine); // now in ShortBreak with count 1
        engine.start();
        engine.tick();
        engine.reset();
        assert_eq!(engine.phase(), Phase::ShortBreak);
        assert_eq!(engine.run_status(), RunStatus::Idle);
        assert_eq!(engine.remaining_secs(), engine.total_secs());
        assert_eq!(engine.completed_focus_count(), 1);
    }

    #[test]
    fn switch_phase_rearms_from_settings() {
        let mut engine = TimerEngine::new(small_settings());
        engine.start();
        engine.tick();
        let ev = engine.switch_phase(Phase::LongBreak, false);
        assert!(matches!(ev, Event::PhaseSwitched { .. }));
        assert_eq!(engine.phase(), Phase::LongBreak);
        assert_eq!(engine.run_status(), RunStatus::Idle);
        assert_eq!(engine.remaining_secs(), 2 * 60);
        assert_eq!(engine.total_secs(), 2 * 60);
    }

    #[test]
    fn completion_fires_exactly_once_with_session() {
        let mut engine = TimerEngine::new(small_settings());
        engine.start();
        let mut completions = 0;
        for _ in 0..60 {
            if let Some(Event::PhaseCompleted { session, phase, .. }) = engine.tick() {
                completions += 1;
                assert_eq!(phase, Phase::Focus);
                let record = session.expect("focus completion carries a session");
                assert_eq!(record.duration_min, 1);
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.completed_focus_count(), 1);
        assert_eq!(engine.phase(), Phase::ShortBreak);
    }

    #[test]
    fn break_completion_routes_to_focus_without_session() {
        let mut engine = TimerEngine::new(small_settings());
        run_to_completion(&mut engine);
        let ev = run_to_completion(&mut engine);
        match ev {
            Event::PhaseCompleted {
                phase,
                next_phase,
                session,
                completed_focus_count,
                ..
            } => {
                assert_eq!(phase, Phase::ShortBreak);
                assert_eq!(next_phase, Phase::Focus);
                assert!(session.is_none());
                assert_eq!(completed_focus_count, 1);
            }
            _ => panic!("expected PhaseCompleted"),
        }
    }

    #[test]
    fn long_break_every_nth_focus() {
        let mut engine = TimerEngine::new(small_settings());
        let mut routes = Vec::new();
        for _ in 0..8 {
            // Complete the focus phase, note where it routed, then complete
            // the break to get back to focus.
            let ev = run_to_completion(&mut engine);
            if let Event::PhaseCompleted { next_phase, .. } = ev {
                routes.push(next_phase);
            }
            run_to_completion(&mut engine);
        }
        assert_eq!(
            routes,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn auto_start_policy_applies_per_phase_kind() {
        let mut settings = small_settings();
        settings.set_auto_start_breaks(true);
        let mut engine = TimerEngine::new(settings);

        let ev = run_to_completion(&mut engine);
        assert!(matches!(
            ev,
            Event::PhaseCompleted {
                auto_started: true,
                ..
            }
        ));
        assert_eq!(engine.run_status(), RunStatus::Running);

        // auto_start_focus is off: the break completion leaves Focus idle.
        let ev = loop {
            if let Some(ev @ Event::PhaseCompleted { .. }) = engine.tick() {
                break ev;
            }
        };
        assert!(matches!(
            ev,
            Event::PhaseCompleted {
                auto_started: false,
                ..
            }
        ));
        assert_eq!(engine.run_status(), RunStatus::Idle);
        assert_eq!(engine.phase(), Phase::Focus);
    }

    #[test]
    fn settings_change_does_not_rescale_running_countdown() {
        let mut engine = TimerEngine::new(small_settings());
        engine.start();
        engine.tick();
        let mut updated = small_settings();
        updated.set_focus_minutes(50).unwrap();
        engine.update_settings(updated);
        assert_eq!(engine.remaining_secs(), 59);
        assert_eq!(engine.total_secs(), 60);

        // Takes effect at the next phase entry.
        engine.reset();
        assert_eq!(engine.total_secs(), 50 * 60);
        assert_eq!(engine.remaining_secs(), 50 * 60);
    }

    #[test]
    fn session_ordinal_cycles() {
        let mut engine = TimerEngine::new(small_settings());
        assert_eq!(engine.session_ordinal(), 1);
        run_to_completion(&mut engine);
        assert_eq!(engine.session_ordinal(), 2);
        for _ in 0..3 {
            run_to_completion(&mut engine); // break
            run_to_completion(&mut engine); // focus
        }
        // 4 completed focus phases: back to the start of the cycle.
        assert_eq!(engine.completed_focus_count(), 4);
        assert_eq!(engine.session_ordinal(), 1);
    }
}
