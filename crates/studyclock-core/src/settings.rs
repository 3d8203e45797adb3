//! Validated timer settings.
//!
//! `TimerSettings` is an immutable-by-default value type: fields are private
//! and every mutation goes through a validated setter. Invalid values (zero
//! durations, zero session counts) are rejected with a [`ValidationError`]
//! and leave the settings untouched.
//!
//! Updating settings while a phase is counting down does not rescale the
//! in-progress countdown; new durations take effect at the next phase entry.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Phase;

/// Phase durations and auto-chaining policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_focus_minutes")]
    focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    long_break_minutes: u32,
    #[serde(default = "default_sessions_until_long_break")]
    sessions_until_long_break: u32,
    #[serde(default)]
    auto_start_breaks: bool,
    #[serde(default)]
    auto_start_focus: bool,
    #[serde(default = "default_true")]
    sound_enabled: bool,
}

fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_sessions_until_long_break() -> u32 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            sessions_until_long_break: default_sessions_until_long_break(),
            auto_start_breaks: false,
            auto_start_focus: false,
            sound_enabled: true,
        }
    }
}

impl TimerSettings {
    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_minutes
    }

    pub fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes
    }

    pub fn sessions_until_long_break(&self) -> u32 {
        self.sessions_until_long_break
    }

    pub fn auto_start_breaks(&self) -> bool {
        self.auto_start_breaks
    }

    pub fn auto_start_focus(&self) -> bool {
        self.auto_start_focus
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Configured duration of `phase`, in minutes.
    pub fn duration_min(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        }
    }

    /// Configured duration of `phase`, in seconds.
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        self.duration_min(phase).saturating_mul(60)
    }

    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.focus_minutes = positive("focus_minutes", minutes)?;
        Ok(())
    }

    pub fn set_short_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.short_break_minutes = positive("short_break_minutes", minutes)?;
        Ok(())
    }

    pub fn set_long_break_minutes(&mut self, minutes: u32) -> Result<(), ValidationError> {
        self.long_break_minutes = positive("long_break_minutes", minutes)?;
        Ok(())
    }

    pub fn set_sessions_until_long_break(&mut self, count: u32) -> Result<(), ValidationError> {
        self.sessions_until_long_break = positive("sessions_until_long_break", count)?;
        Ok(())
    }

    pub fn set_auto_start_breaks(&mut self, enabled: bool) {
        self.auto_start_breaks = enabled;
    }

    pub fn set_auto_start_focus(&mut self, enabled: bool) {
        self.auto_start_focus = enabled;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    /// Apply a string value to a settings key (CLI `settings set` path).
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        match key {
            "focus_minutes" => self.set_focus_minutes(parse_u32(key, value)?),
            "short_break_minutes" => self.set_short_break_minutes(parse_u32(key, value)?),
            "long_break_minutes" => self.set_long_break_minutes(parse_u32(key, value)?),
            "sessions_until_long_break" => {
                self.set_sessions_until_long_break(parse_u32(key, value)?)
            }
            "auto_start_breaks" => {
                self.set_auto_start_breaks(parse_bool(key, value)?);
                Ok(())
            }
            "auto_start_focus" => {
                self.set_auto_start_focus(parse_bool(key, value)?);
                Ok(())
            }
            "sound_enabled" => {
                self.set_sound_enabled(parse_bool(key, value)?);
                Ok(())
            }
            _ => Err(ValidationError::UnknownKey(key.to_string())),
        }
    }
}

fn positive(field: &str, value: u32) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

fn parse_u32(field: &str, value: &str) -> Result<u32, ValidationError> {
    value
        .parse::<u32>()
        .map_err(|_| ValidationError::invalid(field, format!("cannot parse '{value}' as a count")))
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ValidationError> {
    value
        .parse::<bool>()
        .map_err(|_| ValidationError::invalid(field, format!("cannot parse '{value}' as a bool")))
}
