//! # Studyclock Core Library
//!
//! Core business logic for the Studyclock study-session timer: the focus
//! timer widget embedded in the education dashboard, reimplemented as a
//! CLI-first library. All operations are available via a standalone CLI
//! binary; any GUI shell is a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a pure state machine driven by a caller-owned 1 Hz
//!   tick; completion applies the auto-chaining policy synchronously
//! - **Settings**: validated phase durations and chaining policy, persisted
//!   as TOML configuration
//! - **Persistence**: completed focus sessions are posted to the dashboard
//!   backend; daily aggregates are fetched, never computed locally
//! - **Widget**: the embedding contract - a cooperative event loop owning
//!   the tick source, the stats poll, and the close callback
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer state machine
//! - [`TimerSettings`]: validated configuration
//! - [`StudyApiClient`]: session upload and daily-stats fetch
//! - [`StudyTimerWidget`]: runtime wiring of the above

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod settings;
pub mod stats;
pub mod timer;
pub mod widget;

pub use api::{DailyStats, StudyApiClient};
pub use config::Config;
pub use error::{ConfigError, CoreError, NetworkError, ValidationError};
pub use events::Event;
pub use notify::{ConsoleNotifier, Notifier, NotifyKind};
pub use session::SessionRecord;
pub use settings::TimerSettings;
pub use timer::{Phase, RunStatus, TimerEngine};
pub use widget::{StudyTimerWidget, TimerCommand, WidgetHandle};
