//! Timer widget runtime.
//!
//! This is the embedding contract with the dashboard shell: the widget is
//! constructed with the signed-in user, a bearer token, and a close
//! callback, and runs a single cooperative event loop. One 1 Hz interval
//! drives the engine; a second fixed interval polls daily stats; user
//! actions arrive on a command channel and take effect immediately (the
//! tick interval skips missed ticks, so no stale tick fires against a phase
//! the user already left).
//!
//! Session uploads are fire-and-forget: the engine never waits on the
//! network, and upload failures are logged without touching timer state.
//! Dropping out of the loop drops both intervals and calls the close
//! callback; nothing outlives the widget.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::api::StudyApiClient;
use crate::config::Config;
use crate::error::NetworkError;
use crate::events::Event;
use crate::notify::{Notifier, NotifyKind};
use crate::stats::StatsView;
use crate::timer::{Phase, TimerEngine};

/// User actions forwarded into the widget loop.
#[derive(Debug)]
pub enum TimerCommand {
    Start,
    PauseOrResume,
    Reset,
    SwitchPhase(Phase),
    UpdateSettings(crate::settings::TimerSettings),
    Close,
}

/// Cloneable handle the shell uses to drive the widget.
#[derive(Clone)]
pub struct WidgetHandle {
    tx: mpsc::UnboundedSender<TimerCommand>,
}

impl WidgetHandle {
    pub fn start(&self) {
        let _ = self.tx.send(TimerCommand::Start);
    }

    pub fn pause_or_resume(&self) {
        let _ = self.tx.send(TimerCommand::PauseOrResume);
    }

    pub fn reset(&self) {
        let _ = self.tx.send(TimerCommand::Reset);
    }

    pub fn switch_phase(&self, phase: Phase) {
        let _ = self.tx.send(TimerCommand::SwitchPhase(phase));
    }

    pub fn update_settings(&self, settings: crate::settings::TimerSettings) {
        let _ = self.tx.send(TimerCommand::UpdateSettings(settings));
    }

    pub fn close(&self) {
        let _ = self.tx.send(TimerCommand::Close);
    }
}

/// The study-timer widget: engine plus its collaborators.
pub struct StudyTimerWidget {
    user: String,
    engine: TimerEngine,
    notifier: Box<dyn Notifier>,
    api: Arc<StudyApiClient>,
    stats: StatsView,
    poll_interval: Duration,
    commands: mpsc::UnboundedReceiver<TimerCommand>,
    events: mpsc::UnboundedSender<Event>,
    on_close: Option<Box<dyn FnOnce() + Send>>,
}

impl StudyTimerWidget {
    /// Build a widget for `user` from the loaded config. Returns the widget
    /// itself, the command handle, and the event stream the shell renders.
    pub fn new(
        user: impl Into<String>,
        token: &str,
        config: &Config,
        notifier: Box<dyn Notifier>,
        on_close: Box<dyn FnOnce() + Send>,
    ) -> Result<(Self, WidgetHandle, mpsc::UnboundedReceiver<Event>), NetworkError> {
        let api = Arc::new(StudyApiClient::new(&config.api.base_url, token)?);
        let stats = StatsView::new(api.clone());
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let widget = Self {
            user: user.into(),
            engine: TimerEngine::new(config.timer.clone()),
            notifier,
            api,
            stats,
            poll_interval: Duration::from_secs(config.api.poll_interval_secs.max(1)),
            commands: cmd_rx,
            events: event_tx,
            on_close: Some(on_close),
        };
        Ok((widget, WidgetHandle { tx: cmd_tx }, event_rx))
    }

    pub fn stats(&self) -> &StatsView {
        &self.stats
    }

    /// Run until closed. Owns the tick and poll intervals for its whole
    /// lifetime; both die with the loop.
    pub async fn run(mut self) {
        let mut tick = interval(Duration::from_secs(1));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Commands win over a simultaneously-ready tick.
                biased;

                cmd = self.commands.recv() => {
                    match cmd {
                        None | Some(TimerCommand::Close) => break,
                        Some(cmd) => self.apply(cmd),
                    }
                }
                _ = tick.tick() => {
                    if let Some(event) = self.engine.tick() {
                        self.dispatch(event);
                    }
                }
                _ = poll.tick() => {
                    // Off-loop so a slow response never delays a tick.
                    let stats = self.stats.clone();
                    tokio::spawn(async move {
                        stats.refresh().await;
                    });
                }
            }
        }

        if let Some(on_close) = self.on_close.take() {
            on_close();
        }
    }

    fn apply(&mut self, cmd: TimerCommand) {
        let event = match cmd {
            TimerCommand::Start => self.engine.start(),
            TimerCommand::PauseOrResume => self.engine.pause_or_resume(),
            TimerCommand::Reset => self.engine.reset(),
            TimerCommand::SwitchPhase(phase) => Some(self.engine.switch_phase(phase, false)),
            TimerCommand::UpdateSettings(settings) => {
                self.engine.update_settings(settings);
                None
            }
            TimerCommand::Close => unreachable!("handled in the loop"),
        };
        if let Some(event) = event {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: Event) {
        if let Event::PhaseCompleted { phase, session, .. } = &event {
            self.notifier.emit(
                NotifyKind::for_phase(*phase),
                self.engine.settings().sound_enabled(),
            );

            if let Some(record) = session.clone() {
                let api = self.api.clone();
                let user = self.user.clone();
                tokio::spawn(async move {
                    if let Err(err) = api.record_session(&record).await {
                        eprintln!("failed to record session for {user}: {err}");
                    }
                });
            }

            // Completion-triggered stats refresh, independent of the poll.
            let stats = self.stats.clone();
            tokio::spawn(async move {
                stats.refresh().await;
            });
        }

        let _ = self.events.send(event);
    }
}
