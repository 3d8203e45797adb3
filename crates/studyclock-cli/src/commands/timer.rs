use std::io::Write;
use std::sync::Arc;

use clap::Subcommand;
use studyclock_core::notify::Notifier;
use studyclock_core::{
    Config, ConsoleNotifier, Event, NotifyKind, RunStatus, StudyApiClient, TimerEngine,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run focus/break cycles in the foreground
    Run {
        /// Number of focus sessions to complete before exiting
        #[arg(long, default_value = "1")]
        cycles: u32,
    },
    /// Print the initial timer state as JSON
    Status,
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Status => {
            let engine = TimerEngine::new(config.timer.clone());
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Run { cycles } => {
            run_cycles(&config, cycles).await?;
        }
    }
    Ok(())
}

/// Foreground countdown loop. The CLI process is the tick source and the
/// "user": when the auto-start policy leaves a phase idle, the loop starts
/// it on the user's behalf.
async fn run_cycles(config: &Config, cycles: u32) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(StudyApiClient::new(&config.api.base_url, Config::token())?);
    let notifier = ConsoleNotifier;
    let mut engine = TimerEngine::new(config.timer.clone());
    let mut completed = 0u32;

    if let Some(started) = engine.start() {
        println!("{}", serde_json::to_string_pretty(&started)?);
    }

    let mut tick = tokio::time::interval(std::time::Duration::from_secs(1));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // The first interval tick completes immediately; consume it so the
    // countdown loses no second at start.
    tick.tick().await;

    while completed < cycles {
        tick.tick().await;

        let Some(event) = engine.tick() else {
            print_countdown(&engine);
            continue;
        };

        let Event::PhaseCompleted {
            phase, ref session, ..
        } = event
        else {
            continue;
        };
        eprintln!();
        notifier.emit(
            NotifyKind::for_phase(phase),
            engine.settings().sound_enabled(),
        );

        if let Some(record) = session {
            // Fire-and-forget; the tick loop never waits on the network, so
            // a slow or hung backend cannot stall the countdown.
            let api = api.clone();
            let record = record.clone();
            tokio::spawn(async move {
                if let Err(err) = api.record_session(&record).await {
                    eprintln!("failed to record session: {err}");
                }
            });
            completed += 1;
        }
        println!("{}", serde_json::to_string_pretty(&event)?);

        if completed < cycles && engine.run_status() == RunStatus::Idle {
            engine.start();
        }
    }

    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}

fn print_countdown(engine: &TimerEngine) {
    let remaining = engine.remaining_secs();
    eprint!(
        "\r{} {:02}:{:02}  ",
        engine.phase().label(),
        remaining / 60,
        remaining % 60
    );
    let _ = std::io::stderr().flush();
}
