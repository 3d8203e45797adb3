use clap::Subcommand;
use studyclock_core::Config;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Set a settings key (e.g. focus_minutes 25, auto_start_breaks true)
    Set { key: String, value: String },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;

    match action {
        SettingsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&config.timer)?);
        }
        SettingsAction::Set { key, value } => {
            config.timer.apply(&key, &value)?;
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config.timer)?);
        }
    }
    Ok(())
}
