use clap::Subcommand;
use studyclock_core::{stats, Config, StudyApiClient};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's aggregated stats
    Today {
        /// Print raw JSON instead of the formatted summary
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let api = StudyApiClient::new(&config.api.base_url, Config::token())?;

    match action {
        StatsAction::Today { json } => {
            let today = api.fetch_daily_stats().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&today)?);
            } else {
                println!("{}", stats::render(&today));
            }
        }
    }
    Ok(())
}
