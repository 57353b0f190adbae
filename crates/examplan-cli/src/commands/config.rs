use clap::Subcommand;
use examplan_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set one penalty factor
    SetFactor {
        /// One of: consecutive, day-imbalance, week-imbalance, proximity
        name: String,
        value: f64,
    },
    /// Configure the notification webhook
    SetWebhook {
        url: String,
        #[arg(long)]
        disabled: bool,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetFactor { name, value } => {
            if !(0.0..=10.0).contains(&value) {
                return Err(format!("factor out of range: {value}").into());
            }
            let mut config = Config::load_or_default();
            match name.as_str() {
                "consecutive" => config.scoring.consecutive = value,
                "day-imbalance" => config.scoring.day_imbalance = value,
                "week-imbalance" => config.scoring.week_imbalance = value,
                "proximity" => config.scoring.proximity = value,
                other => return Err(format!("unknown factor: {other}").into()),
            }
            config.save()?;
            println!("{name} = {value}");
        }
        ConfigAction::SetWebhook { url, disabled } => {
            let mut config = Config::load_or_default();
            config.notify.webhook_url = url;
            config.notify.enabled = !disabled;
            config.save()?;
            println!("webhook updated");
        }
    }
    Ok(())
}
