use clap::Args;
use examplan_core::{CatalogStore, Config};

#[derive(Args)]
pub struct SlotsArgs {
    /// Subject name
    pub subject: String,
    /// Horizon in days (defaults to the configured value)
    #[arg(long)]
    pub days: Option<u32>,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = CatalogStore::open_default()?;
    let config = Config::load_or_default();
    let horizon = args.days.unwrap_or(config.slots.horizon_days);

    let today = chrono::Local::now().date_naive();
    let offers = store
        .catalog
        .available_slots(&args.subject, today, horizon)?;

    if offers.is_empty() {
        println!("no available slots for '{}' in the next {horizon} days", args.subject);
        return Ok(());
    }
    for offer in offers {
        println!("{} {} (moment {})", offer.date, offer.time, offer.moment);
    }
    Ok(())
}
