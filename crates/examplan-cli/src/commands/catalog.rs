use clap::Subcommand;
use examplan_core::{AdminKeys, CatalogStore, Config};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Print the full catalog as JSON
    Show,
    /// Print subject, moment, and exam counts
    Stats,
    /// Remove every registered exam (requires the master key)
    Clear {
        /// Master key
        #[arg(long)]
        key: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::Show => {
            let store = CatalogStore::open_default()?;
            println!("{}", serde_json::to_string_pretty(&store.catalog)?);
        }
        CatalogAction::Stats => {
            let store = CatalogStore::open_default()?;
            println!("subjects: {}", store.catalog.subjects.len());
            println!("moments:  {}", store.catalog.moments.len());
            println!("exams:    {}", store.catalog.exam_count());
        }
        CatalogAction::Clear { key } => {
            let config = Config::load_or_default();
            let keys = AdminKeys::resolve(&config.auth);
            if !keys.verify_master(&key) {
                return Err("master key rejected".into());
            }
            let mut store = CatalogStore::open_default()?;
            store.catalog.clear_exams();
            store.save()?;
            println!("calendar cleared");
        }
    }
    Ok(())
}
