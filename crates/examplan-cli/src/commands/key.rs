use clap::Subcommand;
use examplan_core::{AdminKeys, Config};

#[derive(Subcommand)]
pub enum KeyAction {
    /// Check a key against the configured admin (or master) key
    Verify {
        /// Key to check
        key: String,
        /// Require the master key specifically
        #[arg(long)]
        master: bool,
    },
}

pub fn run(action: KeyAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        KeyAction::Verify { key, master } => {
            let config = Config::load_or_default();
            let keys = AdminKeys::resolve(&config.auth);
            if !keys.is_configured() {
                return Err("no admin keys configured".into());
            }
            let ok = if master {
                keys.verify_master(&key)
            } else {
                keys.verify_admin(&key)
            };
            println!("{}", serde_json::json!({ "ok": ok }));
        }
    }
    Ok(())
}
