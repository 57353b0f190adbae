use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "examplan-cli", version, about = "Examplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog inspection and maintenance
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Exam registration and removal
    Exam {
        #[command(subcommand)]
        action: commands::exam::ExamAction,
    },
    /// Recommend the best date among an exam's candidate slots
    Recommend(commands::recommend::RecommendArgs),
    /// List upcoming available slots for a subject
    Slots(commands::slots::SlotsArgs),
    /// Admin key verification
    Key {
        #[command(subcommand)]
        action: commands::key::KeyAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Catalog { action } => commands::catalog::run(action),
        Commands::Exam { action } => commands::exam::run(action),
        Commands::Recommend(args) => commands::recommend::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Key { action } => commands::key::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
