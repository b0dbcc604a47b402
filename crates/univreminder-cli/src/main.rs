use clap::{Parser, Subcommand};
use univreminder_core::{data_dir, Config};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "univcli", version, about = "Sync Canvas tasks into reminders")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch Canvas tasks and create reminders for new ones
    Run {
        /// Show what would be created without creating anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Inspect the local reminder store
    Reminders {
        #[command(subcommand)]
        action: commands::reminders::RemindersAction,
    },
    /// Inspect the set of already-synced task ids
    KnownIds {
        #[command(subcommand)]
        action: commands::known_ids::KnownIdsAction,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let data_dir = data_dir()?;
    // Flushes buffered log lines when dropped.
    let _guard = logging::init(&data_dir, &config.log.level)?;

    match cli.command {
        Commands::Run { dry_run } => commands::run::run(&config, &data_dir, dry_run).await,
        Commands::Config { action } => commands::config::run(config, action),
        Commands::Reminders { action } => commands::reminders::run(&config, &data_dir, action),
        Commands::KnownIds { action } => commands::known_ids::run(&config, &data_dir, action),
    }
}
