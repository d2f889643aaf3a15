use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cowake-cli", version, about = "Cowake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Awake-overlap reports
    Overlap {
        #[command(subcommand)]
        action: commands::overlap::OverlapAction,
    },
    /// Live overlap monitor
    Watch {
        /// Seconds between refreshes (default from config)
        #[arg(long)]
        interval: Option<u64>,
        /// Stop after this many updates instead of running forever
        #[arg(long)]
        count: Option<u64>,
    },
    /// Countdown to the reunion target
    Countdown {
        /// RFC 3339 target instant, overriding the configured one
        #[arg(long)]
        target: Option<String>,
    },
    /// Ephemeral notes with a 24-hour lifetime
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Date-locked capsule messages
    Capsule {
        #[command(subcommand)]
        action: commands::capsule::CapsuleAction,
    },
    /// Passphrase-gated letter
    Letter {
        #[command(subcommand)]
        action: commands::letter::LetterAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Overlap { action } => commands::overlap::run(action),
        Commands::Watch { interval, count } => commands::watch::run(interval, count),
        Commands::Countdown { target } => commands::countdown::run(target),
        Commands::Note { action } => commands::note::run(action),
        Commands::Capsule { action } => commands::capsule::run(action),
        Commands::Letter { action } => commands::letter::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
