//! ecoaudit CLI - ecosystem cross-reference checks and daylight-saving coordination.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ecoaudit_canonical::Address;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{adjust, log, status, verify};

#[derive(Parser)]
#[command(name = "ecoaudit")]
#[command(about = "Ecosystem integrity verification and daylight-saving coordination CLI")]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every component's references against the registry
    Verify {
        /// Ecosystem configuration (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Reference snapshot reported by the components (TOML)
        #[arg(long)]
        references: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Flip the daylight-saving season and log the transition to Pool's journal
    AdjustDaylight {
        /// Ecosystem configuration (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Address invoking the transition
        #[arg(long)]
        caller: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current daylight-saving state
    Status {
        /// Ecosystem configuration (TOML)
        #[arg(long)]
        config: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List audit records in a journal
    Log {
        /// Path to journal file
        journal: PathBuf,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
        /// Stop after reading N records (default: unlimited)
        #[arg(long)]
        max_records: Option<u64>,
        /// Check that subjects alternate instead of listing
        #[arg(long)]
        verify: bool,
        /// Treat a truncated tail as end-of-file
        #[arg(long)]
        permissive: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Verify {
            config,
            references,
            json,
        } => verify::run(config, references, json),
        Commands::AdjustDaylight {
            config,
            caller,
            json,
        } => adjust::run(config, caller, json),
        Commands::Status { config, json } => status::run(config, json),
        Commands::Log {
            journal,
            json,
            max_records,
            verify,
            permissive,
        } => log::run(journal, json, max_records, verify, permissive),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
