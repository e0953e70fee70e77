//! SLGuard CLI
//!
//! Command-line interface for guarding contract storage layouts

use clap::{Parser, Subcommand, ValueEnum};
use slguard_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "slguard")]
#[command(about = "SLGuard - Storage layout change guard for upgradeable contracts", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check or update stored storage layouts
    StorageLayout(commands::storage_layout::StorageLayoutArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::StorageLayout(args) => commands::storage_layout::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
