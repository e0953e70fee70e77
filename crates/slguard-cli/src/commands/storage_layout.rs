//! Storage layout command
//!
//! Usage: slguard storage-layout (--check | --update) [--root <DIR>] [--config <FILE>]

use clap::{Args, ValueEnum};
use console::style;
use slguard_core::compare::Severity;
use slguard_core::render::{render_diagnostics, render_summary};
use slguard_engine::commands::storage_layout::{
    storage_layout_run, BaselineAction, ContractReport, Mode, RunObserver,
};
use slguard_store::{load_config, ContractRef};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StorageLayoutArgs {
    /// Compare fresh layouts against stored baselines; fail on errors
    #[arg(long)]
    pub check: bool,

    /// Write baselines that are missing or changed
    #[arg(long)]
    pub update: bool,

    /// Project root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Config file (default: <root>/slguard.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Lowest diagnostic severity to print in check mode
    #[arg(long, value_enum, default_value_t = Verbosity::Info)]
    pub verbosity: Verbosity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    Error,
    Warning,
    Info,
}

impl From<Verbosity> for Severity {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Error => Severity::Error,
            Verbosity::Warning => Severity::Warning,
            Verbosity::Info => Severity::Info,
        }
    }
}

/// Prints each contract as the engine reaches it
struct ConsolePrinter {
    mode: Mode,
    verbosity: Severity,
    color: bool,
}

impl RunObserver for ConsolePrinter {
    fn contract_started(&mut self, contract: &ContractRef) {
        println!("Contract: {}", contract.contract_name);
    }

    fn contract_finished(&mut self, report: &ContractReport) {
        match (self.mode, report.action) {
            (Mode::Check, _) if !report.baseline_found => eprintln!(
                "{}",
                style(format!(
                    "Storage layout not captured for {}. Please run \"slguard storage-layout --update\".",
                    report.contract.fully_qualified_name
                ))
                .yellow()
                .for_stderr()
            ),
            (Mode::Check, _) => {
                print!(
                    "{}",
                    render_diagnostics(&report.comparison, self.verbosity, self.color)
                );
                println!("{}", render_summary(&report.comparison));
            }
            (Mode::Update, BaselineAction::Written) => {
                println!("updating {}", report.baseline_file);
            }
            (Mode::Update, _) => {
                println!("no need to update {}", report.baseline_file);
            }
        }
    }
}

/// Execute storage-layout command
pub fn execute(args: StorageLayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mode = Mode::from_flags(args.check, args.update)?;
    let config = load_config(&args.root, args.config.as_deref())?;

    let mut printer = ConsolePrinter {
        mode,
        verbosity: args.verbosity.into(),
        color: console::colors_enabled(),
    };
    storage_layout_run(&config, mode, &mut printer)?.into_outcome()?;

    Ok(())
}
