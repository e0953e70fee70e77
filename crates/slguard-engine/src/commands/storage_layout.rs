//! Storage layout check/update command
//!
//! Runs over every selected contract in order:
//! - Read the fresh layout from build-info
//! - Compare it against the stored baseline, if one exists
//! - In update mode, rewrite the baseline when it is missing or anything
//!   other than info was reported
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for the run:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` for internal details.

use slguard_core::compare::{compare_layouts, Comparison, Severity};
use slguard_core::errors::{ExError, ExErrorKind};
use slguard_core::{log_op_end, log_op_error, log_op_start};
use slguard_store::artifacts::BuildInfoSet;
use slguard_store::baseline::{baseline_file_name, baseline_path, read_baseline, write_baseline};
use slguard_store::errors::Result;
use slguard_store::selector::select_contracts;
use slguard_store::{ContractRef, ProjectConfig};
use std::fmt;
use std::path::PathBuf;

/// Whether the run only reports or also rewrites baselines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Check,
    Update,
}

impl Mode {
    /// Build a mode from the two command-line flags.
    ///
    /// # Errors
    ///
    /// - `InvalidMode`: neither flag, or both flags, were given
    pub fn from_flags(check: bool, update: bool) -> Result<Self> {
        match (check, update) {
            (true, false) => Ok(Mode::Check),
            (false, true) => Ok(Mode::Update),
            (false, false) => Err(ExError::new(ExErrorKind::InvalidMode)
                .with_op("storage_layout")
                .with_message("Must use either --check or --update")),
            (true, true) => Err(ExError::new(ExErrorKind::InvalidMode)
                .with_op("storage_layout")
                .with_message("Cannot use both --check and --update")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Check => "check",
            Mode::Update => "update",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a contract's baseline file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineAction {
    /// Check mode never touches baselines
    NotApplicable,
    Written,
    Unchanged,
}

/// Outcome for one contract
#[derive(Debug, Clone, PartialEq)]
pub struct ContractReport {
    pub contract: ContractRef,
    /// Baseline file name relative to the layouts directory
    pub baseline_file: String,
    pub baseline_path: PathBuf,
    pub baseline_found: bool,
    /// Empty when no baseline was found
    pub comparison: Comparison,
    pub action: BaselineAction,
}

impl ContractReport {
    pub fn failed(&self) -> bool {
        self.comparison.failed
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub mode: Mode,
    pub contracts: Vec<ContractReport>,
}

impl RunReport {
    /// True if any contract reported an error-severity diagnostic
    pub fn failed(&self) -> bool {
        self.contracts.iter().any(ContractReport::failed)
    }

    /// Turn a failed check run into an error.
    ///
    /// Update runs always pass: they exist to accept changes.
    ///
    /// # Errors
    ///
    /// - `LayoutChanged`: check mode and at least one contract failed
    pub fn into_outcome(self) -> Result<Self> {
        if self.mode == Mode::Check && self.failed() {
            let changed: Vec<String> = self
                .contracts
                .iter()
                .filter(|c| c.failed())
                .map(|c| c.contract.fully_qualified_name.clone())
                .collect();
            return Err(ExError::new(ExErrorKind::LayoutChanged)
                .with_op("storage_layout")
                .with_message(
                    "Storage Layout Changed. If this was intentional, please update the storage \
                     layout files using \"slguard storage-layout --update\".",
                )
                .with_candidates(changed));
        }
        Ok(self)
    }
}

/// Progress callbacks, invoked in contract order as the run proceeds.
///
/// Lets a front end print each contract before later ones are read, so
/// output is not lost when a later contract aborts the run.
pub trait RunObserver {
    fn contract_started(&mut self, _contract: &ContractRef) {}

    fn contract_finished(&mut self, _report: &ContractReport) {}
}

/// Observer that ignores every callback
pub struct NoopRunObserver;

impl RunObserver for NoopRunObserver {}

/// Run the storage layout command for a project.
///
/// Structural changes never make this return `Err`; they are reported in
/// the returned [`RunReport`]. Use [`RunReport::into_outcome`] to fail a
/// check run.
///
/// # Errors
///
/// - `AmbiguousContract`, `ContractNotFound`: the allow-list does not resolve
/// - `StorageLayoutMissing`, `NotFound`: build-info lacks a selected contract
/// - `InvalidLayout`, `UnknownEncoding`, `DanglingTypeRef`: a layout or
///   baseline cannot be understood
/// - `Io`: reading or writing failed
pub fn storage_layout_run(
    config: &ProjectConfig,
    mode: Mode,
    observer: &mut dyn RunObserver,
) -> Result<RunReport> {
    log_op_start!("storage_layout_run", mode = mode.as_str());
    let start = std::time::Instant::now();

    let report = storage_layout_run_impl(config, mode, observer).map_err(|e| {
        log_op_error!(
            "storage_layout_run",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "storage_layout_run",
        duration_ms = start.elapsed().as_millis() as u64,
        contract_count = report.contracts.len() as u64,
        failed = report.failed()
    );

    Ok(report)
}

fn storage_layout_run_impl(
    config: &ProjectConfig,
    mode: Mode,
    observer: &mut dyn RunObserver,
) -> Result<RunReport> {
    let settings = &config.storage_layout;
    let build_info = BuildInfoSet::load(&config.build_info_dir())?;
    let selected = select_contracts(
        &settings.contracts,
        &build_info.contracts(),
        &settings.sources_prefix,
    )?;
    let layouts_dir = config.layouts_dir();

    let mut contracts = Vec::with_capacity(selected.len());
    for contract in selected {
        observer.contract_started(&contract);

        let actual = build_info.storage_layout(&contract)?;
        let path = baseline_path(&layouts_dir, &contract, settings.full_path);
        let baseline = read_baseline(&path)?;

        let comparison = match &baseline {
            Some(expected) => compare_layouts(expected, &actual).map_err(|e| {
                ExError::from(e)
                    .with_op("compare_layouts")
                    .with_contract(contract.fully_qualified_name.clone())
                    .with_path(path.display().to_string())
            })?,
            None => Comparison::default(),
        };

        let action = match mode {
            Mode::Check => BaselineAction::NotApplicable,
            Mode::Update if baseline.is_none() || comparison.has_changes() => {
                write_baseline(&path, &actual)?;
                BaselineAction::Written
            }
            Mode::Update => BaselineAction::Unchanged,
        };

        tracing::debug!(
            contract = %contract,
            baseline_found = baseline.is_some(),
            errors = comparison.count(Severity::Error),
            warnings = comparison.count(Severity::Warning),
            action = ?action,
            "contract processed"
        );

        let report = ContractReport {
            baseline_file: baseline_file_name(&contract, settings.full_path),
            baseline_path: path,
            baseline_found: baseline.is_some(),
            contract,
            comparison,
            action,
        };
        observer.contract_finished(&report);
        contracts.push(report);
    }

    Ok(RunReport { mode, contracts })
}
