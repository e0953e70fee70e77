use thiserror::Error;

/// Result type alias using LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in SLGuard. Each kind maps to a stable error code that can be used for
/// programmatic error handling, testing, and process exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidInput,
    /// Neither or both of `--check` / `--update` were supplied
    InvalidMode,
    /// The configuration file could not be parsed or has unknown keys
    InvalidConfig,
    /// A requested contract name matches no compiled contract
    ContractNotFound,
    /// A requested simple contract name matches more than one compiled contract
    AmbiguousContract,

    // Build artifacts
    NotFound,
    /// The compiler output for a contract carries no `storageLayout`
    StorageLayoutMissing,
    /// A layout document is not valid JSON or does not match the layout schema
    InvalidLayout,

    // Internal consistency
    /// An `encoding` value this build does not understand
    UnknownEncoding,
    /// A type reference that does not resolve within its own layout
    DanglingTypeRef,

    // Outcome
    /// Check mode found at least one error-severity diagnostic
    LayoutChanged,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidMode => "ERR_INVALID_MODE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::ContractNotFound => "ERR_CONTRACT_NOT_FOUND",
            ExErrorKind::AmbiguousContract => "ERR_AMBIGUOUS_CONTRACT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::StorageLayoutMissing => "ERR_STORAGE_LAYOUT_MISSING",
            ExErrorKind::InvalidLayout => "ERR_INVALID_LAYOUT",
            ExErrorKind::UnknownEncoding => "ERR_UNKNOWN_ENCODING",
            ExErrorKind::DanglingTypeRef => "ERR_DANGLING_TYPE_REF",
            ExErrorKind::LayoutChanged => "ERR_LAYOUT_CHANGED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    contract: Option<String>,
    path: Option<String>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            contract: None,
            path: None,
            message: String::new(),
            candidates: None,
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the contract this error concerns (simple or fully-qualified name)
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    /// Set the filesystem path this error concerns
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the candidate names of an ambiguous selection
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(contract) = &self.contract {
            write!(f, " (contract: {})", contract)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " (candidates: {})", candidates.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by the layout model and comparison engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No entry with the given label or astId exists in the storage list
    #[error("{key_kind} {key} not found in storage")]
    EntryNotFound { key_kind: String, key: String },

    /// A type reference does not resolve in the type mapping of its side
    #[error("type {type_name} referenced by {referenced_by} is missing from the {side} types")]
    DanglingTypeRef {
        type_name: String,
        referenced_by: String,
        side: String,
    },

    /// The compiler emitted an encoding this build does not know about
    #[error("Unknown encoding {encoding} for type {type_name}. Please report this error to the SLGuard maintainers.")]
    UnknownEncoding { encoding: String, type_name: String },

    /// The document does not have the shape of a storage layout
    #[error("Invalid storage layout: {reason}")]
    InvalidLayout { reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<LayoutError> for ExError {
    fn from(err: LayoutError) -> Self {
        let message = err.to_string();
        match err {
            LayoutError::EntryNotFound { .. } => {
                ExError::new(ExErrorKind::NotFound).with_message(message)
            }
            LayoutError::DanglingTypeRef { .. } => {
                ExError::new(ExErrorKind::DanglingTypeRef).with_message(message)
            }
            LayoutError::UnknownEncoding { .. } => {
                ExError::new(ExErrorKind::UnknownEncoding).with_message(message)
            }
            LayoutError::InvalidLayout { .. } => {
                ExError::new(ExErrorKind::InvalidLayout).with_message(message)
            }
            LayoutError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to LayoutError
impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        LayoutError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_kinds_have_distinct_codes() {
        assert_eq!(ExErrorKind::UnknownEncoding.code(), "ERR_UNKNOWN_ENCODING");
        assert_eq!(ExErrorKind::DanglingTypeRef.code(), "ERR_DANGLING_TYPE_REF");
        assert_eq!(ExErrorKind::InvalidLayout.code(), "ERR_INVALID_LAYOUT");
    }

    #[test]
    fn test_display_includes_code_op_and_contract() {
        let err = ExError::new(ExErrorKind::StorageLayoutMissing)
            .with_op("read_storage_layout")
            .with_contract("contracts/Token.sol:Token")
            .with_message("no storageLayout in compiler output");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_STORAGE_LAYOUT_MISSING]"));
        assert!(rendered.contains("'read_storage_layout'"));
        assert!(rendered.contains("contracts/Token.sol:Token"));
    }

    #[test]
    fn test_candidates_none_by_default() {
        let err = ExError::new(ExErrorKind::AmbiguousContract);
        assert!(err.candidates().is_none());
    }
}
