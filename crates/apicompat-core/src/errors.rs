use apicompat_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and test assertions. Structural incompatibility is absent:
/// it is a verdict (`CompatReport`), never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot decoding
    /// Snapshot bytes are not valid UTF-8 JSON, or a field has the wrong type
    InvalidSnapshot,
    /// `snapshot_schema_version` is not one this build understands
    UnsupportedSchemaVersion,
    /// A required snapshot field (e.g. `project`) is absent
    MissingField,
    /// The recorded `project_digest` disagrees with the decoded project
    DigestMismatch,
    /// A decoded project breaks a model key invariant
    InvariantViolation,

    // Integration
    Serialization,
    /// A [`SnapshotStore`](crate::snapshot::SnapshotStore) failed to load or save
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::DigestMismatch => "ERR_DIGEST_MISMATCH",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, package, symbol, run) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    package: Option<String>,
    symbol: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            package: None,
            symbol: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add package context
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Add symbol context
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the package context, if any
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Get the symbol context, if any
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(package) = &self.package {
            write!(f, " (package: {})", package)?;
        }
        if let Some(symbol) = &self.symbol {
            write!(f, " (symbol: {})", symbol)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for snapshot handling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiCompatError {
    /// Snapshot bytes could not be parsed
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// Snapshot was written by an incompatible schema version
    #[error("Unsupported snapshot schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion { found: u64, expected: u32 },

    /// Required snapshot field is absent
    #[error("Snapshot field is missing: {field}")]
    MissingField { field: String },

    /// Recorded digest does not match the project content
    #[error("Snapshot digest mismatch: recorded {recorded}, computed {computed}")]
    DigestMismatch { recorded: String, computed: String },

    /// A model key does not match the name of the entry it indexes
    #[error("Key '{key}' does not match entry name '{name}'")]
    KeyMismatch {
        package: Option<String>,
        key: String,
        name: String,
    },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Snapshot store failed to load or save; store implementations
    /// report their failures through this variant
    #[error("Snapshot store error during {operation}: {message}")]
    Store { operation: String, message: String },
}

impl From<ApiCompatError> for ExError {
    fn from(err: ApiCompatError) -> Self {
        match err {
            ApiCompatError::InvalidSnapshot { reason } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(reason)
            }
            ApiCompatError::UnsupportedSchemaVersion { found, expected } => {
                ExError::new(ExErrorKind::UnsupportedSchemaVersion).with_message(format!(
                    "snapshot schema version {} is not supported (expected {})",
                    found, expected
                ))
            }
            ApiCompatError::MissingField { field } => ExError::new(ExErrorKind::MissingField)
                .with_message(format!("required field `{}` is absent", field)),
            ApiCompatError::DigestMismatch { recorded, computed } => {
                ExError::new(ExErrorKind::DigestMismatch).with_message(format!(
                    "recorded project_digest {} does not match computed {}",
                    recorded, computed
                ))
            }
            ApiCompatError::KeyMismatch { package, key, name } => {
                let err = ExError::new(ExErrorKind::InvariantViolation)
                    .with_symbol(key.clone())
                    .with_message(format!("key '{}' indexes entry named '{}'", key, name));
                match package {
                    Some(package) => err.with_package(package),
                    None => err,
                }
            }
            ApiCompatError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            ApiCompatError::Store { operation, message } => {
                ExError::new(ExErrorKind::Persistence)
                    .with_op(operation)
                    .with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ApiCompatError {
    fn from(err: serde_json::Error) -> Self {
        ApiCompatError::Serialization {
            message: err.to_string(),
        }
    }
}
