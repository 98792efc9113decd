/// Errors raised by any step of a run.
///
/// Every variant is fatal: the run stops at the first error and the binary
/// maps it to a non-zero exit status.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeBatchError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Write error during {step}: {message}")]
    Write { step: &'static str, message: String },

    #[error("Read error during {step}: {message}")]
    Read { step: &'static str, message: String },

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Invalid batch size {0}: batch size must be positive")]
    InvalidBatchSize(usize),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EmployeeBatchError {
    pub fn write(step: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Write {
            step,
            message: error.to_string(),
        }
    }

    pub fn read(step: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Read {
            step,
            message: error.to_string(),
        }
    }

    /// Short label for the step that failed, used in the process diagnostic.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connect",
            Self::Schema(_) => "create schema",
            Self::Write { step, .. } | Self::Read { step, .. } => step,
            Self::Codec(_) => "encode/decode metadata",
            Self::InvalidBatchSize(_) => "partition batches",
            Self::Configuration(_) => "load configuration",
        }
    }
}

impl From<serde_json::Error> for EmployeeBatchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Codec(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EmployeeBatchError>;
