//! Domain error types.

use super::investor::InvestorId;

/// Top-level error type for the investors service.
#[derive(Debug, thiserror::Error)]
pub enum InvestorError {
    #[error("data file not found: {path}")]
    MissingFile { path: String },

    #[error("failed to load data at line {line}: {reason}")]
    Load { line: u64, reason: String },

    #[error("Investor with ID {id} not found")]
    NotFound { id: InvestorId },

    #[error("database error: {reason}")]
    Database { reason: String },

    #[error("database query error: {reason}")]
    DatabaseQuery { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&InvestorError> for std::process::ExitCode {
    fn from(err: &InvestorError) -> Self {
        let code: u8 = match err {
            InvestorError::MissingFile { .. } | InvestorError::Io(_) => 1,
            InvestorError::ConfigParse { .. }
            | InvestorError::ConfigMissing { .. }
            | InvestorError::ConfigInvalid { .. } => 2,
            InvestorError::Database { .. } | InvestorError::DatabaseQuery { .. } => 3,
            InvestorError::Load { .. } => 4,
            InvestorError::NotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
