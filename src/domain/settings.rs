//! Resolved runtime settings.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::InvestorError;

pub const DEFAULT_DATA_FILE: &str = "data.csv";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8000";
pub const DEFAULT_POOL_SIZE: u32 = 4;
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

/// Where the HTTP layer reads investors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown backend '{other}' (expected memory or sqlite)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub sqlite_path: Option<PathBuf>,
    pub pool_size: u32,
    pub listen: SocketAddr,
    pub backend: Backend,
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
}

/// Relative paths are taken from `base_dir`; absolute paths pass through.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Split a comma separated origin list, dropping blanks.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn default_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> InvestorError {
    InvestorError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: reason.into(),
    }
}
