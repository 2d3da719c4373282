//! Error types for listening-history

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid year selector '{0}': expected \"All Time\" or a year")]
    InvalidYear(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to produce any table at all from an input directory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("no input files found in {}", dir.display())]
    NoInputFiles { dir: PathBuf },

    #[error("all {failed} input files in {} failed to parse", dir.display())]
    AllFilesFailed { dir: PathBuf, failed: usize },
}

/// Why a single record was dropped during load.
///
/// Row errors never abort a load; they are counted in the load summary.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("negative ms_played: {0}")]
    NegativeDuration(i64),

    #[error("unparseable timestamp '{0}'")]
    Timestamp(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid year selector error
    pub fn invalid_year(selector: impl Into<String>) -> Self {
        Self::InvalidYear(selector.into())
    }
}
