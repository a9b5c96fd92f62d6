//! Error types for batchgen-build.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for batchgen-build operations.
pub type Result<T> = std::result::Result<T, BatchError>;

/// Errors that can occur while discovering sources or writing the script.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The project directory could not be enumerated.
    #[error("Failed to read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovered source file could not be opened for scanning.
    #[error("Failed to open source file {}: {source}", path.display())]
    SourceFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build script could not be written.
    #[error("Failed to write build script {}: {source}", path.display())]
    ArtifactUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// Failed to serialize a scan report.
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration validation error.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl BatchError {
    /// Title shown with the user-facing notice for this error.
    pub fn title(&self) -> &'static str {
        match self {
            BatchError::DirectoryUnreadable { .. } => "Failed to read directory.",
            BatchError::SourceFileUnreadable { .. } => "Failed to open C++ file.",
            BatchError::ArtifactUnwritable { .. } => "Failed to open batch file.",
            BatchError::ReadConfig { .. }
            | BatchError::ParseToml(_)
            | BatchError::Validation(_) => "Invalid configuration.",
            BatchError::Json(_) => "Failed to encode report.",
        }
    }
}
