use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the archive insights tool.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A record's `Date` string did not match the archive's fixed format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A record inside a section list carries no `Date` field at all.
    #[error("Record has no Date field")]
    MissingDate,

    /// An ingest submission named a file with an empty file name.
    #[error("Archive file name is empty")]
    EmptyFileName,

    /// The given archive file does not exist.
    #[error("Archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// The store directory holds no ingested archives.
    #[error("No archives found in {0}")]
    NoArchives(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;
