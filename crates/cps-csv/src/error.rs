//! Error types for CSV import and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an import or export operation.
///
/// Per-field problems (an unparseable date, an unknown header) are not
/// represented here; they are logged and the field is skipped.
#[derive(Debug, Error)]
pub enum CsvError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// File I/O error.
    #[error("failed to {operation} file {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be moved over the destination.
    #[error("failed to replace {target_path} with {temp_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Malformed CSV (wrong column count, invalid UTF-8, ...).
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No header line before the data.
    #[error("no header row in {path}")]
    MissingHeader { path: PathBuf },

    // === Export Errors ===
    /// Export was called without any records.
    #[error("no data to export")]
    NoData,

    /// A record carried a column the batch header does not have.
    #[error("column '{column}' is not part of the exported header")]
    UnknownExportColumn { column: String },

    // === Configuration Errors ===
    /// A delimiter, quote or comment character outside ASCII.
    #[error("{name} must be a single ASCII character, got '{value}'")]
    InvalidOption { name: &'static str, value: char },

    /// Two of delimiter, quote and comment share a character.
    #[error("{first} and {second} must differ, both are '{value}'")]
    ConflictingOptions {
        first: &'static str,
        second: &'static str,
        value: char,
    },

    /// A date format string chrono cannot use.
    #[error("invalid date format '{format}'")]
    InvalidDateFormat { format: String },

    /// Configuration file could not be parsed.
    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl CsvError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::io("open", path, source)
        }
    }
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;
