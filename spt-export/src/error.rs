//! Error types for spt-export
//!
//! Document and container failures are fatal to the run. Packaging failures
//! are collected per record and surfaced together once every worker is done.

use crate::packager::PackageSummary;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while packaging a single preset record
#[derive(Debug, Error)]
pub enum PackageError {
    /// Could not create the per-record staging directory
    #[error("Failed to create staging directory {}: {1}", .0.display())]
    Staging(PathBuf, #[source] std::io::Error),

    /// Raw preset payload could not be copied
    #[error("Failed to copy preset payload {}: {1}", .0.display())]
    CopyPayload(PathBuf, #[source] std::io::Error),

    /// Metadata document could not be serialized or written
    #[error("Failed to write metadata document {}: {message}", .path.display())]
    Metadata { path: PathBuf, message: String },

    /// Archive could not be assembled
    #[error("Failed to write archive {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    /// Blocking worker panicked or was aborted
    #[error("Packaging task failed: {0}")]
    Task(String),
}

/// One failed record in an aggregated packaging error
#[derive(Debug)]
pub struct RecordFailure {
    /// Device-slot-ID of the failed record
    pub slot_id: String,
    /// Display name of the failed record
    pub name: String,
    pub error: PackageError,
}

/// Export error type
#[derive(Debug, Error)]
pub enum ExportError {
    /// Input document could not be opened
    #[error("Error opening XML file {}: {1}", .0.display())]
    DocumentOpen(PathBuf, #[source] std::io::Error),

    /// Input document could not be parsed into its typed model
    #[error("Error unmarshalling XML {}: {message}", .path.display())]
    DocumentParse { path: PathBuf, message: String },

    /// Project container could not be opened or unpacked
    #[error("Error extracting project {}: {message}", .path.display())]
    Container { path: PathBuf, message: String },

    /// At least one record failed to package
    #[error("{} of {total} presets failed to package{}", .failures.len(), first_failure(.failures))]
    Packaging {
        total: usize,
        failures: Vec<RecordFailure>,
    },

    /// Cancellation requested before all records were dispatched
    #[error(
        "Export cancelled after {} of {} presets ({} skipped)",
        .summary.dispatched,
        .summary.total,
        .summary.skipped
    )]
    Cancelled { summary: PackageSummary },

    /// Staged output could not be published into the output directory
    #[error("Failed to publish output to {}: {source}", .path.display())]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// spt-common error
    #[error("Common error: {0}")]
    Common(#[from] spt_common::Error),
}

fn first_failure(failures: &[RecordFailure]) -> String {
    failures
        .first()
        .map(|f| format!(" (first: {} \"{}\": {})", f.slot_id, f.name, f.error))
        .unwrap_or_default()
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;
