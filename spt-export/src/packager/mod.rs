//! Preset packaging: one `.instrument` archive per resolved record
//!
//! Each record is staged in its own freshly created directory, so records
//! never touch each other's intermediate files even when identifiers repeat.
//! Records are processed on a fixed-size worker pool; the blocking filesystem
//! and compression work runs on tokio's blocking threads.
//!
//! Per record:
//! 1. Create a unique directory under `<staging>`
//! 2. Copy the raw preset payload into it
//! 3. Write `metainfo.xml`
//! 4. Write `presetparts.xml`
//! 5. Sanitize the display name
//! 6. Zip the staging directory to `<output>/<folder path>/<name>.instrument`

pub mod archive;
pub mod metadata;

use crate::error::{ExportError, ExportResult, PackageError, RecordFailure};
use crate::models::{PresetRecord, PresetSet};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Outcome of a packaging run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageSummary {
    /// Records submitted
    pub total: usize,
    /// Records handed to workers
    pub dispatched: usize,
    /// Records never started because of cancellation
    pub skipped: usize,
    /// Artifact paths relative to the output root, sorted
    pub artifacts: Vec<PathBuf>,
}

/// Packages preset records into `.instrument` archives
#[derive(Debug, Clone)]
pub struct Packager {
    /// Directory holding the raw preset payloads referenced by file name
    payload_dir: PathBuf,
    /// Parent of the per-record staging directories
    staging_root: PathBuf,
    /// Root of the artifact tree
    output_root: PathBuf,
    workers: usize,
}

impl Packager {
    /// Create a packager; `workers` is clamped to at least one
    pub fn new(
        payload_dir: impl Into<PathBuf>,
        staging_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        workers: usize,
    ) -> Self {
        Self {
            payload_dir: payload_dir.into(),
            staging_root: staging_root.into(),
            output_root: output_root.into(),
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Package every record, waiting for all dispatched work to finish
    ///
    /// Any failed record fails the whole operation, but artifacts written for
    /// other records stay in place. When `cancel` fires, no further records are
    /// dispatched; records already in flight run to completion.
    pub async fn package(
        &self,
        records: &PresetSet,
        cancel: &CancellationToken,
    ) -> ExportResult<PackageSummary> {
        let total = records.len();
        warn_on_shared_destinations(records);

        tracing::info!(
            presets = total,
            workers = self.workers,
            output = %self.output_root.display(),
            "Packaging presets"
        );

        let dispatched = Arc::new(AtomicUsize::new(0));

        let results: Vec<(String, String, Result<PathBuf, PackageError>)> =
            stream::iter(records.iter())
                .take_while(|_| futures::future::ready(!cancel.is_cancelled()))
                .map(|(slot_id, record)| {
                    let packager = self.clone();
                    let record = record.clone();
                    let slot_id = slot_id.clone();
                    let dispatched = dispatched.clone();

                    async move {
                        dispatched.fetch_add(1, Ordering::Relaxed);
                        let name = record.name.clone();

                        let result = tokio::task::spawn_blocking(move || {
                            packager.package_record(&record)
                        })
                        .await
                        .map_err(|e| PackageError::Task(e.to_string()))
                        .and_then(|r| r);

                        (slot_id, name, result)
                    }
                })
                .buffer_unordered(self.workers)
                .collect()
                .await;

        let mut artifacts = Vec::new();
        let mut failures = Vec::new();
        for (slot_id, name, result) in results {
            match result {
                Ok(path) => artifacts.push(path),
                Err(error) => {
                    tracing::error!(slot_id = %slot_id, name = %name, error = %error, "Preset packaging failed");
                    failures.push(RecordFailure {
                        slot_id,
                        name,
                        error,
                    });
                }
            }
        }
        artifacts.sort();

        let dispatched = dispatched.load(Ordering::Relaxed);
        let summary = PackageSummary {
            total,
            dispatched,
            skipped: total - dispatched,
            artifacts,
        };

        if summary.skipped > 0 {
            tracing::warn!(dispatched, skipped = summary.skipped, total, "Packaging cancelled");
            return Err(ExportError::Cancelled { summary });
        }

        if !failures.is_empty() {
            return Err(ExportError::Packaging { total, failures });
        }

        tracing::info!(artifacts = summary.artifacts.len(), "Packaging complete");
        Ok(summary)
    }

    /// Package a single record; blocking
    ///
    /// Returns the artifact path relative to the output root.
    pub fn package_record(&self, record: &PresetRecord) -> Result<PathBuf, PackageError> {
        std::fs::create_dir_all(&self.staging_root)
            .map_err(|e| PackageError::Staging(self.staging_root.clone(), e))?;
        // Removed on drop, including when a later step fails
        let staging = tempfile::Builder::new()
            .prefix("record-")
            .tempdir_in(&self.staging_root)
            .map_err(|e| PackageError::Staging(self.staging_root.clone(), e))?;
        let staging_dir = staging.path();

        let payload = self.payload_dir.join(&record.preset_file_name);
        std::fs::copy(&payload, staging_dir.join(&record.preset_file_name))
            .map_err(|e| PackageError::CopyPayload(payload.clone(), e))?;

        write_document(
            &staging_dir.join(metadata::META_INFO_FILE_NAME),
            &metadata::meta_information(record),
        )?;
        write_document(
            &staging_dir.join(metadata::PRESET_PARTS_FILE_NAME),
            &metadata::preset_parts(record),
        )?;

        let relative = record.artifact_relative_path();
        archive::compress_dir(staging_dir, &self.output_root.join(&relative))?;

        if let Err(e) = staging.close() {
            tracing::debug!(error = %e, "Could not remove staging directory");
        }

        tracing::info!("Created {}", relative.display());
        Ok(relative)
    }
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), PackageError> {
    let metadata_error = |message: String| PackageError::Metadata {
        path: path.to_path_buf(),
        message,
    };

    let xml = metadata::to_xml_string(document).map_err(metadata_error)?;
    std::fs::write(path, xml).map_err(|e| metadata_error(e.to_string()))
}

/// Warn about records whose artifacts land on the same path
///
/// The last writer wins; which one that is depends on scheduling.
fn warn_on_shared_destinations(records: &PresetSet) {
    let mut destinations: BTreeMap<PathBuf, Vec<&str>> = BTreeMap::new();
    for (slot_id, record) in records {
        destinations
            .entry(record.artifact_relative_path())
            .or_default()
            .push(slot_id);
    }

    for (path, slots) in destinations.iter().filter(|(_, slots)| slots.len() > 1) {
        tracing::warn!(
            path = %path.display(),
            slots = ?slots,
            "Multiple presets share one artifact path, last writer wins"
        );
    }
}
