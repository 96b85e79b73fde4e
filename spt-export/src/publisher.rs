//! Publication of the staged output tree into the configured output root
//!
//! Artifacts are packaged into a staging tree first and moved into place only
//! after every record succeeded, so a failed run leaves the old output alone.

use crate::error::{ExportError, ExportResult};
use std::path::Path;
use walkdir::WalkDir;

/// Move every file under `staged_root` into `out_root`
///
/// With `remove_existing`, `out_root` is deleted first. This is destructive and
/// intentional: the output is a generated preset set, not user data. Without
/// it, staged files replace same-named files and everything else is kept.
///
/// Returns the number of files published.
pub fn publish(staged_root: &Path, out_root: &Path, remove_existing: bool) -> ExportResult<usize> {
    let publish_error = |source: std::io::Error| ExportError::Publish {
        path: out_root.to_path_buf(),
        source,
    };

    if remove_existing && out_root.exists() {
        tracing::info!(path = %out_root.display(), "Removing existing output");
        std::fs::remove_dir_all(out_root).map_err(publish_error)?;
    }
    std::fs::create_dir_all(out_root).map_err(publish_error)?;

    if !staged_root.exists() {
        return Ok(0);
    }

    let mut published = 0;
    for entry in WalkDir::new(staged_root).min_depth(1) {
        let entry = entry.map_err(|e| publish_error(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(staged_root)
            .map_err(|e| publish_error(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
        let dest = out_root.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(publish_error)?;
        }

        move_file(entry.path(), &dest).map_err(publish_error)?;
        published += 1;
    }

    tracing::info!(files = published, path = %out_root.display(), "Output published");
    Ok(published)
}

/// Rename, falling back to copy + delete across filesystems
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_error) => {
            tracing::debug!(error = %rename_error, "Rename failed, copying instead");
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}
