//! Project container extraction
//!
//! A `.song` file is a zip archive. It is unpacked into the run's working
//! directory before any document is read.

use crate::error::{ExportError, ExportResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

/// Unpack `container` into `dest`, returning the number of entries
///
/// Entries whose names would escape `dest` are rejected by the zip reader.
pub fn extract_container(container: &Path, dest: &Path) -> ExportResult<usize> {
    let container_error = |message: String| ExportError::Container {
        path: container.to_path_buf(),
        message,
    };

    let file = File::open(container).map_err(|e| container_error(e.to_string()))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| container_error(e.to_string()))?;

    std::fs::create_dir_all(dest)?;
    archive
        .extract(dest)
        .map_err(|e| container_error(e.to_string()))?;

    tracing::debug!(
        container = %container.display(),
        dest = %dest.display(),
        entries = archive.len(),
        "Project container extracted"
    );

    Ok(archive.len())
}
