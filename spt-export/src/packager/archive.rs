//! Zip archive assembly for staged preset directories

use crate::error::PackageError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Compress every file under `src_dir` into a new zip at `dest_file`
///
/// Entry names are relative to `src_dir` and use `/` separators. Entries are
/// written in file-name order so repeated runs produce the same listing.
/// Missing parent directories of `dest_file` are created.
///
/// The archive is assembled in a temporary file beside `dest_file` and renamed
/// over it once complete. Concurrent calls for one destination each publish a
/// whole archive; the last rename wins.
pub fn compress_dir(src_dir: &Path, dest_file: &Path) -> Result<(), PackageError> {
    let archive_error = |message: String| PackageError::Archive {
        path: dest_file.to_path_buf(),
        message,
    };

    let parent = dest_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| archive_error(e.to_string()))?;

    let temp_file = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(parent)
        .map_err(|e| archive_error(e.to_string()))?;
    let mut zip = ZipWriter::new(BufWriter::new(temp_file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(src_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| archive_error(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src_dir)
            .map_err(|e| archive_error(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            zip.add_directory(name, options)
                .map_err(|e| archive_error(e.to_string()))?;
            continue;
        }

        zip.start_file(name, options)
            .map_err(|e| archive_error(e.to_string()))?;
        let mut source = File::open(entry.path()).map_err(|e| archive_error(e.to_string()))?;
        std::io::copy(&mut source, &mut zip).map_err(|e| archive_error(e.to_string()))?;
    }

    let temp_file: NamedTempFile = zip
        .finish()
        .map_err(|e| archive_error(e.to_string()))?
        .into_inner()
        .map_err(|e| archive_error(e.to_string()))?;
    temp_file
        .persist(dest_file)
        .map_err(|e| archive_error(e.error.to_string()))?;
    Ok(())
}
