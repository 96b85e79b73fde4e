//! Validated export configuration
//!
//! Built once at startup from command line, environment and TOML settings.

use spt_common::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension of Studio One project containers
pub const SONG_EXTENSION: &str = "song";

/// Location of the input `.song` file, split into directory and file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPath {
    pub dir: PathBuf,
    pub file_name: String,
    pub full: PathBuf,
}

impl InputPath {
    /// Parse `<dir>/<name>.song`
    ///
    /// Only the shape of the path is checked here; see [`ExportConfig::validate`].
    pub fn parse(path: &Path) -> Result<Self> {
        let invalid = || Error::Config(format!("No valid in path set: {}", path.display()));

        let is_song = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(SONG_EXTENSION))
            .unwrap_or(false);
        if !is_song {
            return Err(invalid());
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(invalid)?;
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(invalid)?
            .to_path_buf();

        Ok(Self {
            dir,
            file_name,
            full: path.to_path_buf(),
        })
    }
}

/// Everything the pipeline needs to run
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub input: InputPath,
    /// Root of the generated preset tree
    pub out_path: PathBuf,
    /// Purge `out_path` before publishing new artifacts
    pub remove_existing: bool,
    /// Packaging worker pool size
    pub workers: usize,
    /// Resolve and list presets without packaging
    pub dry_run: bool,
    /// Optional JSON run report destination
    pub report_path: Option<PathBuf>,
}

impl ExportConfig {
    pub fn new(
        in_path: &Path,
        out_path: PathBuf,
        remove_existing: bool,
        workers: usize,
    ) -> Result<Self> {
        if out_path.as_os_str().is_empty() {
            return Err(Error::Config("No valid out path set".to_string()));
        }
        if workers == 0 {
            return Err(Error::InvalidInput(
                "Worker count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            input: InputPath::parse(in_path)?,
            out_path,
            remove_existing,
            workers,
            dry_run: false,
            report_path: None,
        })
    }

    /// Check the filesystem preconditions for a run
    pub fn validate(&self) -> Result<()> {
        if !self.input.full.is_file() {
            return Err(Error::Config(format!(
                "Song file not found: {}",
                self.input.full.display()
            )));
        }
        if self.out_path.exists() && !self.out_path.is_dir() {
            return Err(Error::Config(format!(
                "Output path is not a directory: {}",
                self.out_path.display()
            )));
        }
        Ok(())
    }
}

/// Default worker pool size: available CPU parallelism
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
