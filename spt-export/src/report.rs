//! JSON run report

use crate::config::ExportConfig;
use crate::models::Diagnostic;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of one export run, written with `--report`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    /// Artifact paths the resolved records map to, relative to `output`
    pub planned: Vec<PathBuf>,
    /// Artifacts actually published, relative to `output`
    pub artifacts: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            input: config.input.full.clone(),
            output: config.out_path.clone(),
            dry_run: config.dry_run,
            planned: Vec::new(),
            artifacts: Vec::new(),
            diagnostics: Vec::new(),
            success: false,
            error: None,
        }
    }

    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
    }
}
