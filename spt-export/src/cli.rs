//! Command-line arguments for spt-export

use crate::config::{default_worker_count, ExportConfig};
use clap::Parser;
use spt_common::config::{resolve_setting, TomlConfig};
use spt_common::{Error, Result};
use std::path::PathBuf;

/// Command-line arguments for spt-export
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spt-export")]
#[command(about = "Export Studio One instrument presets from a song file")]
#[command(version)]
pub struct Args {
    /// The path to the song file
    #[arg(long, env = "IN_PATH")]
    pub in_path: Option<PathBuf>,

    /// The path to the output directory
    #[arg(long, env = "OUT_PATH")]
    pub out_path: Option<PathBuf>,

    /// Whether to remove existing files in the output directory
    #[arg(
        long,
        env = "REMOVE_EXISTING",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub remove_existing: Option<bool>,

    /// Number of presets packaged concurrently
    #[arg(short, long, env = "SPT_WORKERS")]
    pub workers: Option<usize>,

    /// TOML config file (defaults to the platform config directory)
    #[arg(short, long, env = "SPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Resolve presets and list planned artifacts without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON run report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Args {
    /// Merge with the config file and validate
    pub fn into_config(self, file: &TomlConfig) -> Result<ExportConfig> {
        let (in_path, in_source) = resolve_setting("in_path", self.in_path, file.in_path.clone(), None)
            .ok_or_else(|| Error::Config("No valid in path set".to_string()))?;
        let (out_path, out_source) =
            resolve_setting("out_path", self.out_path, file.out_path.clone(), None)
                .ok_or_else(|| Error::Config("No valid out path set".to_string()))?;
        let remove_existing = resolve_setting(
            "remove_existing",
            self.remove_existing,
            file.remove_existing,
            Some(false),
        )
        .map(|(value, _)| value)
        .unwrap_or(false);
        let workers = resolve_setting(
            "workers",
            self.workers,
            file.workers,
            Some(default_worker_count()),
        )
        .map(|(value, _)| value)
        .unwrap_or(1);

        tracing::info!(
            in_path = %in_path.display(),
            %in_source,
            out_path = %out_path.display(),
            %out_source,
            remove_existing,
            workers,
            "Configuration resolved"
        );

        let mut config = ExportConfig::new(&in_path, out_path, remove_existing, workers)?;
        config.dry_run = self.dry_run;
        config.report_path = self.report;
        Ok(config)
    }
}
