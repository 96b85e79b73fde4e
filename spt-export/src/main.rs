//! Studio One Preset Tool (spt-export) - Main entry point
//!
//! Reads a `.song` project and writes one `.instrument` file per instrument
//! track preset.

use anyhow::{Context, Result};
use clap::Parser;
use spt_common::config::load_optional_toml_config;
use spt_export::cli::Args;
use spt_export::{logging, pipeline, RunReport};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing before reading the config file so its logs are kept
    let rust_log = std::env::var("RUST_LOG").ok();
    let (startup_filter, from_env) = logging::startup_filter(rust_log.as_deref());
    let (filter, filter_handle) = reload::Layer::new(startup_filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let file_config = load_optional_toml_config(args.config.as_deref())
        .context("Failed to load configuration file")?;
    if let Some(filter) = logging::configured_filter(from_env, &file_config.logging.level) {
        filter_handle
            .reload(filter)
            .context("Failed to apply configured log level")?;
    }

    info!("Starting Studio One Preset Tool v{}", env!("CARGO_PKG_VERSION"));

    let config = args
        .into_config(&file_config)
        .context("Invalid configuration")?;

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel.clone()));

    let mut report = RunReport::new(&config);
    let result = pipeline::run(&config, &cancel, &mut report).await;

    if let Err(e) = &result {
        error!("Export failed: {}", e);
        report.error = Some(e.to_string());
    }

    if let Some(path) = &config.report_path {
        report
            .write_json(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    result.context("Export failed")?;
    Ok(())
}

/// Cancel the export on Ctrl+C or SIGTERM
///
/// Presets already being packaged finish; no new ones start.
async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, cancelling export");
        },
        _ = terminate => {
            info!("Received terminate signal, cancelling export");
        },
    }
    cancel.cancel();
}
