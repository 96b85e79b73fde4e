//! spt-export library interface
//!
//! Extracts instrument presets from a Studio One `.song` project into
//! standalone `.instrument` files laid out by the song's folder tracks.

pub mod builders;
pub mod cli;
pub mod config;
pub mod container;
pub mod documents;
pub mod error;
pub mod logging;
pub mod models;
pub mod packager;
pub mod pipeline;
pub mod publisher;
pub mod report;
pub mod resolver;

pub use crate::config::ExportConfig;
pub use crate::error::{ExportError, ExportResult, PackageError};
pub use crate::models::{Diagnostic, DiagnosticKind, PresetRecord, PresetSet};
pub use crate::report::RunReport;
