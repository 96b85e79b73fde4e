//! End-to-end export run
//!
//! validate → extract container → build indexes → resolve → package into a
//! staged tree → publish. Nothing under the output root changes unless every
//! record packaged successfully.

use crate::config::ExportConfig;
use crate::container::extract_container;
use crate::documents::{
    self, document_path, AudioSynthFolderDocument, MusicTrackDeviceDocument, SongDocument,
};
use crate::error::{ExportError, ExportResult};
use crate::models::{
    BindingIndex, BuildOutput, DeviceIndex, Diagnostic, FolderIndex, PresetSet, SongIndex,
};
use crate::packager::Packager;
use crate::publisher::publish;
use crate::report::RunReport;
use crate::{builders, resolver};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

const WORK_DIR_PREFIX: &str = "studio-one-preset-tool-";

/// Private per-run working directory, removed on drop
struct WorkDir {
    _temp_dir: TempDir,
    contents: PathBuf,
    staging: PathBuf,
    output: PathBuf,
}

impl WorkDir {
    fn create() -> ExportResult<Self> {
        let temp_dir = tempfile::Builder::new().prefix(WORK_DIR_PREFIX).tempdir()?;
        let root = temp_dir.path();

        let work_dir = Self {
            contents: root.join("song-contents"),
            staging: root.join("preset-construction"),
            output: root.join("output"),
            _temp_dir: temp_dir,
        };
        for dir in [&work_dir.contents, &work_dir.staging, &work_dir.output] {
            std::fs::create_dir_all(dir)?;
        }

        tracing::debug!(path = %work_dir._temp_dir.path().display(), "Working directory created");
        Ok(work_dir)
    }
}

/// The four indexes built from an extracted project
#[derive(Debug, Clone, Default)]
pub struct ProjectIndexes {
    pub devices: DeviceIndex,
    pub bindings: BindingIndex,
    pub songs: SongIndex,
    pub folders: FolderIndex,
}

/// Parse the project documents under `root` and build every index
///
/// A document that cannot be read or parsed fails the load; skipped elements
/// are appended to `diagnostics`.
pub fn load_indexes(root: &Path, diagnostics: &mut Vec<Diagnostic>) -> ExportResult<ProjectIndexes> {
    let synths: AudioSynthFolderDocument =
        documents::read_document(&document_path(root, &documents::AUDIO_SYNTH_FOLDER_PATH))?;
    let channels: MusicTrackDeviceDocument =
        documents::read_document(&document_path(root, &documents::MUSIC_TRACK_DEVICE_PATH))?;
    let song: SongDocument = documents::read_document(&document_path(root, &documents::SONG_PATH))?;

    let indexes = ProjectIndexes {
        devices: builders::build_device_index(&synths).drain_into(diagnostics),
        bindings: builders::build_binding_index(&channels).drain_into(diagnostics),
        songs: builders::build_song_index(&song).drain_into(diagnostics),
        folders: builders::build_folder_index(&song).drain_into(diagnostics),
    };

    tracing::info!(
        devices = indexes.devices.len(),
        bindings = indexes.bindings.len(),
        songs = indexes.songs.len(),
        folders = indexes.folders.len(),
        "Project indexes built"
    );
    Ok(indexes)
}

/// Load indexes from an extracted project and join them into preset records
pub fn resolve_project(root: &Path) -> ExportResult<BuildOutput<PresetSet>> {
    let mut diagnostics = Vec::new();
    let indexes = load_indexes(root, &mut diagnostics)?;

    let presets = resolver::resolve(
        &indexes.devices,
        &indexes.bindings,
        &indexes.songs,
        &indexes.folders,
    )
    .drain_into(&mut diagnostics);

    Ok(BuildOutput::new(presets, diagnostics))
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        tracing::warn!(
            kind = %diagnostic.kind,
            source = diagnostic.source,
            subject = diagnostic.subject.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
    }
}

/// Run a full export, filling `report` as it goes
pub async fn run(
    config: &ExportConfig,
    cancel: &CancellationToken,
    report: &mut RunReport,
) -> ExportResult<()> {
    config.validate()?;
    let work_dir = WorkDir::create()?;

    let container = config.input.full.clone();
    let contents = work_dir.contents.clone();
    let entries = tokio::task::spawn_blocking(move || extract_container(&container, &contents))
        .await
        .map_err(|e| ExportError::Common(spt_common::Error::Internal(e.to_string())))??;
    tracing::info!(song = %config.input.file_name, entries, "Song extracted");

    let BuildOutput {
        index: presets,
        diagnostics,
    } = resolve_project(&work_dir.contents)?;
    log_diagnostics(&diagnostics);
    report.diagnostics = diagnostics;

    let mut planned: Vec<PathBuf> = presets
        .values()
        .map(|record| record.artifact_relative_path())
        .collect();
    planned.sort();
    planned.dedup();
    report.planned = planned;

    tracing::info!(presets = presets.len(), "Presets resolved");

    if config.dry_run {
        for path in &report.planned {
            tracing::info!("Would create {}", path.display());
        }
        report.success = true;
        return Ok(());
    }

    let payload_dir = document_path(&work_dir.contents, &documents::PRESET_PAYLOAD_DIR);
    let packager = Packager::new(
        payload_dir,
        &work_dir.staging,
        &work_dir.output,
        config.workers,
    );
    let summary = packager.package(&presets, cancel).await?;

    publish(&work_dir.output, &config.out_path, config.remove_existing)?;
    report.artifacts = summary.artifacts;
    report.success = true;

    tracing::info!(
        artifacts = report.artifacts.len(),
        output = %config.out_path.display(),
        "Export complete"
    );
    Ok(())
}
