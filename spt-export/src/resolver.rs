//! Join engine: devices → bindings → songs → folder paths
//!
//! The device index drives the join. A device that cannot be bound to a song
//! is dropped with a diagnostic. Records are either complete or absent.

use crate::models::preset_record::{safe_segment, sanitize_name};
use crate::models::{
    BindingIndex, BuildOutput, DeviceIndex, Diagnostic, DiagnosticKind, FolderIndex, PresetRecord,
    PresetSet, SongIndex,
};
use std::collections::HashSet;

const SOURCE: &str = "resolver";

/// Result of walking the folder hierarchy for one track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPath {
    /// `/`-joined names from the root down to the track's parent folder
    pub path: String,
    /// Missing folder, cycle and rewritten-name reports from the walk
    pub diagnostics: Vec<Diagnostic>,
}

/// Join the four indexes into preset records keyed by device-slot-ID
pub fn resolve(
    devices: &DeviceIndex,
    bindings: &BindingIndex,
    songs: &SongIndex,
    folders: &FolderIndex,
) -> BuildOutput<PresetSet> {
    let mut presets = PresetSet::new();
    let mut diagnostics = Vec::new();

    for device in devices.values() {
        let Some(binding) = bindings.get(&device.slot_id) else {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::JoinMiss,
                    SOURCE,
                    "Music Track Device not found for synth",
                )
                .with_subject(device.slot_id.as_str()),
            );
            continue;
        };

        let Some(song) = songs.get(&binding.song_id) else {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::JoinMiss,
                    SOURCE,
                    format!("Song not found for channel {}", binding.song_id),
                )
                .with_subject(device.slot_id.as_str()),
            );
            continue;
        };

        let folder_path = resolve_folder_path(&song.parent_track_id, folders);
        diagnostics.extend(folder_path.diagnostics);

        let display_name = sanitize_name(&song.name);
        if safe_segment(&display_name) != display_name {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::UnsafeName,
                    SOURCE,
                    format!("Track name {:?} rewritten for the artifact file name", song.name),
                )
                .with_subject(device.slot_id.as_str()),
            );
        }

        let record = PresetRecord {
            class_id: device.class_id.clone(),
            base_name: device.base_name.clone(),
            category: device.category.clone(),
            sub_category: device.sub_category.clone(),
            device_name: device.device_name.clone(),
            device_uid: device.device_uid.clone(),
            track_id: song.track_id.clone(),
            preset_file_name: device.preset_file_name.clone(),
            name: song.name.clone(),
            folder_path: folder_path.path,
            song_id: binding.song_id.clone(),
        };

        if presets.insert(device.slot_id.clone(), record).is_some() {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::DuplicateKey,
                    SOURCE,
                    "Device slot resolved twice, keeping the last record",
                )
                .with_subject(device.slot_id.as_str()),
            );
        }
    }

    tracing::debug!(
        devices = devices.len(),
        presets = presets.len(),
        diagnostics = diagnostics.len(),
        "Preset records resolved"
    );

    BuildOutput::new(presets, diagnostics)
}

/// Walk from `parent_track_id` to the root of the folder hierarchy
///
/// - Empty start: empty path (output root).
/// - Missing folder: the walk stops there and the missing node contributes an
///   empty segment.
/// - Revisited track-ID: the hierarchy is cyclic and the path falls back to
///   the root.
/// - Names that are not a single plain path component (`..`, `a/b`) are
///   rewritten with [`safe_segment`].
pub fn resolve_folder_path(parent_track_id: &str, folders: &FolderIndex) -> FolderPath {
    let mut names: Vec<String> = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = parent_track_id;
    let mut diagnostics = Vec::new();

    while !current.is_empty() {
        if !visited.insert(current) {
            diagnostics.retain(|d: &Diagnostic| d.kind != DiagnosticKind::UnsafeName);
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::FolderCycle,
                    SOURCE,
                    format!(
                        "Folder hierarchy starting at {} is cyclic, placing at root",
                        parent_track_id
                    ),
                )
                .with_subject(current),
            );
            return FolderPath {
                path: String::new(),
                diagnostics,
            };
        }

        match folders.get(current) {
            Some(folder) => {
                let name = safe_segment(&folder.name);
                if name != folder.name {
                    diagnostics.push(
                        Diagnostic::new(
                            DiagnosticKind::UnsafeName,
                            SOURCE,
                            format!("Folder name {:?} rewritten to {:?}", folder.name, name),
                        )
                        .with_subject(current),
                    );
                }
                names.push(name);
                current = &folder.parent_track_id;
            }
            None => {
                names.push(String::new());
                diagnostics.push(
                    Diagnostic::new(DiagnosticKind::UnresolvedFolder, SOURCE, "Folder not found for track")
                        .with_subject(current),
                );
                break;
            }
        }
    }

    names.reverse();
    FolderPath {
        path: names.join("/"),
        diagnostics,
    }
}
