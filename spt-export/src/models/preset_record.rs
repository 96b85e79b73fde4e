//! Fully resolved preset records

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything needed to package one instrument preset
///
/// Built only by the resolver; the packager reads it and never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetRecord {
    pub class_id: String,
    pub base_name: String,
    pub category: String,
    pub sub_category: String,
    pub device_name: String,
    pub device_uid: String,
    pub track_id: String,
    pub preset_file_name: String,
    /// Track display name, used as the artifact title and file name
    pub name: String,
    /// `/`-joined folder path from the output root, empty for root placement
    pub folder_path: String,
    /// Owning song-object-ID
    pub song_id: String,
}

impl PresetRecord {
    /// Display name with every `"` spelled out as ` inch`
    pub fn sanitized_name(&self) -> String {
        sanitize_name(&self.name)
    }

    /// Artifact file name, `<sanitized name>.instrument`
    pub fn artifact_file_name(&self) -> String {
        format!("{}.instrument", safe_segment(&self.sanitized_name()))
    }

    /// Artifact path relative to the output root
    ///
    /// Every component is a plain name, so the path never leaves the root.
    pub fn artifact_relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.folder_path.split('/').filter(|s| !s.is_empty()) {
            path.push(safe_segment(segment));
        }
        path.push(self.artifact_file_name());
        path
    }
}

/// Replace `"` (inch marks in names like `7" Kick`) with ` inch`
pub fn sanitize_name(name: &str) -> String {
    name.replace('"', " inch")
}

/// Rewrite a name so it is usable as exactly one path component
///
/// Path separators and control characters become `_`. A name made only of
/// dots (`.`, `..`) has every dot replaced. Safe names come back unchanged.
pub fn safe_segment(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') || c.is_control() { '_' } else { c })
        .collect();

    if !replaced.is_empty() && replaced.chars().all(|c| c == '.') {
        "_".repeat(replaced.len())
    } else {
        replaced
    }
}

/// Resolved records keyed by device-slot-ID
pub type PresetSet = BTreeMap<String, PresetRecord>;
