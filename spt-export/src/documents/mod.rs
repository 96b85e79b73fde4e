//! Typed models of the XML documents inside a Studio One project
//!
//! Only the elements and attributes the builders read are modelled; anything
//! else in the documents is ignored during deserialization. Role identifiers
//! are written as `x:id`; attribute names match on their local part, so the
//! models use `@id`.

pub mod audio_synth_folder;
pub mod music_track_device;
pub mod song;

pub use audio_synth_folder::AudioSynthFolderDocument;
pub use music_track_device::MusicTrackDeviceDocument;
pub use song::SongDocument;

use crate::error::{ExportError, ExportResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Device registry, relative to the extracted container root
pub const AUDIO_SYNTH_FOLDER_PATH: [&str; 2] = ["Devices", "audiosynthfolder.xml"];
/// Channel bindings, relative to the extracted container root
pub const MUSIC_TRACK_DEVICE_PATH: [&str; 2] = ["Devices", "musictrackdevice.xml"];
/// Track hierarchy, relative to the extracted container root
pub const SONG_PATH: [&str; 2] = ["Song", "song.xml"];
/// Directory holding raw synth preset payloads
pub const PRESET_PAYLOAD_DIR: [&str; 2] = ["Presets", "Synths"];

/// Join a fixed relative location onto the extracted container root
pub fn document_path(root: &Path, relative: &[&str]) -> PathBuf {
    relative.iter().fold(root.to_path_buf(), |path, part| path.join(part))
}

/// `<UID x:id="..." uid="..."/>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UidTag {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@uid", default)]
    pub uid: String,
}

/// Find the `uid` of the last tag whose role identifier is `role`
///
/// Repeated roles resolve to the last occurrence, matching how the project
/// writer overrides earlier values.
pub(crate) fn uid_for_role<'a>(tags: &'a [UidTag], role: &str) -> Option<&'a str> {
    tags.iter()
        .rev()
        .find(|t| t.id == role && !t.uid.is_empty())
        .map(|t| t.uid.as_str())
}

/// Parse an XML document from a string
pub fn parse_document<T: DeserializeOwned>(xml: &str, path: &Path) -> ExportResult<T> {
    quick_xml::de::from_str(xml).map_err(|e| ExportError::DocumentParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse an XML document from disk
pub fn read_document<T: DeserializeOwned>(path: &Path) -> ExportResult<T> {
    tracing::debug!(path = %path.display(), "Reading XML document");

    let xml = std::fs::read_to_string(path)
        .map_err(|e| ExportError::DocumentOpen(path.to_path_buf(), e))?;

    parse_document(&xml, path)
}
