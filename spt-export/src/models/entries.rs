//! Index entries produced by the map builders
//!
//! Each index is keyed by its own identifier namespace. The resolver joins
//! them on device-slot-ID and song-object-ID only.

use std::collections::HashMap;

/// Media track entry, keyed by song-object-ID (the track's `channelID`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongEntry {
    pub track_id: String,
    /// Display name of the track
    pub name: String,
    /// Track-ID of the enclosing folder track, empty at root level
    pub parent_track_id: String,
}

/// Folder track entry, keyed by track-ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    /// Track-ID of the enclosing folder track, empty at root level
    pub parent_track_id: String,
}

/// Synth slot entry from the device registry, keyed by device-slot-ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEntry {
    pub slot_id: String,
    pub class_id: String,
    pub device_name: String,
    pub device_uid: String,
    pub category: String,
    pub sub_category: String,
    /// Canonical plug-in name from the ghost data class info
    pub base_name: String,
    /// Preset path as recorded in the project
    pub preset_path: String,
    /// Final segment of `preset_path`
    pub preset_file_name: String,
}

/// Edge from a device slot to the channel (song object) that plays it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    pub slot_id: String,
    pub song_id: String,
}

pub type SongIndex = HashMap<String, SongEntry>;
pub type FolderIndex = HashMap<String, FolderEntry>;
pub type DeviceIndex = HashMap<String, DeviceEntry>;
pub type BindingIndex = HashMap<String, BindingEntry>;
