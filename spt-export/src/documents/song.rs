//! `Song/song.xml`: media tracks and the folder track hierarchy

use super::UidTag;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "Song")]
pub struct SongDocument {
    #[serde(rename = "Attributes", default)]
    pub attributes: SongAttributes,
}

impl SongDocument {
    pub fn media_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.attributes.lists.iter().flat_map(|l| l.media_tracks.iter())
    }

    pub fn folder_tracks(&self) -> impl Iterator<Item = &FolderTrack> {
        self.attributes.lists.iter().flat_map(|l| l.folder_tracks.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongAttributes {
    #[serde(rename = "List", default)]
    pub lists: Vec<TrackList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackList {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "MediaTrack", default)]
    pub media_tracks: Vec<MediaTrack>,
    #[serde(rename = "FolderTrack", default)]
    pub folder_tracks: Vec<FolderTrack>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaTrack {
    #[serde(rename = "@trackID", default)]
    pub track_id: String,
    #[serde(rename = "@parentFolder", default)]
    pub parent_folder: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "UID", default)]
    pub uids: Vec<UidTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderTrack {
    #[serde(rename = "@trackID", default)]
    pub track_id: String,
    #[serde(rename = "@parentFolder", default)]
    pub parent_folder: String,
    #[serde(rename = "@name", default)]
    pub name: String,
}
