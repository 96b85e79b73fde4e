//! Song and folder indexes from `song.xml`

use super::{insert_reporting_duplicates, malformed};
use crate::documents::song::SongDocument;
use crate::documents::uid_for_role;
use crate::models::{BuildOutput, FolderEntry, FolderIndex, SongEntry, SongIndex};

const SOURCE: &str = "song";

/// Build the song-object-ID → media track index
///
/// Media tracks are keyed by their `channelID` UID, which is the same
/// identifier the channel bindings point at.
pub fn build_song_index(document: &SongDocument) -> BuildOutput<SongIndex> {
    let mut index = SongIndex::new();
    let mut diagnostics = Vec::new();

    for track in document.media_tracks() {
        let Some(song_id) = uid_for_role(&track.uids, "channelID") else {
            diagnostics.push(malformed(SOURCE, &track.track_id, "uid is empty"));
            continue;
        };

        insert_reporting_duplicates(
            &mut index,
            song_id.to_string(),
            SongEntry {
                track_id: track.track_id.clone(),
                name: track.name.clone(),
                parent_track_id: track.parent_folder.clone(),
            },
            SOURCE,
            &mut diagnostics,
        );
    }

    tracing::debug!(
        songs = index.len(),
        skipped = diagnostics.len(),
        "Song index built"
    );

    BuildOutput::new(index, diagnostics)
}

/// Build the track-ID → folder track index
pub fn build_folder_index(document: &SongDocument) -> BuildOutput<FolderIndex> {
    let mut index = FolderIndex::new();
    let mut diagnostics = Vec::new();

    for folder in document.folder_tracks() {
        if folder.name.is_empty() {
            diagnostics.push(malformed(SOURCE, &folder.track_id, "Track name is empty"));
            continue;
        }
        if folder.track_id.is_empty() {
            diagnostics.push(malformed(SOURCE, &folder.name, "Track ID is empty"));
            continue;
        }

        insert_reporting_duplicates(
            &mut index,
            folder.track_id.clone(),
            FolderEntry {
                name: folder.name.clone(),
                parent_track_id: folder.parent_folder.clone(),
            },
            SOURCE,
            &mut diagnostics,
        );
    }

    tracing::debug!(
        folders = index.len(),
        skipped = diagnostics.len(),
        "Folder index built"
    );

    BuildOutput::new(index, diagnostics)
}
