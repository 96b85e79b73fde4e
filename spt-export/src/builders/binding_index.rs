//! Channel binding index from `musictrackdevice.xml`
//!
//! Each instrument channel's `instrumentOut` connection points at
//! `{slot}/Input`. Stripping the `/Input` port yields the device-slot-ID; the
//! channel's own `uniqueID` is the song-object-ID it belongs to.

use super::{insert_reporting_duplicates, malformed};
use crate::documents::music_track_device::{MusicTrackChannel, MusicTrackDeviceDocument};
use crate::documents::uid_for_role;
use crate::models::{BindingEntry, BindingIndex, BuildOutput, Diagnostic};

const SOURCE: &str = "musictrackdevice";

/// Port segment appended to a device slot reference
pub const INPUT_PORT_SUFFIX: &str = "/Input";

/// Build the device-slot-ID → song-object-ID index
pub fn build_binding_index(document: &MusicTrackDeviceDocument) -> BuildOutput<BindingIndex> {
    let mut index = BindingIndex::new();
    let mut diagnostics = Vec::new();

    for channel in document.channels() {
        // Channels without connections are not instrument channels
        if channel.connections.is_empty() {
            continue;
        }

        match binding_entry(channel) {
            Ok(entry) => insert_reporting_duplicates(
                &mut index,
                entry.slot_id.clone(),
                entry,
                SOURCE,
                &mut diagnostics,
            ),
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    tracing::debug!(
        bindings = index.len(),
        skipped = diagnostics.len(),
        "Binding index built"
    );

    BuildOutput::new(index, diagnostics)
}

fn binding_entry(channel: &MusicTrackChannel) -> Result<BindingEntry, Diagnostic> {
    let object_id = channel
        .connections
        .iter()
        .rev()
        .find(|c| c.id == "instrumentOut" && !c.object_id.is_empty())
        .map(|c| c.object_id.as_str())
        .ok_or_else(|| malformed(SOURCE, "", "Object ID is empty"))?;

    let slot_id = slot_id_from_object_id(object_id).ok_or_else(|| {
        malformed(
            SOURCE,
            object_id,
            "Connection target is not an input port reference",
        )
    })?;

    let song_id = uid_for_role(&channel.uids, "uniqueID")
        .ok_or_else(|| malformed(SOURCE, slot_id, "Song ID is empty"))?;

    Ok(BindingEntry {
        slot_id: slot_id.to_string(),
        song_id: song_id.to_string(),
    })
}

/// Strip the trailing `/Input` port from a connection target
pub fn slot_id_from_object_id(object_id: &str) -> Option<&str> {
    object_id
        .strip_suffix(INPUT_PORT_SUFFIX)
        .filter(|slot| !slot.is_empty())
}
