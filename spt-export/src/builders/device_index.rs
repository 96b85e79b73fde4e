//! Device identity index from `audiosynthfolder.xml`

use super::{insert_reporting_duplicates, malformed};
use crate::documents::audio_synth_folder::{AudioSynthFolderDocument, SynthElement};
use crate::documents::uid_for_role;
use crate::models::{BuildOutput, DeviceEntry, DeviceIndex, Diagnostic};

const SOURCE: &str = "audiosynthfolder";

/// Build the device-slot-ID → device identity index
pub fn build_device_index(document: &AudioSynthFolderDocument) -> BuildOutput<DeviceIndex> {
    let mut index = DeviceIndex::new();
    let mut diagnostics = Vec::new();

    for synth in &document.synths {
        match device_entry(synth) {
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
        devices = index.len(),
        skipped = diagnostics.len(),
        "Device index built"
    );

    BuildOutput::new(index, diagnostics)
}

fn device_entry(synth: &SynthElement) -> Result<DeviceEntry, Diagnostic> {
    let slot_id = synth
        .lists
        .iter()
        .rev()
        .filter(|l| l.id == "synthChannels")
        .find_map(|l| l.first_uid())
        .ok_or_else(|| malformed(SOURCE, "", "Music Track Device ID is empty"))?
        .to_string();

    let class_id = uid_for_role(&synth.uids, "deviceClassID")
        .ok_or_else(|| malformed(SOURCE, &slot_id, "Device Class ID is empty"))?
        .to_string();

    let mut device_name = "";
    let mut device_uid = "";
    let mut category = "";
    let mut sub_category = "";
    let mut base_name = "";

    for group in &synth.attributes {
        match group.id.as_str() {
            "deviceData" => {
                device_name = &group.name;
                if let Some(uid) = uid_for_role(&group.uids, "uniqueID") {
                    device_uid = uid;
                }
            }
            "ghostData" => {
                for info in group.attributes.iter().filter(|a| a.id == "classInfo") {
                    category = &info.category;
                    sub_category = &info.sub_category;
                    base_name = &info.name;
                }
            }
            _ => {}
        }
    }

    let required = [
        (device_name, "Device Name is empty"),
        (device_uid, "Device UID is empty"),
        (category, "Device Category is empty"),
        (sub_category, "Device Sub Category is empty"),
        (base_name, "Device Base Name is empty"),
    ];
    if let Some((_, message)) = required.iter().find(|(value, _)| value.is_empty()) {
        return Err(malformed(SOURCE, &slot_id, message));
    }

    let preset_path = synth
        .strings
        .iter()
        .rev()
        .find(|s| s.id == "presetPath" && !s.text.is_empty())
        .map(|s| s.text.clone())
        .ok_or_else(|| malformed(SOURCE, &slot_id, "Preset Path is empty"))?;

    let preset_file_name = preset_file_name(&preset_path)
        .ok_or_else(|| {
            malformed(
                SOURCE,
                &slot_id,
                &format!("Preset path has no file name segment: {}", preset_path),
            )
        })?
        .to_string();

    Ok(DeviceEntry {
        slot_id,
        class_id,
        device_name: device_name.to_string(),
        device_uid: device_uid.to_string(),
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        base_name: base_name.to_string(),
        preset_path,
        preset_file_name,
    })
}

/// Final `/`-separated segment of a recorded preset path
///
/// A path without any separator, or ending in one, has no usable segment.
pub fn preset_file_name(preset_path: &str) -> Option<&str> {
    preset_path
        .rsplit_once('/')
        .map(|(_, file)| file)
        .filter(|file| !file.is_empty())
}
