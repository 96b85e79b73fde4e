//! `metainfo.xml` and `presetparts.xml` synthesis

use crate::models::PresetRecord;
use serde::Serialize;

/// Creator and generator recorded in every generated preset
pub const TOOL_NAME: &str = "Studio One Preset Tool";

pub const META_INFO_FILE_NAME: &str = "metainfo.xml";
pub const PRESET_PARTS_FILE_NAME: &str = "presetparts.xml";

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaAttribute {
    #[serde(rename = "@id")]
    pub id: &'static str,
    #[serde(rename = "@value")]
    pub value: String,
}

impl MetaAttribute {
    fn new(id: &'static str, value: &str) -> Self {
        Self {
            id,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "MetaInformation")]
pub struct MetaInformation {
    #[serde(rename = "Attribute")]
    pub attributes: Vec<MetaAttribute>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename = "PresetParts")]
pub struct PresetParts {
    #[serde(rename = "PresetPart")]
    pub parts: Vec<PresetPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetPart {
    #[serde(rename = "Attribute")]
    pub attributes: Vec<MetaAttribute>,
}

/// Class and device slot attributes shared by both documents
fn slot_attributes(record: &PresetRecord) -> Vec<MetaAttribute> {
    vec![
        MetaAttribute::new("Class:ID", &record.class_id),
        MetaAttribute::new("Class:Name", &record.base_name),
        MetaAttribute::new("Class:Category", &record.category),
        MetaAttribute::new("Class:SubCategory", &record.sub_category),
        MetaAttribute::new("DeviceSlot:deviceName", &record.device_name),
        MetaAttribute::new("DeviceSlot:deviceUID", &record.device_uid),
        MetaAttribute::new("DeviceSlot:slotUID", &record.track_id),
    ]
}

pub fn meta_information(record: &PresetRecord) -> MetaInformation {
    let mut attributes = slot_attributes(record);
    attributes.extend([
        MetaAttribute::new("Document:Title", &record.name),
        MetaAttribute::new("Document:Creator", TOOL_NAME),
        MetaAttribute::new("Document:Generator", TOOL_NAME),
    ]);
    MetaInformation { attributes }
}

pub fn preset_parts(record: &PresetRecord) -> PresetParts {
    let mut attributes = slot_attributes(record);
    attributes.extend([
        MetaAttribute::new("AudioSynth:IsMainPreset", "1"),
        MetaAttribute::new("Preset:DataFile", &record.preset_file_name),
    ]);
    PresetParts {
        parts: vec![PresetPart { attributes }],
    }
}

/// Serialize with the XML declaration and two-space indentation
pub fn to_xml_string<T: Serialize>(document: &T) -> Result<String, String> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document.serialize(serializer).map_err(|e| e.to_string())?;

    Ok(format!("{}\n{}\n", XML_HEADER, body))
}
