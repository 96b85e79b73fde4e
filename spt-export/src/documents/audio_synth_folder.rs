//! `Devices/audiosynthfolder.xml`: the synth device registry
//!
//! ```xml
//! <AudioSynthFolder>
//!   <Attributes>
//!     <List x:id="synthChannels"><UID uid="{slot}"/></List>
//!     <UID x:id="deviceClassID" uid="{class}"/>
//!     <Attributes x:id="deviceData" name="Mai Tai"><UID x:id="uniqueID" uid="{device}"/></Attributes>
//!     <Attributes x:id="ghostData">
//!       <Attributes x:id="classInfo" name="Mai Tai" category="AudioSynth" subCategory="Synth"/>
//!     </Attributes>
//!     <String x:id="presetPath" text="Presets/Synths/Mai Tai.preset"/>
//!   </Attributes>
//! </AudioSynthFolder>
//! ```

use super::UidTag;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "AudioSynthFolder")]
pub struct AudioSynthFolderDocument {
    #[serde(rename = "Attributes", default)]
    pub synths: Vec<SynthElement>,
}

/// One synth slot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SynthElement {
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<DeviceAttributes>,
    #[serde(rename = "UID", default)]
    pub uids: Vec<UidTag>,
    #[serde(rename = "List", default)]
    pub lists: Vec<UidList>,
    #[serde(rename = "String", default)]
    pub strings: Vec<StringTag>,
}

/// `deviceData` / `ghostData` attribute groups
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceAttributes {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "UID", default)]
    pub uids: Vec<UidTag>,
    #[serde(rename = "Attributes", default)]
    pub attributes: Vec<ClassInfo>,
}

/// `classInfo` entry inside `ghostData`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassInfo {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@category", default)]
    pub category: String,
    #[serde(rename = "@subCategory", default)]
    pub sub_category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UidList {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "UID", default)]
    pub uids: Vec<UidTag>,
}

impl UidList {
    /// First non-empty UID in the list
    pub fn first_uid(&self) -> Option<&str> {
        self.uids
            .iter()
            .map(|u| u.uid.as_str())
            .find(|uid| !uid.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StringTag {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@text", default)]
    pub text: String,
}
