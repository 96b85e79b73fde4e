//! `Devices/musictrackdevice.xml`: instrument channels and their connections

use super::UidTag;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "MusicTrackDevice")]
pub struct MusicTrackDeviceDocument {
    #[serde(rename = "Attributes", default)]
    pub attributes: ChannelAttributes,
}

impl MusicTrackDeviceDocument {
    /// All channels across every channel group
    pub fn channels(&self) -> impl Iterator<Item = &MusicTrackChannel> {
        self.attributes
            .channel_groups
            .iter()
            .flat_map(|g| g.channels.iter())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelAttributes {
    #[serde(rename = "ChannelGroup", default)]
    pub channel_groups: Vec<ChannelGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelGroup {
    #[serde(rename = "MusicTrackChannel", default)]
    pub channels: Vec<MusicTrackChannel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MusicTrackChannel {
    #[serde(rename = "Connection", default)]
    pub connections: Vec<Connection>,
    #[serde(rename = "UID", default)]
    pub uids: Vec<UidTag>,
}

/// `<Connection x:id="instrumentOut" objectID="{slot}/Input"/>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Connection {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@objectID", default)]
    pub object_id: String,
}
