//! Builds synthetic `.song` containers

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// One instrument track: synth slot, channel binding and media track
#[derive(Debug, Clone)]
pub struct SynthSpec {
    pub slot_id: String,
    pub class_id: String,
    pub song_id: String,
    pub track_id: String,
    pub name: String,
    pub parent_folder: String,
    pub preset_file: String,
    /// Write the payload into `Presets/Synths`
    pub with_payload: bool,
}

impl SynthSpec {
    pub fn new(slot_id: &str, class_id: &str, song_id: &str, name: &str, parent_folder: &str) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            class_id: class_id.to_string(),
            song_id: song_id.to_string(),
            track_id: format!("track-{}", slot_id),
            name: name.to_string(),
            parent_folder: parent_folder.to_string(),
            preset_file: format!("{}.preset", slot_id),
            with_payload: true,
        }
    }

    pub fn track_id(mut self, track_id: &str) -> Self {
        self.track_id = track_id.to_string();
        self
    }

    pub fn without_payload(mut self) -> Self {
        self.with_payload = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FolderSpec {
    pub track_id: String,
    pub name: String,
    pub parent_folder: String,
}

impl FolderSpec {
    pub fn new(track_id: &str, name: &str, parent_folder: &str) -> Self {
        Self {
            track_id: track_id.to_string(),
            name: name.to_string(),
            parent_folder: parent_folder.to_string(),
        }
    }
}

/// Assembles the three project documents and payloads into a zip
#[derive(Debug, Clone, Default)]
pub struct SongBuilder {
    synths: Vec<SynthSpec>,
    folders: Vec<FolderSpec>,
    song_xml_override: Option<String>,
}

impl SongBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn synth(mut self, synth: SynthSpec) -> Self {
        self.synths.push(synth);
        self
    }

    pub fn folder(mut self, folder: FolderSpec) -> Self {
        self.folders.push(folder);
        self
    }

    /// Replace `Song/song.xml` with arbitrary content
    pub fn song_xml(mut self, xml: &str) -> Self {
        self.song_xml_override = Some(xml.to_string());
        self
    }

    fn audio_synth_folder_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<AudioSynthFolder>\n");
        for s in &self.synths {
            xml.push_str(&format!(
                r#"  <Attributes>
    <List x:id="synthChannels"><UID uid="{slot}"/></List>
    <UID x:id="deviceClassID" uid="{class}"/>
    <Attributes x:id="deviceData" name="Mai Tai">
      <UID x:id="uniqueID" uid="device-{slot}"/>
    </Attributes>
    <Attributes x:id="ghostData">
      <Attributes x:id="classInfo" name="Mai Tai" category="AudioSynth" subCategory="Synth"/>
    </Attributes>
    <String x:id="presetPath" text="Presets/Synths/{file}"/>
  </Attributes>
"#,
                slot = s.slot_id,
                class = s.class_id,
                file = s.preset_file,
            ));
        }
        xml.push_str("</AudioSynthFolder>\n");
        xml
    }

    fn music_track_device_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<MusicTrackDevice>\n  <Attributes>\n    <ChannelGroup>\n",
        );
        for s in &self.synths {
            xml.push_str(&format!(
                r#"      <MusicTrackChannel>
        <UID x:id="uniqueID" uid="{song}"/>
        <Connection x:id="instrumentOut" objectID="{slot}/Input"/>
      </MusicTrackChannel>
"#,
                song = s.song_id,
                slot = s.slot_id,
            ));
        }
        xml.push_str("    </ChannelGroup>\n  </Attributes>\n</MusicTrackDevice>\n");
        xml
    }

    fn song_document_xml(&self) -> String {
        if let Some(xml) = &self.song_xml_override {
            return xml.clone();
        }

        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Song>\n  <Attributes>\n    <List x:id=\"Tracks\">\n",
        );
        for f in &self.folders {
            xml.push_str(&format!(
                "      <FolderTrack trackID=\"{}\" name=\"{}\" parentFolder=\"{}\"/>\n",
                f.track_id,
                escape(&f.name),
                f.parent_folder
            ));
        }
        for s in &self.synths {
            xml.push_str(&format!(
                "      <MediaTrack trackID=\"{}\" name=\"{}\" parentFolder=\"{}\">\n        <UID x:id=\"channelID\" uid=\"{}\"/>\n      </MediaTrack>\n",
                s.track_id,
                escape(&s.name),
                s.parent_folder,
                s.song_id
            ));
        }
        xml.push_str("    </List>\n  </Attributes>\n</Song>\n");
        xml
    }

    /// Write the container to `<dir>/<name>.song` and return its path
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(format!("{}.song", name));

        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        let options = SimpleFileOptions::default();

        zip.start_file("Devices/audiosynthfolder.xml", options).unwrap();
        zip.write_all(self.audio_synth_folder_xml().as_bytes()).unwrap();
        zip.start_file("Devices/musictrackdevice.xml", options).unwrap();
        zip.write_all(self.music_track_device_xml().as_bytes()).unwrap();
        zip.start_file("Song/song.xml", options).unwrap();
        zip.write_all(self.song_document_xml().as_bytes()).unwrap();

        for s in self.synths.iter().filter(|s| s.with_payload) {
            zip.start_file(format!("Presets/Synths/{}", s.preset_file), options)
                .unwrap();
            zip.write_all(format!("payload for {}", s.slot_id).as_bytes())
                .unwrap();
        }

        zip.finish().unwrap();
        path
    }
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}

/// Every file under `root`, relative and sorted
pub fn list_artifacts(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Read one entry of an `.instrument` archive as text
pub fn read_entry(artifact: &Path, name: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(artifact).unwrap()).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}
