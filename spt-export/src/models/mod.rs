//! Data models for preset extraction

pub mod diagnostics;
pub mod entries;
pub mod preset_record;

pub use diagnostics::{BuildOutput, Diagnostic, DiagnosticKind};
pub use entries::{
    BindingEntry, BindingIndex, DeviceEntry, DeviceIndex, FolderEntry, FolderIndex, SongEntry,
    SongIndex,
};
pub use preset_record::{PresetRecord, PresetSet};
