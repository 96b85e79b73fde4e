//! Test Helper Utilities
//!
//! Shared utilities for testing spt-export

#![allow(dead_code)]

pub mod song_builder;

pub use song_builder::{list_artifacts, read_entry, FolderSpec, SongBuilder, SynthSpec};
