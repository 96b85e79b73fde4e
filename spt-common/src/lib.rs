//! # Studio One Preset Tool Common Library
//!
//! Shared code for the preset tool crates including:
//! - Error and result types
//! - TOML configuration file model and setting resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
