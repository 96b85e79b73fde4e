//! Map builders: one parsed document in, one keyed index plus diagnostics out
//!
//! A malformed element is skipped with a diagnostic; nothing at this layer
//! aborts the build.

pub mod binding_index;
pub mod device_index;
pub mod song_index;

pub use binding_index::build_binding_index;
pub use device_index::build_device_index;
pub use song_index::{build_folder_index, build_song_index};

use crate::models::{Diagnostic, DiagnosticKind};
use std::collections::HashMap;

/// Insert into an index, recording a diagnostic when the key was already taken
///
/// Last write wins.
pub(crate) fn insert_reporting_duplicates<V>(
    index: &mut HashMap<String, V>,
    key: String,
    value: V,
    source: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if index.insert(key.clone(), value).is_some() {
        diagnostics.push(
            Diagnostic::new(
                DiagnosticKind::DuplicateKey,
                source,
                "Key appears more than once, keeping the last entry",
            )
            .with_subject(key),
        );
    }
}

/// Diagnostic for a skipped element
pub(crate) fn malformed(source: &'static str, subject: &str, message: &str) -> Diagnostic {
    Diagnostic::new(DiagnosticKind::MalformedElement, source, message).with_subject(subject)
}
