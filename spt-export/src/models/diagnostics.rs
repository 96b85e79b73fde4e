//! Diagnostics collected while building indexes and resolving records
//!
//! Skipped elements and join misses are never errors. They are returned as
//! data next to the index so the caller decides how to surface them.

use serde::Serialize;
use std::fmt;

/// Why an element or candidate record was skipped or degraded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Required attribute missing or unparseable; element skipped
    MalformedElement,
    /// Cross-reference not found during resolution; record skipped
    JoinMiss,
    /// Folder reference not found; path walk stopped
    UnresolvedFolder,
    /// Folder hierarchy loops back on itself; record placed at root
    FolderCycle,
    /// Key seen twice; later entry replaced the earlier one
    DuplicateKey,
    /// Folder or track name rewritten to stay one path component
    UnsafeName,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::MalformedElement => "malformed element",
            DiagnosticKind::JoinMiss => "join miss",
            DiagnosticKind::UnresolvedFolder => "unresolved folder",
            DiagnosticKind::FolderCycle => "folder cycle",
            DiagnosticKind::DuplicateKey => "duplicate key",
            DiagnosticKind::UnsafeName => "unsafe name",
        };
        f.write_str(label)
    }
}

/// One skipped-element or degraded-resolution report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Which document or stage produced the diagnostic
    pub source: &'static str,
    /// Identifier of the affected element, when one is known
    pub subject: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, source: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            source,
            subject: None,
            message: message.into(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        if !subject.is_empty() {
            self.subject = Some(subject);
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(f, "[{}] {} ({}): {}", self.source, self.kind, subject, self.message),
            None => write!(f, "[{}] {}: {}", self.source, self.kind, self.message),
        }
    }
}

/// An index together with the diagnostics produced while building it
#[derive(Debug, Clone)]
pub struct BuildOutput<I> {
    pub index: I,
    pub diagnostics: Vec<Diagnostic>,
}

impl<I> BuildOutput<I> {
    pub fn new(index: I, diagnostics: Vec<Diagnostic>) -> Self {
        Self { index, diagnostics }
    }

    /// Count diagnostics of one kind
    pub fn count_by_kind(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    /// Split into index and diagnostics, appending the diagnostics to `sink`
    pub fn drain_into(self, sink: &mut Vec<Diagnostic>) -> I {
        sink.extend(self.diagnostics);
        self.index
    }
}
