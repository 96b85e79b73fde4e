//! End-to-end export tests on synthetic song containers

mod helpers;

use helpers::{list_artifacts, read_entry, FolderSpec, SongBuilder, SynthSpec};
use spt_export::{pipeline, DiagnosticKind, ExportConfig, ExportError, RunReport};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

async fn export(song: &Path, out: &Path, remove_existing: bool, workers: usize) -> (Result<(), ExportError>, RunReport) {
    let config = ExportConfig::new(song, out.to_path_buf(), remove_existing, workers).unwrap();
    let mut report = RunReport::new(&config);
    let result = pipeline::run(&config, &CancellationToken::new(), &mut report).await;
    (result, report)
}

fn lead_project() -> SongBuilder {
    SongBuilder::new()
        .synth(SynthSpec::new("Dev1", "Syn1", "Song1", "Lead", "F1").track_id("T1"))
        .folder(FolderSpec::new("F1", "Instruments", ""))
}

fn mixed_project() -> SongBuilder {
    SongBuilder::new()
        .synth(SynthSpec::new("Dev1", "Syn1", "Song1", "Lead", "F1"))
        .synth(SynthSpec::new("Dev2", "Syn2", "Song2", "7\" Kick", "F3"))
        .synth(SynthSpec::new("Dev3", "Syn3", "Song3", "Bass", ""))
        .synth(SynthSpec::new("Dev4", "Syn4", "Song4", "Pad", "F2"))
        .folder(FolderSpec::new("F1", "Instruments", ""))
        .folder(FolderSpec::new("F2", "Synths", "F1"))
        .folder(FolderSpec::new("F3", "Drums", ""))
}

#[tokio::test]
async fn test_single_preset_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let song = lead_project().write(temp_dir.path(), "Project");
    let out = temp_dir.path().join("out");

    let (result, report) = export(&song, &out, true, 2).await;
    result.unwrap();

    assert!(report.success);
    assert_eq!(report.artifacts, vec![PathBuf::from("Instruments").join("Lead.instrument")]);
    assert_eq!(list_artifacts(&out), report.artifacts);

    let artifact = out.join("Instruments").join("Lead.instrument");
    assert_eq!(read_entry(&artifact, "Dev1.preset"), "payload for Dev1");

    let meta = read_entry(&artifact, "metainfo.xml");
    assert!(meta.contains(r#"id="Class:ID" value="Syn1""#), "{}", meta);
    assert!(meta.contains(r#"id="DeviceSlot:slotUID" value="T1""#), "{}", meta);
    assert!(meta.contains(r#"id="Document:Title" value="Lead""#), "{}", meta);

    let parts = read_entry(&artifact, "presetparts.xml");
    assert!(parts.contains(r#"id="Class:ID" value="Syn1""#), "{}", parts);
    assert!(parts.contains(r#"id="Preset:DataFile" value="Dev1.preset""#), "{}", parts);
}

#[tokio::test]
async fn test_folder_tree_and_sanitized_names() {
    let temp_dir = TempDir::new().unwrap();
    let song = mixed_project().write(temp_dir.path(), "Mixed");
    let out = temp_dir.path().join("out");

    let (result, _) = export(&song, &out, true, 4).await;
    result.unwrap();

    assert_eq!(
        list_artifacts(&out),
        vec![
            PathBuf::from("Bass.instrument"),
            PathBuf::from("Drums").join("7 inch Kick.instrument"),
            PathBuf::from("Instruments").join("Lead.instrument"),
            PathBuf::from("Instruments").join("Synths").join("Pad.instrument"),
        ]
    );
}

#[tokio::test]
async fn test_repeated_runs_with_purge_are_identical() {
    let temp_dir = TempDir::new().unwrap();
    let song = mixed_project().write(temp_dir.path(), "Mixed");
    let out = temp_dir.path().join("out");

    export(&song, &out, true, 3).await.0.unwrap();
    let first = list_artifacts(&out);
    export(&song, &out, true, 3).await.0.unwrap();

    assert_eq!(list_artifacts(&out), first);
}

#[tokio::test]
async fn test_artifacts_independent_of_worker_count() {
    let temp_dir = TempDir::new().unwrap();
    let song = mixed_project().write(temp_dir.path(), "Mixed");

    let serial = temp_dir.path().join("serial");
    let parallel = temp_dir.path().join("parallel");
    export(&song, &serial, true, 1).await.0.unwrap();
    export(&song, &parallel, true, 4).await.0.unwrap();

    let artifacts = list_artifacts(&serial);
    assert_eq!(artifacts, list_artifacts(&parallel));
    for artifact in &artifacts {
        assert_eq!(
            read_entry(&serial.join(artifact), "metainfo.xml"),
            read_entry(&parallel.join(artifact), "metainfo.xml"),
        );
    }
}

#[tokio::test]
async fn test_merge_keeps_unrelated_files() {
    let temp_dir = TempDir::new().unwrap();
    let song = lead_project().write(temp_dir.path(), "Project");
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("Keep.instrument"), b"mine").unwrap();

    export(&song, &out, false, 1).await.0.unwrap();

    assert!(out.join("Keep.instrument").exists());
    assert!(out.join("Instruments").join("Lead.instrument").exists());
}

#[tokio::test]
async fn test_packaging_failure_preserves_prior_output() {
    let temp_dir = TempDir::new().unwrap();
    let song = SongBuilder::new()
        .synth(SynthSpec::new("Dev1", "Syn1", "Song1", "Lead", ""))
        .synth(SynthSpec::new("Dev2", "Syn2", "Song2", "Broken", "").without_payload())
        .write(temp_dir.path(), "Broken");
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("Previous.instrument"), b"old").unwrap();

    let (result, report) = export(&song, &out, true, 2).await;

    match result {
        Err(ExportError::Packaging { total, failures }) => {
            assert_eq!(total, 2);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].slot_id, "Dev2");
        }
        other => panic!("Expected packaging failure, got {:?}", other),
    }
    assert!(!report.success);
    assert_eq!(list_artifacts(&out), vec![PathBuf::from("Previous.instrument")]);
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let song = lead_project().write(temp_dir.path(), "Project");
    let out = temp_dir.path().join("out");

    let mut config = ExportConfig::new(&song, out.clone(), true, 1).unwrap();
    config.dry_run = true;
    let mut report = RunReport::new(&config);
    pipeline::run(&config, &CancellationToken::new(), &mut report)
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.planned, vec![PathBuf::from("Instruments").join("Lead.instrument")]);
    assert!(report.artifacts.is_empty());
    assert!(!out.exists());
}

#[tokio::test]
async fn test_unbound_synth_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    // Song4 has no media track
    let song = lead_project()
        .synth(SynthSpec::new("Dev4", "Syn4", "Song4", "Ghost", ""))
        .song_xml(
            r#"<Song><Attributes><List x:id="Tracks">
                <FolderTrack trackID="F1" name="Instruments" parentFolder=""/>
                <MediaTrack trackID="T1" name="Lead" parentFolder="F1"><UID x:id="channelID" uid="Song1"/></MediaTrack>
            </List></Attributes></Song>"#,
        )
        .write(temp_dir.path(), "Partial");
    let out = temp_dir.path().join("out");

    let (result, report) = export(&song, &out, true, 2).await;
    result.unwrap();

    assert_eq!(report.artifacts.len(), 1);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::JoinMiss && d.subject.as_deref() == Some("Dev4")));
}

#[tokio::test]
async fn test_folder_cycle_places_preset_at_root() {
    let temp_dir = TempDir::new().unwrap();
    let song = SongBuilder::new()
        .synth(SynthSpec::new("Dev1", "Syn1", "Song1", "Loop", "FA"))
        .folder(FolderSpec::new("FA", "A", "FB"))
        .folder(FolderSpec::new("FB", "B", "FA"))
        .write(temp_dir.path(), "Cycle");
    let out = temp_dir.path().join("out");

    let (result, report) = export(&song, &out, true, 1).await;
    result.unwrap();

    assert_eq!(list_artifacts(&out), vec![PathBuf::from("Loop.instrument")]);
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::FolderCycle));
}

#[tokio::test]
async fn test_malformed_document_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let song = lead_project()
        .song_xml("<Song><Attributes><List>")
        .write(temp_dir.path(), "Garbled");
    let out = temp_dir.path().join("out");

    let (result, _) = export(&song, &out, true, 1).await;

    assert!(matches!(result, Err(ExportError::DocumentParse { .. })));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_missing_song_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let (result, _) = export(&temp_dir.path().join("absent.song"), &temp_dir.path().join("out"), true, 1).await;

    assert!(matches!(result, Err(ExportError::Common(spt_common::Error::Config(_)))));
}

#[tokio::test]
async fn test_cancelled_run_publishes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let song = mixed_project().write(temp_dir.path(), "Mixed");
    let out = temp_dir.path().join("out");

    let config = ExportConfig::new(&song, out.clone(), true, 1).unwrap();
    let mut report = RunReport::new(&config);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = pipeline::run(&config, &cancel, &mut report).await;

    match result {
        Err(ExportError::Cancelled { summary }) => {
            assert_eq!(summary.dispatched, 0);
            assert_eq!(summary.skipped, 4);
        }
        other => panic!("Expected cancellation, got {:?}", other),
    }
    assert!(!out.exists());
}

#[tokio::test]
async fn test_dot_dot_folder_stays_inside_output() {
    let temp_dir = TempDir::new().unwrap();
    let song = SongBuilder::new()
        .synth(SynthSpec::new("Dev1", "Syn1", "Song1", "Lead", "F1"))
        .synth(SynthSpec::new("Dev2", "Syn2", "Song2", "../Pad", "F2"))
        .folder(FolderSpec::new("F1", "..", ""))
        .folder(FolderSpec::new("F2", "a/b", "F1"))
        .write(temp_dir.path(), "Escape");
    let out = temp_dir.path().join("work").join("out");

    let (result, report) = export(&song, &out, true, 2).await;
    result.unwrap();

    let published = list_artifacts(&out);
    assert_eq!(
        published,
        vec![
            PathBuf::from("__").join("Lead.instrument"),
            PathBuf::from("__").join("a_b").join(".._Pad.instrument"),
        ]
    );
    assert_eq!(report.artifacts, published);
    assert!(!temp_dir.path().join("work").join("Lead.instrument").exists());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::UnsafeName));
}
