//! Filesystem report store tests.

use chrono::Utc;
use motion_report::{AnalysisReport, MotionError, ReportBuilder, ReportStore, SourceSummary};

fn report(report_id: &str) -> AnalysisReport {
    ReportBuilder::default().build_report(
        vec![0.0, 4.0, 0.0, 4.0],
        SourceSummary {
            source_filename: "clip.mp4".to_string(),
            total_frames: 5,
            fps: 25.0,
        },
        report_id,
        Utc::now(),
    )
}

#[test]
fn save_then_load() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path().join("reports"));
    let original = report("20261017093000-00000001");

    let path = store.save(&original).expect("Failed to save");
    assert_eq!(path, directory.path().join("reports/20261017093000-00000001.json"));
    assert!(store.contains(original.report_id()));

    let loaded = store.load(original.report_id()).expect("Failed to load");
    assert_eq!(loaded, original);
}

#[test]
fn saved_file_is_indented_json() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path());
    let path = store.save(&report("pretty")).expect("Failed to save");

    let contents = std::fs::read_to_string(path).expect("Failed to read");
    assert!(contents.starts_with("{\n  \"report_id\": \"pretty\""));
}

#[test]
fn missing_report_is_not_found() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path());

    match store.load("nope") {
        Err(MotionError::ReportNotFound { report_id }) => assert_eq!(report_id, "nope"),
        other => panic!("Expected ReportNotFound, got: {other:?}"),
    }
    assert!(!store.contains("nope"));
}

#[test]
fn unparsable_report_is_malformed() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path());
    std::fs::write(directory.path().join("broken.json"), "{ not json").expect("Failed to write");

    let result = store.load("broken");
    assert!(
        matches!(result, Err(MotionError::MalformedReport { ref report_id, .. }) if report_id == "broken"),
        "Expected MalformedReport, got: {result:?}",
    );
}

#[test]
fn path_traversal_is_not_found() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path().join("reports"));
    std::fs::write(directory.path().join("secret.json"), "{}").expect("Failed to write");

    assert!(store.path_for("../secret").is_none());
    assert!(matches!(
        store.load("../secret"),
        Err(MotionError::ReportNotFound { .. })
    ));
}

#[test]
fn invalid_identifier_cannot_be_saved() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path());
    assert!(store.save(&report("a/b")).is_err());
}

#[test]
fn save_overwrites_existing_report() {
    let directory = tempfile::tempdir().expect("Failed to create temp dir");
    let store = ReportStore::new(directory.path());

    store.save(&report("same")).expect("Failed to save");
    let replacement = report("same");
    store.save(&replacement).expect("Failed to save again");

    assert_eq!(store.load("same").expect("Failed to load"), replacement);
}
