//! Report JSON format tests.

use chrono::{TimeZone, Utc};
use motion_report::{AnalysisReport, ReportBuilder, SourceSummary, generate_report_id_at};
use serde_json::Value;

fn sample_report() -> AnalysisReport {
    let created_at = Utc
        .with_ymd_and_hms(2026, 10, 17, 9, 30, 0)
        .unwrap()
        .checked_add_signed(chrono::Duration::microseconds(123_456))
        .unwrap();
    ReportBuilder::default().build_report(
        vec![0.1, 7.3, 0.2, 12.9, 0.05, 0.3],
        SourceSummary {
            source_filename: "derby final.mp4".to_string(),
            total_frames: 7,
            fps: 29.97,
        },
        "20261017093000-3f9a1c2b",
        created_at,
    )
}

#[test]
fn json_has_exactly_the_report_fields() {
    let json = sample_report().to_json_pretty().expect("Failed to serialize");
    let value: Value = serde_json::from_str(&json).expect("Invalid JSON");
    let object = value.as_object().expect("Expected a JSON object");

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "created_at",
            "duration_seconds",
            "fps",
            "motion_events",
            "motion_score_mean",
            "motion_score_std",
            "report_id",
            "source_filename",
            "total_frames",
        ]
    );

    assert_eq!(object["report_id"], "20261017093000-3f9a1c2b");
    assert_eq!(object["source_filename"], "derby final.mp4");
    assert_eq!(object["total_frames"], 7);
    assert!(object["motion_events"].is_u64());
}

#[test]
fn created_at_is_iso8601_utc() {
    let json = sample_report().to_json_pretty().expect("Failed to serialize");
    let value: Value = serde_json::from_str(&json).expect("Invalid JSON");
    let created_at = value["created_at"].as_str().expect("Expected a string");

    assert!(created_at.starts_with("2026-10-17T09:30:00.123456"));
    assert!(created_at.ends_with('Z'));
}

#[test]
fn round_trip_preserves_every_field() {
    let report = sample_report();
    let parsed = AnalysisReport::from_json(&report.to_json_pretty().unwrap()).unwrap();

    assert_eq!(parsed, report);
    assert_eq!(parsed.fps().to_bits(), report.fps().to_bits());
    assert_eq!(
        parsed.duration_seconds().to_bits(),
        report.duration_seconds().to_bits()
    );
    assert_eq!(
        parsed.motion_score_mean().to_bits(),
        report.motion_score_mean().to_bits()
    );
    assert_eq!(
        parsed.motion_score_std().to_bits(),
        report.motion_score_std().to_bits()
    );
}

#[test]
fn parses_reports_written_elsewhere() {
    let json = r#"{
        "report_id": "20250101120000-deadbeef",
        "created_at": "2025-01-01T12:00:00.000001Z",
        "source_filename": "clip.mov",
        "total_frames": 60,
        "fps": 30.0,
        "duration_seconds": 2.0,
        "motion_events": 3,
        "motion_score_mean": 1.5,
        "motion_score_std": 0.25
    }"#;

    let report = AnalysisReport::from_json(json).expect("Failed to parse");
    assert_eq!(report.report_id(), "20250101120000-deadbeef");
    assert_eq!(report.total_frames(), 60);
    assert_eq!(report.motion_events(), 3);
    assert_eq!(report.duration_seconds(), 2.0);
}

#[test]
fn incomplete_json_is_rejected() {
    let result = AnalysisReport::from_json(r#"{"report_id": "x"}"#);
    assert!(result.is_err());
}

#[test]
fn generated_ids_are_timestamp_plus_suffix() {
    let instant = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 5).unwrap();
    let first = generate_report_id_at(instant);
    let second = generate_report_id_at(instant);

    let (timestamp, suffix) = first.split_once('-').expect("Expected a dash");
    assert_eq!(timestamp, "20261017093005");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(first, second);
}
