// tests/integration_test.rs

//! Integration tests for branchdiff
//!
//! These tests verify the export-parse → group → diff → serialize
//! pipeline end to end, without touching the network.

use branchdiff::api::BranchExport;
use branchdiff::compare::{diff_branches, group_by_arch};

/// A cut-down branch export payload in the shape the API returns
const SISYPHUS_EXPORT: &str = r#"{
    "request_args": {"arch": null},
    "length": 3,
    "packages": [
        {"name": "bash", "epoch": 0, "version": "5.2.15", "release": "alt2",
         "arch": "x86_64", "disttag": "sisyphus+1", "buildtime": 1700000000},
        {"name": "newtool", "epoch": 0, "version": "1.0", "release": "alt1",
         "arch": "x86_64"},
        {"name": "docs", "epoch": 0, "version": "3.0", "release": "alt1",
         "arch": "noarch"}
    ]
}"#;

const P11_EXPORT: &str = r#"{
    "request_args": {"arch": null},
    "length": 3,
    "packages": [
        {"name": "bash", "epoch": 0, "version": "5.2.15", "release": "alt1",
         "arch": "x86_64", "disttag": "p11+1"},
        {"name": "oldtool", "epoch": 0, "version": "0.9", "release": "alt1",
         "arch": "x86_64"},
        {"name": "docs", "epoch": 0, "version": "3.0", "release": "alt1",
         "arch": "noarch"}
    ]
}"#;

#[test]
fn test_full_pipeline() {
    let sisyphus: BranchExport = serde_json::from_str(SISYPHUS_EXPORT).unwrap();
    let p11: BranchExport = serde_json::from_str(P11_EXPORT).unwrap();

    let grouped_sisyphus = group_by_arch(sisyphus.packages);
    let grouped_p11 = group_by_arch(p11.packages);
    assert_eq!(grouped_sisyphus.len(), 2, "x86_64 and noarch expected");

    let report = diff_branches(&grouped_sisyphus, &grouped_p11, "sisyphus", "p11").unwrap();

    assert_eq!(report.only_in_first.len(), 1);
    assert_eq!(report.only_in_first[0].name, "newtool");

    assert_eq!(report.only_in_second.len(), 1);
    assert_eq!(report.only_in_second[0].name, "oldtool");

    // bash alt2 > alt1; docs is identical in both branches
    assert_eq!(report.newer_in_first.len(), 1);
    assert_eq!(report.newer_in_first[0].name, "bash");
}

#[test]
fn test_report_json_preserves_upstream_fields() {
    let sisyphus: BranchExport = serde_json::from_str(SISYPHUS_EXPORT).unwrap();
    let p11: BranchExport = serde_json::from_str(P11_EXPORT).unwrap();

    let report = diff_branches(
        &group_by_arch(sisyphus.packages),
        &group_by_arch(p11.packages),
        "sisyphus",
        "p11",
    )
    .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    let bash = &value["newer_in_sisyphus"][0];

    // The whole sisyphus record is copied, including fields the
    // comparator never reads
    assert_eq!(bash["name"], "bash");
    assert_eq!(bash["release"], "alt2");
    assert_eq!(bash["disttag"], "sisyphus+1");
    assert_eq!(bash["buildtime"], 1700000000);
}

#[test]
fn test_report_written_to_file_pretty_printed() {
    let sisyphus: BranchExport = serde_json::from_str(SISYPHUS_EXPORT).unwrap();
    let p11: BranchExport = serde_json::from_str(P11_EXPORT).unwrap();

    let report = diff_branches(
        &group_by_arch(sisyphus.packages),
        &group_by_arch(p11.packages),
        "sisyphus",
        "p11",
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    let json = serde_json::to_string_pretty(&report).unwrap();
    std::fs::write(&path, &json).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();

    // Two-space indentation on the top-level keys
    assert!(written.contains("\n  \"only_in_sisyphus\""));
    assert!(written.contains("\n  \"only_in_p11\""));
    assert!(written.contains("\n  \"newer_in_sisyphus\""));

    // And the file round-trips back to the same structure
    let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(reparsed.as_object().unwrap().len(), 3);
    assert_eq!(reparsed["only_in_sisyphus"][0]["name"], "newtool");
}

#[test]
fn test_identical_exports_produce_empty_lists() {
    let a: BranchExport = serde_json::from_str(SISYPHUS_EXPORT).unwrap();
    let b: BranchExport = serde_json::from_str(SISYPHUS_EXPORT).unwrap();

    let report = diff_branches(
        &group_by_arch(a.packages),
        &group_by_arch(b.packages),
        "sisyphus",
        "sisyphus2",
    )
    .unwrap();

    assert!(report.is_empty());
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["only_in_sisyphus"], serde_json::json!([]));
    assert_eq!(value["only_in_sisyphus2"], serde_json::json!([]));
    assert_eq!(value["newer_in_sisyphus"], serde_json::json!([]));
}
