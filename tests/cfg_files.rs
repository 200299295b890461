use std::fs;

use acc_console_lib::preset::cfg_files::{
    export_to_dir, export_to_zip, import_from_dir, import_from_zip,
};
use acc_console_lib::preset::PresetDocument;
use acc_console_lib::templates::preset_template;
use serde_json::json;

#[test]
fn export_then_import_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("cfg");

    let written = export_to_dir(&preset_template(), &cfg).unwrap();
    assert_eq!(written.len(), 7);
    assert!(cfg.join("eventRules.json").exists());

    assert_eq!(import_from_dir(&cfg).unwrap(), preset_template());
}

#[test]
fn unknown_sections_are_not_exported() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = PresetDocument::new();
    doc.insert("NOTES", json!({ "text": "club night" }));
    doc.insert("EVENT", json!({ "track": "suzuka" }));

    let written = export_to_dir(&doc, dir.path()).unwrap();
    assert_eq!(written, vec![dir.path().join("event.json")]);
}

#[test]
fn import_reads_utf16_server_files_and_skips_broken_ones() {
    let dir = tempfile::tempdir().unwrap();

    let mut utf16 = vec![0xFF, 0xFE];
    for unit in r#"{"udpPort": 9600, "tcpPort": 9600}"#.encode_utf16() {
        utf16.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(dir.path().join("configuration.json"), utf16).unwrap();
    fs::write(dir.path().join("event.json"), "{ broken").unwrap();
    fs::write(dir.path().join("settings.json"), r#"{"serverName": "Test"}"#).unwrap();

    let doc = import_from_dir(dir.path()).unwrap();
    assert_eq!(doc.names().collect::<Vec<_>>(), vec!["SETTINGS", "CONFIGURATION"]);
    assert_eq!(doc.get("CONFIGURATION").unwrap()["udpPort"], 9600);
}

#[test]
fn import_from_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(import_from_dir(&dir.path().join("nope")).is_err());
}

#[test]
fn zip_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("server.zip");

    export_to_zip(&preset_template(), &archive).unwrap();
    assert_eq!(import_from_zip(&archive).unwrap(), preset_template());
}
