//! End-to-end command tests against a board in a temporary folder.

use std::fs;

use tempfile::tempdir;
use vb_cli::commands::{Session, list_table, module_json, raw_snapshot, run_order, run_set};
use vb_model::{DEFAULT_ORDER, ModuleId, STORAGE_KEY};

#[test]
fn list_shows_every_module_with_preview() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(dir.path(), STORAGE_KEY).unwrap();
    run_set(&mut session, "waterTracker", r#"{"ml": 750, "target": 2500}"#).unwrap();

    let rendered = list_table(session.store()).to_string();
    for id in DEFAULT_ORDER {
        assert!(rendered.contains(id), "missing {id}");
    }
    assert!(rendered.contains("750 / 2500 ml"));
    assert!(rendered.contains("Write a quick note…"));
}

#[test]
fn order_moves_named_modules_first_and_persists() {
    let dir = tempdir().unwrap();
    {
        let mut session = Session::open(dir.path(), STORAGE_KEY).unwrap();
        run_order(
            &mut session,
            &["counter".to_string(), "ghost".to_string(), "mood".to_string()],
        )
        .unwrap();
    }

    let session = Session::open(dir.path(), STORAGE_KEY).unwrap();
    let order: Vec<&str> = session.store().order().iter().map(ModuleId::as_str).collect();
    assert_eq!(&order[..2], &["counter", "mood"]);
    assert_eq!(order.len(), DEFAULT_ORDER.len());
    assert!(!order.contains(&"ghost"));
}

#[test]
fn snapshot_file_has_order_and_state() {
    let dir = tempdir().unwrap();
    let mut session = Session::open(dir.path(), STORAGE_KEY).unwrap();
    assert!(raw_snapshot(&session).unwrap().is_none());

    run_set(&mut session, "counter", "3").unwrap();
    let raw = raw_snapshot(&session).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["state"]["counter"], 3);
    assert_eq!(stored["order"].as_array().unwrap().len(), DEFAULT_ORDER.len());
}

#[test]
fn corrupt_snapshot_opens_with_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(format!("{STORAGE_KEY}.json")), "{\"order\": [").unwrap();

    let session = Session::open(dir.path(), STORAGE_KEY).unwrap();
    assert!(session.store().is_ready());
    assert_eq!(module_json(session.store(), "counter").unwrap(), "0");
}

#[test]
fn separate_storage_keys_are_separate_boards() {
    let dir = tempdir().unwrap();
    let mut first = Session::open(dir.path(), "board.one").unwrap();
    run_set(&mut first, "counter", "1").unwrap();

    let second = Session::open(dir.path(), "board.two").unwrap();
    assert_eq!(module_json(second.store(), "counter").unwrap(), "0");
}
