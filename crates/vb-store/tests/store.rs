//! Integration tests for the module store.

use std::sync::Arc;

use serde_json::{Value, json};
use tempfile::tempdir;
use vb_model::{ModuleDescriptor, ModuleId, Registry};
use vb_store::{
    FileBackend, LoadOutcome, MemoryBackend, ModuleStore, StorageBackend, StoreConfig, StoreError,
    StoreStatus,
};
use vb_tiles::TileState;

const KEY: &str = "versaboard.modules.v3";

fn id(value: &str) -> ModuleId {
    ModuleId::new(value).unwrap()
}

fn registry(modules: &[(&str, Value)]) -> Registry {
    Registry::new(
        modules
            .iter()
            .map(|(name, initial)| ModuleDescriptor::new(id(name), *name, "icon", initial.clone()))
            .collect(),
    )
    .unwrap()
}

fn counter_and_stopwatch() -> Registry {
    registry(&[
        ("counter", json!(0)),
        ("stopwatch", json!({"seconds": 0})),
    ])
}

fn store(registry: Registry, backend: Arc<MemoryBackend>) -> ModuleStore {
    let config = StoreConfig::with_storage_key(KEY).with_default_order(Vec::new());
    ModuleStore::new(registry, backend, config)
}

fn order_of(store: &ModuleStore) -> Vec<&str> {
    store.order().iter().map(ModuleId::as_str).collect()
}

#[test]
fn no_persisted_data_keeps_defaults() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = store(registry(&[("counter", json!(0))]), backend);

    assert_eq!(store.load(), LoadOutcome::Empty);
    assert!(store.is_ready());
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(0));
}

#[test]
fn stale_persisted_ids_are_dropped() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":["counter","oldRemovedModule"]}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);

    store.load();
    assert_eq!(order_of(&store), vec!["counter", "stopwatch"]);
}

#[test]
fn updater_applied_twice_accumulates() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = store(counter_and_stopwatch(), backend);

    for _ in 0..2 {
        store
            .update_module_state("counter", |prev| json!(prev.as_i64().unwrap_or(0) + 5))
            .unwrap();
    }
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(10));
}

#[test]
fn persisted_state_overrides_only_present_keys() {
    let backend = Arc::new(MemoryBackend::with_entry(KEY, r#"{"state":{"counter":7}}"#));
    let mut store = store(counter_and_stopwatch(), backend);

    let outcome = store.load();
    assert_eq!(
        outcome,
        LoadOutcome::Restored {
            order_restored: false,
            state_entries: 1
        }
    );
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(7));
    assert_eq!(
        store.get_module_state("stopwatch").unwrap(),
        &json!({"seconds": 0})
    );
}

#[test]
fn merge_is_shallow() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"state":{"stopwatch":{"running":true}}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);

    store.load();
    assert_eq!(
        store.get_module_state("stopwatch").unwrap(),
        &json!({"running": true})
    );
}

#[test]
fn malformed_blob_leaves_defaults_and_becomes_ready() {
    let backend = Arc::new(MemoryBackend::with_entry(KEY, "{\"order\": [\"coun"));
    let mut store = store(counter_and_stopwatch(), backend);
    let before_order: Vec<ModuleId> = store.order().to_vec();
    let before_state = store.state_map().clone();

    assert_eq!(store.load(), LoadOutcome::Malformed);
    assert_eq!(store.status(), StoreStatus::Ready);
    assert_eq!(store.order(), before_order.as_slice());
    assert_eq!(store.state_map(), &before_state);
}

#[test]
fn read_failure_is_absorbed() {
    let backend = Arc::new(MemoryBackend::with_entry(KEY, r#"{"state":{"counter":7}}"#));
    backend.set_fail_reads(true);
    let mut store = store(counter_and_stopwatch(), backend);

    assert_eq!(store.load(), LoadOutcome::ReadFailed);
    assert!(store.is_ready());
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(0));
}

#[test]
fn empty_string_is_treated_as_malformed() {
    let backend = Arc::new(MemoryBackend::with_entry(KEY, ""));
    let mut store = store(counter_and_stopwatch(), backend);
    assert_eq!(store.load(), LoadOutcome::Malformed);
}

#[test]
fn non_object_snapshot_is_empty() {
    let backend = Arc::new(MemoryBackend::with_entry(KEY, "[\"counter\"]"));
    let mut store = store(counter_and_stopwatch(), backend);
    assert_eq!(store.load(), LoadOutcome::Empty);
    assert!(store.is_ready());
}

#[test]
fn defaults_available_before_load() {
    let registry = counter_and_stopwatch();
    let expected: Vec<(ModuleId, Value)> = registry
        .all()
        .iter()
        .map(|m| (m.id.clone(), m.initial_state.clone()))
        .collect();
    let store = store(registry, Arc::new(MemoryBackend::new()));

    assert_eq!(store.status(), StoreStatus::Initializing);
    for (module, initial) in expected {
        assert_eq!(store.get_module_state(module.as_str()).unwrap(), &initial);
    }
}

#[test]
fn initial_order_follows_default_order() {
    let registry = registry(&[("a", json!(0)), ("b", json!(0)), ("c", json!(0))]);
    let config = StoreConfig::with_storage_key(KEY).with_default_order(vec![
        id("c"),
        id("ghost"),
        id("a"),
    ]);
    let store = ModuleStore::new(registry, Arc::new(MemoryBackend::new()), config);
    assert_eq!(order_of(&store), vec!["c", "a", "b"]);
}

#[test]
fn set_is_visible_before_write_completes_and_survives_write_failure() {
    let backend = Arc::new(MemoryBackend::new());
    backend.set_fail_writes(true);
    let mut store = store(counter_and_stopwatch(), backend.clone());

    store.set_module_state("counter", json!(3)).unwrap();

    assert_eq!(store.get_module_state("counter").unwrap(), &json!(3));
    assert_eq!(backend.get(KEY), None);
    let status = store.persist_status();
    assert!(status.is_dirty());
    assert_eq!(status.failed_writes(), 1);
    assert!(status.last_error().is_some());
}

#[test]
fn every_mutation_writes_full_snapshot() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = store(counter_and_stopwatch(), backend.clone());

    store.set_module_state("counter", json!(1)).unwrap();
    store.set_order(&[id("stopwatch")]);

    assert_eq!(backend.write_count(), 2);
    let stored: Value = serde_json::from_str(&backend.get(KEY).unwrap()).unwrap();
    assert_eq!(stored["order"], json!(["stopwatch", "counter"]));
    assert_eq!(stored["state"]["counter"], json!(1));
    assert_eq!(stored["state"]["stopwatch"], json!({"seconds": 0}));
    assert_eq!(store.persist_status().writes(), 2);
}

#[test]
fn unknown_module_writes_nothing() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = store(counter_and_stopwatch(), backend.clone());

    let err = store.set_module_state("ghost", json!(1)).unwrap_err();
    assert!(matches!(err, StoreError::UnknownModule(_)));
    let err = store
        .update_module_state("ghost", |_| json!(1))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownModule(_)));
    assert_eq!(backend.write_count(), 0);
}

#[test]
fn set_order_is_idempotent() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = store(counter_and_stopwatch(), backend);

    store.set_order(&[id("stopwatch"), id("ghost")]);
    let first = store.order().to_vec();
    store.set_order(&first);
    assert_eq!(store.order(), first.as_slice());
    assert_eq!(order_of(&store), vec!["stopwatch", "counter"]);
}

#[test]
fn modules_in_order_resolves_descriptors() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":["stopwatch","counter"]}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);
    store.load();

    let titles: Vec<&str> = store
        .modules_in_order()
        .iter()
        .map(|m| m.title.as_str())
        .collect();
    assert_eq!(titles, vec!["stopwatch", "counter"]);
}

#[test]
fn stale_state_entries_are_carried_forward() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":["counter"],"state":{"futureTile":{"x":1}}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend.clone());
    store.load();

    assert!(matches!(
        store.get_module_state("futureTile"),
        Err(StoreError::UnknownModule(_))
    ));
    store.set_module_state("counter", json!(2)).unwrap();

    let stored: Value = serde_json::from_str(&backend.get(KEY).unwrap()).unwrap();
    assert_eq!(stored["state"]["futureTile"], json!({"x": 1}));
}

#[test]
fn padded_state_key_does_not_override_registered_module() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"state":{"counter":7,"counter ":5}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend.clone());
    store.load();

    assert_eq!(store.get_module_state("counter").unwrap(), &json!(7));
    assert!(store.get_module_state("counter ").is_err());

    store.set_order(&[id("stopwatch")]);
    let stored: Value = serde_json::from_str(&backend.get(KEY).unwrap()).unwrap();
    assert_eq!(stored["state"]["counter"], json!(7));
    assert_eq!(stored["state"]["counter "], json!(5));
}

#[test]
fn padded_order_entry_is_not_a_registered_id() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":[" stopwatch","counter"]}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);
    store.load();

    assert_eq!(order_of(&store), vec!["counter", "stopwatch"]);
}

#[test]
fn ids_differing_by_case_are_distinct() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":["Stopwatch","counter"],"state":{"COUNTER":9}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);
    store.load();

    assert_eq!(order_of(&store), vec!["counter", "stopwatch"]);
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(0));
}

#[test]
fn padded_stale_key_is_written_back_unchanged() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"state":{"future ":{"x":1}}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend.clone());
    store.load();
    store.set_module_state("counter", json!(1)).unwrap();

    let stored: Value = serde_json::from_str(&backend.get(KEY).unwrap()).unwrap();
    assert_eq!(stored["state"]["future "], json!({"x": 1}));
    assert!(stored["state"].get("future").is_none());
}

#[test]
fn typed_tile_edit_keeps_persisted_note_fields() {
    let persisted = json!({
        "order": ["quickNote"],
        "state": {
            "quickNote": {
                "notes": [{
                    "id": "1714555800000",
                    "text": "Call the dentist",
                    "pinned": true,
                    "createdAt": "2024-05-01T09:30:00.000Z",
                    "updatedAt": "2024-05-02T10:00:00.000Z"
                }],
                "draft": "",
                "search": ""
            }
        }
    });
    let backend = Arc::new(MemoryBackend::with_entry(KEY, persisted.to_string()));
    let mut store = ModuleStore::new(
        Registry::builtin(),
        backend.clone(),
        StoreConfig::with_storage_key(KEY),
    );
    store.load();

    let TileState::QuickNote(mut note) =
        TileState::decode("quickNote", store.get_module_state("quickNote").unwrap())
    else {
        panic!("quickNote should decode to its typed state");
    };
    note.draft = "Buy milk".to_string();
    store
        .set_module_state("quickNote", TileState::QuickNote(note).to_value())
        .unwrap();

    let stored: Value = serde_json::from_str(&backend.get(KEY).unwrap()).unwrap();
    assert_eq!(
        stored["state"]["quickNote"]["notes"],
        persisted["state"]["quickNote"]["notes"]
    );
    assert_eq!(stored["state"]["quickNote"]["draft"], json!("Buy milk"));
}

#[test]
fn snapshot_shape() {
    let store = store(counter_and_stopwatch(), Arc::new(MemoryBackend::new()));
    insta::assert_json_snapshot!(store.snapshot(), @r#"
    {
      "order": [
        "counter",
        "stopwatch"
      ],
      "state": {
        "counter": 0,
        "stopwatch": {
          "seconds": 0
        }
      }
    }
    "#);
}

#[test]
fn file_backend_round_trip_across_sessions() {
    let dir = tempdir().unwrap();
    let config = || StoreConfig::with_storage_key(KEY);

    {
        let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(dir.path()));
        let mut store = ModuleStore::new(Registry::builtin(), backend, config());
        store.load();
        store.set_module_state("counter", json!(41)).unwrap();
        store
            .update_module_state("counter", |prev| json!(prev.as_i64().unwrap_or(0) + 1))
            .unwrap();
        store.set_order(&[id("counter")]);
    }

    let backend: Arc<dyn StorageBackend> = Arc::new(FileBackend::new(dir.path()));
    let mut store = ModuleStore::new(Registry::builtin(), backend, config());
    assert!(matches!(store.load(), LoadOutcome::Restored { .. }));
    assert_eq!(store.get_module_state("counter").unwrap(), &json!(42));
    assert_eq!(store.order()[0], "counter");
    assert_eq!(store.order().len(), 16);
}

#[tokio::test]
async fn async_load_matches_sync_load() {
    let backend = Arc::new(MemoryBackend::with_entry(
        KEY,
        r#"{"order":["stopwatch"],"state":{"counter":7}}"#,
    ));
    let mut store = store(counter_and_stopwatch(), backend);

    let outcome = store.load_async().await;
    assert_eq!(
        outcome,
        LoadOutcome::Restored {
            order_restored: true,
            state_entries: 1
        }
    );
    assert_eq!(order_of(&store), vec!["stopwatch", "counter"]);
    assert_eq!(store.load_async().await, LoadOutcome::AlreadyReady);
}
