//! The module state store.
//!
//! Single source of truth for module order and per-module state. Mutations
//! are applied in memory first and then written through to the storage
//! backend as a full snapshot. Storage failures never reach the caller of a
//! mutation; they are logged and recorded in the [`WriteTracker`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use vb_model::{ModuleDescriptor, ModuleId, Registry};

use crate::backend::StorageBackend;
use crate::config::StoreConfig;
use crate::error::{Result, StorageError, StoreError};
use crate::reconcile::reconcile;
use crate::snapshot::{PersistedSnapshot, RecoveredSnapshot, StateMap};
use crate::tracker::WriteTracker;

/// Lifecycle of a store. One-way: `Initializing` to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// Defaults only; no load attempted yet.
    Initializing,
    /// A load attempt finished, whether or not anything was restored.
    Ready,
}

/// What a load attempt did. For diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored snapshot was applied.
    Restored {
        order_restored: bool,
        state_entries: usize,
    },
    /// Nothing usable was stored.
    Empty,
    /// The backend read failed; defaults kept.
    ReadFailed,
    /// The stored blob was not JSON; defaults kept.
    Malformed,
    /// The store was already ready; nothing was read.
    AlreadyReady,
}

/// Owned store for one board.
pub struct ModuleStore {
    registry: Registry,
    backend: Arc<dyn StorageBackend>,
    config: StoreConfig,
    order: Vec<ModuleId>,
    state: StateMap,
    status: StoreStatus,
    tracker: WriteTracker,
}

impl std::fmt::Debug for ModuleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleStore")
            .field("storage_key", &self.config.storage_key)
            .field("order", &self.order)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl ModuleStore {
    /// Create a store seeded with defaults. Usable immediately.
    pub fn new(registry: Registry, backend: Arc<dyn StorageBackend>, config: StoreConfig) -> Self {
        let order = reconcile(&config.default_order, &registry, &config.default_order);
        let state = registry
            .all()
            .iter()
            .map(|module| (module.id.clone(), module.initial_state.clone()))
            .collect();

        Self {
            registry,
            backend,
            config,
            order,
            state,
            status: StoreStatus::Initializing,
            tracker: WriteTracker::new(),
        }
    }

    /// Read the stored snapshot and apply it. Never fails.
    ///
    /// Only the first call reads; the store is `Ready` afterwards.
    pub fn load(&mut self) -> LoadOutcome {
        if self.is_ready() {
            debug!("Store already loaded, skipping read");
            return LoadOutcome::AlreadyReady;
        }
        let read = self.backend.read(&self.config.storage_key);
        self.finish_load(read)
    }

    /// Like [`load`](Self::load), with the backend read moved onto the
    /// blocking thread pool.
    pub async fn load_async(&mut self) -> LoadOutcome {
        if self.is_ready() {
            debug!("Store already loaded, skipping read");
            return LoadOutcome::AlreadyReady;
        }
        let backend = Arc::clone(&self.backend);
        let key = self.config.storage_key.clone();
        let read = tokio::task::spawn_blocking(move || backend.read(&key))
            .await
            .unwrap_or_else(|e| Err(StorageError::Unavailable(format!("load task failed: {e}"))));
        self.finish_load(read)
    }

    fn finish_load(&mut self, read: std::result::Result<Option<String>, StorageError>) -> LoadOutcome {
        let outcome = self.apply_read(read);
        self.status = StoreStatus::Ready;
        info!(key = %self.config.storage_key, ?outcome, "Module store ready");
        outcome
    }

    fn apply_read(&mut self, read: std::result::Result<Option<String>, StorageError>) -> LoadOutcome {
        let raw = match read {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Empty,
            Err(e) => {
                warn!(error = %e, "Failed to read stored board, using defaults");
                return LoadOutcome::ReadFailed;
            }
        };

        let recovered = match RecoveredSnapshot::parse(&raw) {
            Ok(recovered) => recovered,
            Err(e) => {
                warn!(error = %e, "Stored board is not valid JSON, using defaults");
                return LoadOutcome::Malformed;
            }
        };

        if recovered.is_empty() {
            return LoadOutcome::Empty;
        }
        self.apply_snapshot(recovered)
    }

    fn apply_snapshot(&mut self, recovered: RecoveredSnapshot) -> LoadOutcome {
        let order_restored = match recovered.order {
            Some(order) => {
                self.order = reconcile(&order, &self.registry, &self.config.default_order);
                true
            }
            None => false,
        };

        let state_entries = match recovered.state {
            Some(state) => {
                let count = state.len();
                let unregistered = state
                    .keys()
                    .filter(|id| !self.registry.contains(id.as_str()))
                    .count();
                if unregistered > 0 {
                    debug!(unregistered, "Keeping state for unregistered modules");
                }
                self.state.extend(state);
                count
            }
            None => 0,
        };

        LoadOutcome::Restored {
            order_restored,
            state_entries,
        }
    }

    /// Current state of a registered module.
    pub fn get_module_state(&self, id: &str) -> Result<&Value> {
        let descriptor = self.descriptor(id)?;
        Ok(self.state.get(id).unwrap_or(&descriptor.initial_state))
    }

    /// Replace a module's state, then write the snapshot.
    pub fn set_module_state(&mut self, id: &str, value: Value) -> Result<()> {
        let id = self.descriptor(id)?.id.clone();
        debug!(module = %id, "Set module state");
        self.state.insert(id, value);
        self.persist();
        Ok(())
    }

    /// Replace a module's state with `f(previous)`, then write the snapshot.
    pub fn update_module_state<F>(&mut self, id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&Value) -> Value,
    {
        let descriptor = self.descriptor(id)?;
        let id = descriptor.id.clone();
        let next = f(self.state.get(&id).unwrap_or(&descriptor.initial_state));
        debug!(module = %id, "Update module state");
        self.state.insert(id, next);
        self.persist();
        Ok(())
    }

    /// Restore a module's registry default, then write the snapshot.
    pub fn reset_module(&mut self, id: &str) -> Result<()> {
        let initial = self.descriptor(id)?.initial_state.clone();
        self.set_module_state(id, initial)
    }

    /// Replace the order (reconciled against the registry), then write the snapshot.
    pub fn set_order(&mut self, new_order: &[ModuleId]) {
        self.order = reconcile(new_order, &self.registry, &self.config.default_order);
        debug!(modules = self.order.len(), "Set module order");
        self.persist();
    }

    /// Slot handed to one widget: its state and its setters.
    pub fn module(&mut self, id: &str) -> Result<ModuleSlot<'_>> {
        let id = self.descriptor(id)?.id.clone();
        Ok(ModuleSlot { store: self, id })
    }

    /// Descriptors in display order.
    pub fn modules_in_order(&self) -> Vec<&ModuleDescriptor> {
        self.order
            .iter()
            .filter_map(|id| self.registry.by_id(id.as_str()))
            .collect()
    }

    pub fn order(&self) -> &[ModuleId] {
        &self.order
    }

    pub fn state_map(&self) -> &StateMap {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    /// Whether the load attempt has completed.
    pub fn is_ready(&self) -> bool {
        self.status == StoreStatus::Ready
    }

    /// Durable-write diagnostics.
    pub fn persist_status(&self) -> &WriteTracker {
        &self.tracker
    }

    /// The record that gets written on every mutation.
    pub fn snapshot(&self) -> PersistedSnapshot<'_> {
        PersistedSnapshot {
            order: &self.order,
            state: &self.state,
        }
    }

    /// Write the current snapshot and report the result.
    pub fn flush(&mut self) -> Result<()> {
        self.tracker.mark_dirty();
        match self.write_snapshot() {
            Ok(()) => {
                self.tracker.write_complete();
                Ok(())
            }
            Err(e) => {
                self.tracker.write_failed(e.to_string());
                Err(StoreError::Storage(e))
            }
        }
    }

    fn descriptor(&self, id: &str) -> Result<&ModuleDescriptor> {
        self.registry
            .by_id(id)
            .ok_or_else(|| StoreError::UnknownModule(id.to_string()))
    }

    /// Durable-write side channel. The outcome only feeds diagnostics.
    fn persist(&mut self) {
        self.tracker.mark_dirty();
        match self.write_snapshot() {
            Ok(()) => self.tracker.write_complete(),
            Err(e) => {
                warn!(error = %e, "Failed to persist board, keeping in-memory state");
                self.tracker.write_failed(e.to_string());
            }
        }
    }

    fn write_snapshot(&self) -> std::result::Result<(), StorageError> {
        let json = self.snapshot().to_json()?;
        self.backend.write(&self.config.storage_key, &json)
    }
}

static NULL: Value = Value::Null;

/// One module's view of the store: its current value and its two setters.
pub struct ModuleSlot<'a> {
    store: &'a mut ModuleStore,
    id: ModuleId,
}

impl ModuleSlot<'_> {
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn state(&self) -> &Value {
        self.store
            .state
            .get(&self.id)
            .or_else(|| {
                self.store
                    .registry
                    .by_id(self.id.as_str())
                    .map(|m| &m.initial_state)
            })
            .unwrap_or(&NULL)
    }

    pub fn set(&mut self, value: Value) {
        self.store.state.insert(self.id.clone(), value);
        self.store.persist();
    }

    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&Value) -> Value,
    {
        let next = f(self.state());
        self.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::json;

    fn registry() -> Registry {
        Registry::new(vec![
            ModuleDescriptor::new(ModuleId::new("counter").unwrap(), "Counter", "n", json!(0)),
            ModuleDescriptor::new(
                ModuleId::new("stopwatch").unwrap(),
                "Stopwatch",
                "t",
                json!({"seconds": 0}),
            ),
        ])
        .unwrap()
    }

    fn store_with(backend: Arc<MemoryBackend>) -> ModuleStore {
        ModuleStore::new(registry(), backend, StoreConfig::with_storage_key("test"))
    }

    #[test]
    fn new_store_is_initializing_with_defaults() {
        let store = store_with(Arc::new(MemoryBackend::new()));
        assert_eq!(store.status(), StoreStatus::Initializing);
        assert_eq!(store.get_module_state("counter").unwrap(), &json!(0));
        assert_eq!(store.order().len(), 2);
    }

    #[test]
    fn unknown_module_is_reported() {
        let mut store = store_with(Arc::new(MemoryBackend::new()));
        assert!(matches!(
            store.get_module_state("nope"),
            Err(StoreError::UnknownModule(id)) if id == "nope"
        ));
        assert!(store.set_module_state("nope", json!(1)).is_err());
        assert!(store.module("nope").is_err());
    }

    #[test]
    fn second_load_does_not_read() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = store_with(backend.clone());
        assert_eq!(store.load(), LoadOutcome::Empty);

        backend.write("test", r#"{"state":{"counter":9}}"#).unwrap();
        assert_eq!(store.load(), LoadOutcome::AlreadyReady);
        assert_eq!(store.get_module_state("counter").unwrap(), &json!(0));
    }

    #[test]
    fn slot_update_writes_through() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = store_with(backend.clone());
        {
            let mut slot = store.module("counter").unwrap();
            slot.update(|prev| json!(prev.as_i64().unwrap_or(0) + 1));
            assert_eq!(slot.state(), &json!(1));
        }
        assert_eq!(backend.write_count(), 1);
        assert!(backend.get("test").unwrap().contains("\"counter\":1"));
    }

    #[test]
    fn reset_restores_default() {
        let mut store = store_with(Arc::new(MemoryBackend::new()));
        store.set_module_state("stopwatch", json!({"seconds": 42})).unwrap();
        store.reset_module("stopwatch").unwrap();
        assert_eq!(
            store.get_module_state("stopwatch").unwrap(),
            &json!({"seconds": 0})
        );
    }

    #[test]
    fn flush_reports_failure() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_fail_writes(true);
        let mut store = store_with(backend);
        assert!(matches!(store.flush(), Err(StoreError::Storage(_))));
        assert!(store.persist_status().is_dirty());
    }
}
