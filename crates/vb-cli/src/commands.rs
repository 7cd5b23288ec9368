//! Command implementations.
//!
//! Each command opens the board from disk, acts on it, and reports. Rendering
//! is split from printing so tests can inspect the output.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;
use tracing::{info, info_span};
use vb_model::{ModuleId, Registry};
use vb_store::{
    FileBackend, LoadOutcome, ModuleStore, StorageBackend, StorageError, StoreConfig, StoreError,
    ThemeMode, load_theme, save_theme,
};
use vb_tiles::TileState;

/// An opened board: the store plus the backend it persists to.
pub struct Session {
    store: ModuleStore,
    backend: Arc<FileBackend>,
    storage_key: String,
}

impl Session {
    /// Open the board stored under `storage_key` in `data_dir` and load it.
    pub fn open(data_dir: &Path, storage_key: &str) -> Result<Self> {
        let span = info_span!("open", data_dir = %data_dir.display(), key = storage_key);
        let _guard = span.enter();

        let backend = Arc::new(FileBackend::new(data_dir));
        let shared: Arc<dyn StorageBackend> = backend.clone();
        let mut store = ModuleStore::new(
            Registry::builtin(),
            shared,
            StoreConfig::with_storage_key(storage_key),
        );
        match store.load() {
            LoadOutcome::Malformed => {
                tracing::warn!("Stored board is unreadable, starting from defaults");
            }
            outcome => tracing::debug!(?outcome, "Board loaded"),
        }
        Ok(Self {
            store,
            backend,
            storage_key: storage_key.to_string(),
        })
    }

    pub fn store(&self) -> &ModuleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ModuleStore {
        &mut self.store
    }

    pub fn data_dir(&self) -> PathBuf {
        self.backend.dir().to_path_buf()
    }

    /// Fail if the last change could not be written. Retries the write once
    /// so the caller gets the typed storage error.
    fn ensure_saved(&mut self) -> Result<()> {
        if !self.store.persist_status().is_dirty() {
            return Ok(());
        }
        self.store.flush()?;
        Ok(())
    }
}

/// Message for a failed command. Storage failures get their user-facing
/// message and a hint.
pub fn describe_error(error: &anyhow::Error) -> String {
    let storage = match error.downcast_ref::<StoreError>() {
        Some(StoreError::Storage(storage)) => Some(storage),
        _ => error.downcast_ref::<StorageError>(),
    };
    match storage {
        Some(storage) => match storage.suggestion() {
            Some(hint) => format!("{}\nhint: {hint}", storage.user_message()),
            None => storage.user_message(),
        },
        None => format!("{error:#}"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

/// Board modules in display order with their preview lines.
pub fn list_table(store: &ModuleStore) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Module", "Title", "Icon", "Preview"]);
    apply_table_style(&mut table);
    for (position, module) in store.modules_in_order().into_iter().enumerate() {
        let preview = store
            .get_module_state(module.id.as_str())
            .map(|value| TileState::decode(module.id.as_str(), value).preview())
            .unwrap_or_default();
        table.add_row(vec![
            (position + 1).to_string(),
            module.id.to_string(),
            module.title.clone(),
            module.icon.clone(),
            preview,
        ]);
    }
    table
}

pub fn run_list(session: &Session) -> Result<()> {
    println!("{}", list_table(session.store()));
    Ok(())
}

/// Pretty JSON of one module's state.
pub fn module_json(store: &ModuleStore, id: &str) -> Result<String> {
    let value = store.get_module_state(id)?;
    serde_json::to_string_pretty(value).context("render module state")
}

pub fn run_get(session: &Session, id: &str) -> Result<()> {
    println!("{}", module_json(session.store(), id.trim())?);
    Ok(())
}

pub fn run_set(session: &mut Session, id: &str, json: &str) -> Result<()> {
    let id = id.trim();
    let value: Value =
        serde_json::from_str(json).with_context(|| format!("parse state for {id} as JSON"))?;
    session.store_mut().set_module_state(id, value)?;
    session.ensure_saved()?;
    info!(module = id, "State replaced");
    Ok(())
}

pub fn run_reset(session: &mut Session, id: &str) -> Result<()> {
    let id = id.trim();
    session.store_mut().reset_module(id)?;
    session.ensure_saved()?;
    info!(module = id, "State reset to default");
    Ok(())
}

pub fn run_order(session: &mut Session, ids: &[String]) -> Result<()> {
    let requested = ids
        .iter()
        .map(|id| ModuleId::from_input(id))
        .collect::<Result<Vec<_>, _>>()
        .context("parse module ids")?;
    for id in &requested {
        if !session.store().registry().contains(id.as_str()) {
            tracing::warn!(module = %id, "Ignoring unknown module");
        }
    }
    session.store_mut().set_order(&requested);
    session.ensure_saved()?;
    let order: Vec<&str> = session.store().order().iter().map(ModuleId::as_str).collect();
    println!("{}", order.join(" "));
    Ok(())
}

/// Raw persisted snapshot, or `None` when nothing has been saved yet.
pub fn raw_snapshot(session: &Session) -> Result<Option<String>> {
    let raw = session
        .backend
        .read(&session.storage_key)
        .with_context(|| format!("read snapshot from {}", session.data_dir().display()))?;
    Ok(raw)
}

pub fn run_snapshot(session: &Session) -> Result<()> {
    match raw_snapshot(session)? {
        Some(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{raw}"),
        },
        None => println!("(nothing saved yet)"),
    }
    Ok(())
}

/// Show the theme preference, or store a new one.
pub fn run_theme(data_dir: &Path, mode: Option<ThemeMode>) -> Result<ThemeMode> {
    let backend = FileBackend::new(data_dir);
    let mode = match mode {
        Some(mode) => {
            save_theme(&backend, mode).context("save theme preference")?;
            mode
        }
        None => load_theme(&backend),
    };
    println!("{mode}");
    Ok(mode)
}
