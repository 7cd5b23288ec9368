//! Module state store for VersaBoard.
//!
//! Keeps the display order of the board's modules and each module's state,
//! persisted as one JSON snapshot under a single storage key.
//!
//! # Features
//!
//! - **Deterministic defaults** before anything is loaded
//! - **Tolerant loading**: unreadable or malformed snapshots fall back to
//!   defaults, stale module ids are dropped from the order
//! - **Shallow merge** of stored state over registry defaults
//! - **Write-through** of the full snapshot after every mutation, failures
//!   recorded but never surfaced
//!
//! # Snapshot Format
//!
//! ```text
//! {"order": ["quickNote", "checklist", ...], "state": {"counter": 7, ...}}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vb_model::Registry;
//! use vb_store::{FileBackend, ModuleStore, StoreConfig};
//!
//! let backend = Arc::new(FileBackend::new("/path/to/data"));
//! let mut store = ModuleStore::new(Registry::builtin(), backend, StoreConfig::default());
//! store.load();
//! store.update_module_state("counter", |prev| (prev.as_i64().unwrap_or(0) + 1).into())?;
//! ```
//!
//! # Architecture
//!
//! - `backend/` - Storage adapters (file, memory)
//! - `store.rs` - The store and its widget-facing slot
//! - `reconcile.rs` - Order reconciliation against the registry
//! - `snapshot.rs` - Snapshot writing and tolerant reading
//! - `tracker.rs` - Write diagnostics
//! - `theme.rs` - Theme preference
//! - `error.rs` - Error types with user-friendly messages

mod backend;
mod config;
mod error;
mod reconcile;
mod snapshot;
mod store;
mod theme;
mod tracker;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use config::StoreConfig;
pub use error::{Result, StorageError, StoreError};
pub use reconcile::reconcile;
pub use snapshot::{PersistedSnapshot, RecoveredSnapshot, StateMap};
pub use store::{LoadOutcome, ModuleSlot, ModuleStore, StoreStatus};
pub use theme::{THEME_KEY, ThemeMode, load_theme, save_theme};
pub use tracker::WriteTracker;
