//! Store configuration.

use vb_model::{ModuleId, STORAGE_KEY, default_order};

/// Where the board is stored and how a fresh board is ordered.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key the full snapshot is written under.
    pub storage_key: String,

    /// Display order before anything is loaded.
    ///
    /// Filtered against the registry; registry ids it omits are appended.
    pub default_order: Vec<ModuleId>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            default_order: default_order(),
        }
    }
}

impl StoreConfig {
    /// Config with a custom storage key and the built-in default order.
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..Default::default()
        }
    }

    /// Replace the default order.
    #[must_use]
    pub fn with_default_order(mut self, default_order: Vec<ModuleId>) -> Self {
        self.default_order = default_order;
        self
    }
}
