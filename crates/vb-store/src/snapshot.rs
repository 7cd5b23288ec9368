//! Persisted snapshot format.
//!
//! ```text
//! { "order": ["quickNote", "checklist", ...],
//!   "state": { "counter": 7, "stopwatch": { "seconds": 0, ... }, ... } }
//! ```
//!
//! Writing is strict; reading is tolerant. Each field is extracted on its own
//! so schema drift in one does not discard the other.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use vb_model::ModuleId;

use crate::error::StorageError;

/// Module id to that module's opaque state.
pub type StateMap = BTreeMap<ModuleId, Value>;

/// The record written under the storage key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedSnapshot<'a> {
    pub order: &'a [ModuleId],
    pub state: &'a StateMap,
}

impl PersistedSnapshot<'_> {
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|source| StorageError::Serialization { source })
    }
}

/// What could be recovered from a stored blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecoveredSnapshot {
    /// Present when the blob had an `order` array. Non-string and empty
    /// entries are skipped.
    pub order: Option<Vec<ModuleId>>,
    /// Present when the blob had a `state` object. Empty keys are skipped.
    pub state: Option<StateMap>,
}

impl RecoveredSnapshot {
    /// Parse a stored blob. Fails only when the text is not JSON at all.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }

    /// Extract whatever is usable from an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut root) = value else {
            return Self::default();
        };

        let order = match root.remove("order") {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => ModuleId::new(s).ok(),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        };

        let state = match root.remove("state") {
            Some(Value::Object(entries)) => Some(
                entries
                    .into_iter()
                    .filter_map(|(key, value)| ModuleId::new(key).ok().map(|id| (id, value)))
                    .collect(),
            ),
            _ => None,
        };

        Self { order, state }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_none() && self.state.is_none()
    }
}
