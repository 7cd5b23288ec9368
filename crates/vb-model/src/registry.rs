//! Module descriptors and the registry that holds them.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::{ModelError, ModuleId, Result};

/// Static description of one module (tile).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDescriptor {
    pub id: ModuleId,
    /// Display label.
    pub title: String,
    /// Display token understood by the presentation layer.
    pub icon: String,
    /// Module-specific default state. Shape is owned by the module.
    pub initial_state: Value,
}

impl ModuleDescriptor {
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        icon: impl Into<String>,
        initial_state: Value,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            icon: icon.into(),
            initial_state,
        }
    }
}

/// Ordered, immutable catalog of modules.
///
/// Lookup is by id; the insertion order is kept because it is the fallback
/// display order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    modules: Vec<ModuleDescriptor>,
    index: HashMap<ModuleId, usize>,
}

impl Registry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(modules.len());
        for (position, module) in modules.iter().enumerate() {
            if index.insert(module.id.clone(), position).is_some() {
                return Err(ModelError::DuplicateModule(module.id.to_string()));
            }
        }
        Ok(Self { modules, index })
    }

    /// Build from a list whose ids are known to be unique at compile time.
    pub(crate) fn from_unique(modules: Vec<ModuleDescriptor>) -> Self {
        let index = modules
            .iter()
            .enumerate()
            .map(|(position, module)| (module.id.clone(), position))
            .collect();
        Self { modules, index }
    }

    pub fn all(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    pub fn by_id(&self, id: &str) -> Option<&ModuleDescriptor> {
        self.index.get(id).map(|&position| &self.modules[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registered ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.modules.iter().map(|m| &m.id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
