//! Module order reconciliation against the registry.

use std::collections::HashSet;

use vb_model::{ModuleId, Registry};

/// Make `requested` a valid order for `registry`.
///
/// Registered ids keep their relative order (first occurrence wins), stale
/// ids are dropped, and registered ids that are missing get appended in
/// registry order. If that leaves nothing, `default_order` filtered to
/// registered ids is used, then the registry order itself.
pub fn reconcile(
    requested: &[ModuleId],
    registry: &Registry,
    default_order: &[ModuleId],
) -> Vec<ModuleId> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(registry.len());
    let mut order: Vec<ModuleId> = Vec::with_capacity(registry.len());

    for id in requested {
        if registry.contains(id.as_str()) && seen.insert(id.as_str()) {
            order.push(id.clone());
        }
    }

    for id in registry.ids() {
        if seen.insert(id.as_str()) {
            order.push(id.clone());
        }
    }

    if !order.is_empty() {
        return order;
    }

    let defaults = filter_registered(default_order, registry);
    if defaults.is_empty() {
        registry.ids().cloned().collect()
    } else {
        defaults
    }
}

/// `ids` restricted to registered ones, without duplicates.
fn filter_registered(ids: &[ModuleId], registry: &Registry) -> Vec<ModuleId> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| registry.contains(id.as_str()) && seen.insert(id.as_str()))
        .cloned()
        .collect()
}
