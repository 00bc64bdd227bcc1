//! Bucketing flat navigation items into module groups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collation::compare_labels;
use crate::nav::{ModuleDefinition, NavItem, parse_module_definitions, parse_nav_items};
use crate::ordering::sort_sidebar_items;

/// A module and its sorted items. Derived, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleGroup {
    pub module: ModuleDefinition,
    pub items: Vec<NavItem>,
}

impl ModuleGroup {
    pub fn id(&self) -> &str {
        &self.module.id
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.iter().map(|i| i.key.clone()).collect()
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &NavItem> {
        self.items.iter().filter(|i| !i.hidden)
    }
}

/// Group items by module, ordered by `(module.order, module.id)`.
///
/// Every item lands in exactly one group and no group is empty. Items whose
/// module was never declared get a synthesized module that sorts with the
/// unordered ones.
pub fn group_sidebar_items_by_module(
    items: &[NavItem],
    modules: &[ModuleDefinition],
) -> Vec<ModuleGroup> {
    let mut buckets: HashMap<String, Vec<NavItem>> = HashMap::new();
    let mut bucket_order: Vec<String> = Vec::new();
    for item in items {
        let module_id = item.effective_module().to_string();
        buckets
            .entry(module_id.clone())
            .or_insert_with(|| {
                bucket_order.push(module_id);
                Vec::new()
            })
            .push(item.clone());
    }

    let mut groups = Vec::with_capacity(buckets.len());
    for module in modules {
        let module = module.normalized();
        if let Some(bucket) = buckets.remove(&module.id) {
            groups.push(ModuleGroup {
                items: sort_sidebar_items(&bucket),
                module,
            });
        }
    }

    let mut leftover: Vec<String> = bucket_order
        .into_iter()
        .filter(|id| buckets.contains_key(id))
        .collect();
    leftover.sort_by(|a, b| compare_labels(a, b));
    for id in leftover {
        if let Some(bucket) = buckets.remove(&id) {
            tracing::debug!(module = %id, items = bucket.len(), "Synthesizing undeclared module");
            groups.push(ModuleGroup {
                module: ModuleDefinition::synthesized(id),
                items: sort_sidebar_items(&bucket),
            });
        }
    }

    groups.sort_by(|a, b| {
        a.module
            .order
            .total_cmp(&b.module.order)
            .then_with(|| compare_labels(&a.module.id, &b.module.id))
    });
    groups
}

/// Parse raw JSON lists through the normalization boundary, then group.
pub fn group_raw_sidebar_items(items: &[Value], modules: &[Value]) -> Vec<ModuleGroup> {
    group_sidebar_items_by_module(&parse_nav_items(items), &parse_module_definitions(modules))
}
