//! Persisted sidebar layouts and the pure functions that edit them.
//!
//! A layout is an ordering + visibility override over the server's navigation
//! items. Every mutation takes the previous layout by reference and returns a
//! new one with positions renumbered `1..=N`; inputs are never modified.
//!
//! The order a layout induces over the current items (the *effective
//! sequence*) is: items present in the layout by layout position, then items
//! the layout does not know yet, in sidebar order. Layout entries for keys
//! that are no longer served are kept after the live ones so a customization
//! survives a page that is temporarily missing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grouping::{ModuleGroup, group_sidebar_items_by_module};
use crate::nav::{ModuleDefinition, NavItem};
use crate::ordering::sort_sidebar_items;

/// Current layout schema version.
pub const LAYOUT_VERSION: u32 = 1;

/// Ordering and visibility record for one navigation key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutItem {
    pub key: String,
    pub position: u32,
    #[serde(default)]
    pub hidden: bool,
}

/// A user-defined sidebar shortcut.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomLink {
    pub label: String,
    pub href: String,
}

/// One persisted layout layer (user or global).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    #[serde(default = "default_version")]
    pub v: u32,
    #[serde(default)]
    pub items: Vec<LayoutItem>,
    /// Dashboard widget arrangement; opaque to the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_module: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_links: Option<Vec<CustomLink>>,
}

fn default_version() -> u32 {
    LAYOUT_VERSION
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            v: LAYOUT_VERSION,
            items: Vec::new(),
            widgets: None,
            primary_module: None,
            custom_links: None,
        }
    }
}

impl LayoutSettings {
    /// True when the layer overrides nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.widgets.is_none()
            && self.primary_module.is_none()
            && self.custom_links.is_none()
    }

    pub fn entry(&self, key: &str) -> Option<&LayoutItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Entries by position, first occurrence of each key only.
    pub fn ordered_items(&self) -> Vec<LayoutItem> {
        let mut ordered = self.items.clone();
        ordered.sort_by_key(|item| item.position);
        let mut seen = HashSet::new();
        ordered.retain(|item| seen.insert(item.key.clone()));
        ordered
    }

    pub fn keys(&self) -> Vec<String> {
        self.ordered_items().into_iter().map(|item| item.key).collect()
    }

    fn with_items(&self, items: Vec<LayoutItem>) -> Self {
        Self {
            items,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    key: String,
    /// `None` for stale entries whose key is no longer served.
    module: Option<String>,
    hidden: bool,
}

impl Entry {
    fn from_layout(item: &LayoutItem, module: Option<String>) -> Self {
        Self {
            key: item.key.clone(),
            module,
            hidden: item.hidden,
        }
    }
}

fn renumber(entries: impl IntoIterator<Item = Entry>) -> Vec<LayoutItem> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.key.clone()))
        .enumerate()
        .map(|(index, entry)| LayoutItem {
            key: entry.key,
            position: index as u32 + 1,
            hidden: entry.hidden,
        })
        .collect()
}

/// Live entries in effective order, and stale entries in layout order.
fn effective_sequence(layout: &LayoutSettings, items: &[NavItem]) -> (Vec<Entry>, Vec<Entry>) {
    let mut by_key: HashMap<&str, &NavItem> = HashMap::new();
    for item in items {
        by_key.entry(item.key.as_str()).or_insert(item);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut live = Vec::with_capacity(items.len());
    let mut stale = Vec::new();
    for laid_out in layout.ordered_items() {
        seen.insert(laid_out.key.clone());
        match by_key.get(laid_out.key.as_str()) {
            Some(item) => live.push(Entry::from_layout(
                &laid_out,
                Some(item.effective_module().to_string()),
            )),
            None => stale.push(Entry::from_layout(&laid_out, None)),
        }
    }

    for item in sort_sidebar_items(items) {
        if seen.insert(item.key.clone()) {
            live.push(Entry {
                module: Some(item.effective_module().to_string()),
                key: item.key,
                hidden: item.hidden,
            });
        }
    }

    (live, stale)
}

/// Split live entries into per-module runs, modules in first-appearance order.
fn module_buckets(live: Vec<Entry>) -> Vec<(String, Vec<Entry>)> {
    let mut buckets: Vec<(String, Vec<Entry>)> = Vec::new();
    for entry in live {
        let module = entry.module.clone().unwrap_or_default();
        match buckets.iter_mut().find(|(id, _)| *id == module) {
            Some((_, bucket)) => bucket.push(entry),
            None => buckets.push((module, vec![entry])),
        }
    }
    buckets
}

fn flatten(buckets: Vec<(String, Vec<Entry>)>, stale: Vec<Entry>) -> Vec<LayoutItem> {
    renumber(buckets.into_iter().flat_map(|(_, bucket)| bucket).chain(stale))
}

/// Reorder whole modules, keeping each module's internal item order.
///
/// Modules missing from `next_module_order` follow in their original
/// relative order. Unknown or repeated ids are ignored.
pub fn reorder_modules_layout<S: AsRef<str>>(
    layout: &LayoutSettings,
    items: &[NavItem],
    next_module_order: &[S],
) -> LayoutSettings {
    let (live, stale) = effective_sequence(layout, items);
    let mut remaining = module_buckets(live);

    let mut ordered = Vec::with_capacity(remaining.len());
    for module_id in next_module_order {
        let module_id = module_id.as_ref();
        match remaining.iter().position(|(id, _)| id == module_id) {
            Some(index) => ordered.push(remaining.remove(index)),
            None => tracing::debug!(module = module_id, "Ignoring unknown module in reorder"),
        }
    }
    ordered.extend(remaining);

    layout.with_items(flatten(ordered, stale))
}

/// Reorder the items of one module; other modules keep their order.
///
/// `next_keys` is trusted to come from the module's own drag source and is
/// not checked for membership. A key from another module is moved into this
/// module's run (and out of its old one), so no key is ever listed twice.
/// Keys of the module that the caller omitted follow the requested ones.
pub fn reorder_module_items_layout<S: AsRef<str>>(
    layout: &LayoutSettings,
    items: &[NavItem],
    module_id: &str,
    next_keys: &[S],
) -> LayoutSettings {
    let (live, mut stale) = effective_sequence(layout, items);
    let mut buckets = module_buckets(live);

    let mut reordered: Vec<Entry> = Vec::with_capacity(next_keys.len());
    let mut requested: HashSet<&str> = HashSet::new();
    for key in next_keys {
        let key = key.as_ref();
        if !requested.insert(key) {
            continue;
        }

        let mut found = None;
        for (owner, bucket) in buckets.iter_mut() {
            if let Some(index) = bucket.iter().position(|e| e.key == key) {
                if owner != module_id {
                    tracing::debug!(key, from = %owner, to = module_id, "Moving foreign key into module order");
                }
                found = Some(bucket.remove(index));
                break;
            }
        }
        if found.is_none() {
            if let Some(index) = stale.iter().position(|e| e.key == key) {
                found = Some(stale.remove(index));
            }
        }

        reordered.push(found.unwrap_or_else(|| Entry {
            key: key.to_string(),
            module: Some(module_id.to_string()),
            hidden: false,
        }));
    }

    match buckets.iter_mut().find(|(id, _)| id == module_id) {
        Some((_, bucket)) => {
            let omitted = std::mem::take(bucket);
            reordered.extend(omitted);
            *bucket = reordered;
        }
        None => buckets.push((module_id.to_string(), reordered)),
    }

    layout.with_items(flatten(buckets, stale))
}

/// Set one key's hidden flag; an unknown key is appended, not dropped.
pub fn set_layout_item_hidden(layout: &LayoutSettings, key: &str, hidden: bool) -> LayoutSettings {
    let mut ordered = layout.ordered_items();
    match ordered.iter_mut().find(|item| item.key == key) {
        Some(item) => item.hidden = hidden,
        None => ordered.push(LayoutItem {
            key: key.to_string(),
            position: 0,
            hidden,
        }),
    }
    let entries = ordered.iter().map(|item| Entry::from_layout(item, None));
    layout.with_items(renumber(entries))
}

/// Append every served key the layout does not know yet, in sidebar order.
pub fn ensure_layout_contains_keys(layout: &LayoutSettings, items: &[NavItem]) -> LayoutSettings {
    let ordered = layout.ordered_items();
    let mut seen: HashSet<String> = ordered.iter().map(|item| item.key.clone()).collect();

    let existing = ordered.iter().map(|item| Entry::from_layout(item, None));
    let missing: Vec<Entry> = sort_sidebar_items(items)
        .into_iter()
        .filter(|item| seen.insert(item.key.clone()))
        .map(|item| Entry {
            module: Some(item.effective_module().to_string()),
            key: item.key,
            hidden: item.hidden,
        })
        .collect();

    layout.with_items(renumber(existing.chain(missing)))
}

/// Set the module the sidebar opens on. Item order is untouched.
pub fn set_layout_primary_module(layout: &LayoutSettings, module_id: Option<&str>) -> LayoutSettings {
    LayoutSettings {
        primary_module: module_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        ..layout.clone()
    }
}

/// Layer the user layout over the global one.
///
/// User entries come first in user order; global entries the user has not
/// overridden follow in global order. Scalar settings prefer the user layer.
pub fn merge_layout_layers(global: &LayoutSettings, user: &LayoutSettings) -> LayoutSettings {
    let user_items = user.ordered_items();
    let overridden: HashSet<&str> = user_items.iter().map(|item| item.key.as_str()).collect();

    let global_items = global.ordered_items();
    let entries = user_items
        .iter()
        .chain(global_items.iter().filter(|item| !overridden.contains(item.key.as_str())))
        .map(|item| Entry::from_layout(item, None));

    LayoutSettings {
        v: global.v.max(user.v),
        items: renumber(entries),
        widgets: user.widgets.clone().or_else(|| global.widgets.clone()),
        primary_module: user.primary_module.clone().or_else(|| global.primary_module.clone()),
        custom_links: user.custom_links.clone().or_else(|| global.custom_links.clone()),
    }
}

/// Items rewritten so the sidebar comparator yields the layout's effective order.
///
/// Hidden flags come from the layout when it has an entry for the key.
pub fn apply_layout(items: &[NavItem], layout: &LayoutSettings) -> Vec<NavItem> {
    let (live, _) = effective_sequence(layout, items);
    let mut by_key: HashMap<&str, &NavItem> = HashMap::new();
    for item in items {
        by_key.entry(item.key.as_str()).or_insert(item);
    }

    live.into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            by_key.get(entry.key.as_str()).map(|item| NavItem {
                section_order: Some(0.0),
                position: Some(index as f64 + 1.0),
                hidden: entry.hidden,
                ..(*item).clone()
            })
        })
        .collect()
}

/// Order groups by where their first item sits in the layout.
///
/// Groups with no laid-out item keep their relative order after the rest.
pub fn order_groups_by_layout(mut groups: Vec<ModuleGroup>, layout: &LayoutSettings) -> Vec<ModuleGroup> {
    if layout.items.is_empty() {
        return groups;
    }
    let positions: HashMap<&str, u32> = layout
        .items
        .iter()
        .map(|item| (item.key.as_str(), item.position))
        .collect();

    groups.sort_by_key(|group| {
        group
            .items
            .iter()
            .filter_map(|item| positions.get(item.key.as_str()).copied())
            .min()
            .unwrap_or(u32::MAX)
    });
    groups
}

/// Group items for display under a layout: ordering, visibility and module order.
pub fn layout_groups(
    items: &[NavItem],
    modules: &[ModuleDefinition],
    layout: &LayoutSettings,
) -> Vec<ModuleGroup> {
    let applied = apply_layout(items, layout);
    let groups = group_sidebar_items_by_module(&applied, modules);
    order_groups_by_layout(groups, layout)
}

/// The layout that reproduces exactly what the sidebar currently shows.
///
/// Every served key is written out in displayed order (module order first),
/// so later edits to one module cannot shuffle the others. Stale entries are
/// kept at the end.
pub fn materialize_layout(
    layout: &LayoutSettings,
    items: &[NavItem],
    modules: &[ModuleDefinition],
) -> LayoutSettings {
    let groups = layout_groups(items, modules, layout);
    let displayed = groups.iter().flat_map(|group| group.items.iter()).map(|item| Entry {
        key: item.key.clone(),
        module: None,
        hidden: item.hidden,
    });
    let (_, stale) = effective_sequence(layout, items);
    layout.with_items(renumber(displayed.chain(stale)))
}
