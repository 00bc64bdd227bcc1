//! Tabbed sidebar: module tabs on top, the selected module's pages below.

use dioxus::prelude::*;
use idp_core::grouping::ModuleGroup;
use idp_core::nav::NavItem;

use crate::left_sidebar::NavEntry;
use crate::module_tabs::ModuleTabs;

/// The module to open on: the primary one if it has pages, else the module
/// holding the active page, else the first.
pub fn initial_module(
    groups: &[ModuleGroup],
    primary_module: Option<&str>,
    active_key: Option<&str>,
) -> Option<String> {
    let has = |id: &str| groups.iter().any(|g| g.id() == id);

    primary_module
        .filter(|id| has(id))
        .map(str::to_string)
        .or_else(|| {
            active_key.and_then(|key| {
                groups
                    .iter()
                    .find(|g| g.items.iter().any(|i| i.key == key))
                    .map(|g| g.id().to_string())
            })
        })
        .or_else(|| groups.first().map(|g| g.id().to_string()))
}

#[component]
pub fn SmartSidebar(
    groups: Vec<ModuleGroup>,
    primary_module: Option<String>,
    active_key: Option<String>,
    on_navigate: EventHandler<NavItem>,
) -> Element {
    let mut selected = use_signal(|| None::<String>);

    // A selection that no longer exists (layout reset, module gone) falls back.
    let current = selected
        .read()
        .clone()
        .filter(|id| groups.iter().any(|g| g.id() == id))
        .or_else(|| initial_module(&groups, primary_module.as_deref(), active_key.as_deref()));

    let shown = current
        .as_deref()
        .and_then(|id| groups.iter().find(|g| g.id() == id))
        .cloned();

    rsx! {
        aside { class: "smart-sidebar",
            ModuleTabs {
                groups: groups.clone(),
                active_module: current.clone(),
                primary_module: primary_module.clone(),
                on_select: move |id| selected.set(Some(id)),
            }
            if let Some(group) = shown {
                div { class: "smart-sidebar-items",
                    for item in group.visible_items() {
                        NavEntry {
                            key: "{item.key}",
                            item: item.clone(),
                            active: active_key.as_deref() == Some(item.key.as_str()),
                            on_navigate,
                        }
                    }
                }
            } else {
                div { class: "smart-sidebar-empty", "Нет доступных разделов" }
            }
        }
    }
}
