//! Flat sidebar: every module with its visible pages.

use dioxus::prelude::*;
use idp_core::grouping::ModuleGroup;
use idp_core::nav::{NavItem, NavStatusKind};

fn badge_text(kind: NavStatusKind) -> &'static str {
    match kind {
        NavStatusKind::New => "Новое",
        NavStatusKind::Wip => "В работе",
        NavStatusKind::Locked => "Закрыто",
    }
}

/// One page row. Items without an `href` render as disabled placeholders.
#[component]
pub fn NavEntry(item: NavItem, active: bool, on_navigate: EventHandler<NavItem>) -> Element {
    let enabled = item.is_enabled();
    let class = match (enabled, active) {
        (false, _) => "nav-entry disabled",
        (true, true) => "nav-entry active",
        (true, false) => "nav-entry",
    };
    let title = if enabled { "" } else { "Раздел недоступен" };
    let status = item.status.clone();
    let clicked = item.clone();

    rsx! {
        div {
            class: "{class}",
            title: "{title}",
            onclick: move |_| {
                if enabled {
                    on_navigate.call(clicked.clone());
                }
            },
            span { class: "nav-entry-label", "{item.label}" }
            if let Some(status) = status {
                span {
                    class: "nav-badge nav-badge-{status.kind.as_str()}",
                    if let Some(link) = status.link {
                        a { href: "{link}", "{badge_text(status.kind)}" }
                    } else {
                        "{badge_text(status.kind)}"
                    }
                }
            }
        }
    }
}

/// Every module group with its visible items.
#[component]
pub fn LeftSidebar(
    groups: Vec<ModuleGroup>,
    active_key: Option<String>,
    on_navigate: EventHandler<NavItem>,
) -> Element {
    rsx! {
        nav { class: "left-sidebar",
            for group in groups.iter() {
                section { key: "{group.id()}", class: "sidebar-module",
                    div { class: "sidebar-module-label", "{group.module.label}" }
                    for item in group.visible_items() {
                        NavEntry {
                            key: "{item.key}",
                            item: item.clone(),
                            active: active_key.as_deref() == Some(item.key.as_str()),
                            on_navigate,
                        }
                    }
                }
            }
        }
    }
}
