//! Root application component.

use dioxus::prelude::*;
use idp_client::LayoutScope;
use idp_core::theme::ThemeScope;
use idp_ui::{
    LayoutCommand, LeftSidebar, SidebarConfigurator, SidebarEditor, SmartSidebar, ThemeSwitcher,
};

use crate::bridge::ApiBridge;
use crate::state::{SidebarState, SidebarView};

/// Loads the sidebar once, then persists every layout command the
/// configurator and editor emit.
#[component]
pub fn RootApp() -> Element {
    let bridge = use_hook(|| ApiBridge::from_env().map_err(|e| e.to_string()));
    let mut sidebar = use_signal(SidebarState::new);

    let load_bridge = bridge.clone();
    use_effect(move || {
        let bridge = load_bridge.clone();
        spawn(async move {
            let bridge = match bridge {
                Ok(bridge) => bridge,
                Err(e) => {
                    tracing::warn!(error = %e, "Navigation API is not configured");
                    let mut state = sidebar.write();
                    state.loaded = true;
                    state.status = Some(e);
                    return;
                }
            };
            match bridge.load().await {
                Ok(payload) => sidebar.write().load(payload),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load sidebar");
                    sidebar.write().fail_load(&e);
                }
            }
        });
    });

    let on_command = use_callback(move |command: LayoutCommand| {
        let Ok(bridge) = bridge.clone() else {
            return;
        };
        let Some(write) = sidebar.read().plan(&command) else {
            tracing::debug!(command = command.describe(), "Layout command changes nothing");
            return;
        };
        if !sidebar.write().begin(&write) {
            return;
        }
        tracing::info!(command = command.describe(), scope = %write.scope, "Persisting sidebar layout");

        spawn(async move {
            match bridge.persist(&write).await {
                Ok(snapshot) => sidebar.write().commit(write.scope, &snapshot),
                Err(e) => {
                    tracing::warn!(error = %e, scope = %write.scope, "Failed to persist sidebar layout");
                    sidebar.write().fail(&e);
                }
            }
        });
    });

    let state = sidebar.read();
    let groups = state.groups();
    let active_label = state
        .active_key
        .as_deref()
        .and_then(|key| state.items().iter().find(|item| item.key == key))
        .map(|item| item.label.clone());

    rsx! {
        div { class: "workspace",
            header { class: "workspace-topbar",
                span { class: "workspace-title", "Intelligent Data Pro" }
                ThemeSwitcher {
                    scope: ThemeScope::User,
                    disabled: !state.can_edit_theme(ThemeScope::User),
                }
                ThemeSwitcher {
                    scope: ThemeScope::Global,
                    disabled: !state.can_edit_theme(ThemeScope::Global),
                }
                button {
                    class: "workspace-view",
                    disabled: !state.loaded,
                    onclick: move |_| sidebar.write().toggle_view(),
                    "{state.view.toggle_label()}"
                }
                button {
                    class: "workspace-configure",
                    disabled: !state.loaded,
                    onclick: move |_| {
                        let mut state = sidebar.write();
                        state.configuring = !state.configuring;
                    },
                    if state.configuring { "Закрыть настройку" } else { "Настроить меню" }
                }
            }
            div { class: "workspace-body",
                if !state.loaded {
                    div { class: "workspace-loading", "Загрузка…" }
                } else if state.view == SidebarView::Flat {
                    LeftSidebar {
                        groups: groups.clone(),
                        active_key: state.active_key.clone(),
                        on_navigate: move |item: idp_core::nav::NavItem| sidebar.write().navigate(item.key),
                    }
                } else {
                    SmartSidebar {
                        groups: groups.clone(),
                        primary_module: state.primary_module(),
                        active_key: state.active_key.clone(),
                        on_navigate: move |item: idp_core::nav::NavItem| sidebar.write().navigate(item.key),
                    }
                }
                main { class: "workspace-content",
                    if let Some(label) = active_label {
                        h1 { "{label}" }
                    } else if let Some(status) = state.status.clone().filter(|_| !state.configuring) {
                        p { class: "workspace-status", "{status}" }
                    }
                }
                if state.configuring {
                    aside { class: "workspace-configurator",
                        SidebarConfigurator {
                            items: state.items().to_vec(),
                            modules: state.modules().to_vec(),
                            layout: state.editing_layout(),
                            saving: state.saving,
                            on_command,
                            on_close: move |_| sidebar.write().configuring = false,
                        }
                        SidebarEditor {
                            groups: state.editing_groups(),
                            primary_module: state.editing_layout().primary_module,
                            scope: state.edit_scope,
                            can_edit_global: state.can_edit_global(),
                            saving: state.saving,
                            status: state.status.clone(),
                            on_command,
                            on_scope_change: move |scope: LayoutScope| {
                                sidebar.write().set_edit_scope(scope);
                            },
                        }
                    }
                }
            }
        }
    }
}
