//! Visibility, primary module, scope and reset controls.

use dioxus::prelude::*;
use idp_client::LayoutScope;
use idp_core::grouping::ModuleGroup;

use crate::command::LayoutCommand;

fn scope_label(scope: LayoutScope) -> &'static str {
    match scope {
        LayoutScope::User => "Моё меню",
        LayoutScope::Global => "Меню для всех",
    }
}

/// Every control is disabled while a save is in flight. The global scope is
/// only offered when the server granted `can_edit_global`.
#[component]
pub fn SidebarEditor(
    groups: Vec<ModuleGroup>,
    primary_module: Option<String>,
    scope: LayoutScope,
    can_edit_global: bool,
    saving: bool,
    status: Option<String>,
    on_command: EventHandler<LayoutCommand>,
    on_scope_change: EventHandler<LayoutScope>,
) -> Element {
    let primary_value = primary_module.clone().unwrap_or_default();
    let status_text = if saving {
        "Сохранение…".to_string()
    } else {
        status.clone().unwrap_or_default()
    };

    rsx! {
        div { class: "sidebar-editor",
            div { class: "editor-row",
                label { "Область" }
                select {
                    value: "{scope.as_str()}",
                    disabled: saving,
                    onchange: move |evt| {
                        let next = match evt.value().as_str() {
                            "global" => LayoutScope::Global,
                            _ => LayoutScope::User,
                        };
                        on_scope_change.call(next);
                    },
                    option {
                        value: "user",
                        selected: scope == LayoutScope::User,
                        "{scope_label(LayoutScope::User)}"
                    }
                    option {
                        value: "global",
                        selected: scope == LayoutScope::Global,
                        disabled: !can_edit_global,
                        "{scope_label(LayoutScope::Global)}"
                    }
                }
            }

            div { class: "editor-row",
                label { "Стартовый модуль" }
                select {
                    value: "{primary_value}",
                    disabled: saving,
                    onchange: move |evt| {
                        let value = evt.value();
                        let module = (!value.is_empty()).then_some(value);
                        on_command.call(LayoutCommand::SetPrimaryModule(module));
                    },
                    option { value: "", selected: primary_module.is_none(), "Не выбран" }
                    for group in groups.iter() {
                        option {
                            key: "{group.id()}",
                            value: "{group.id()}",
                            selected: primary_module.as_deref() == Some(group.id()),
                            "{group.module.label}"
                        }
                    }
                }
            }

            for group in groups.iter() {
                fieldset { key: "{group.id()}", class: "editor-module", disabled: saving,
                    legend { "{group.module.label}" }
                    for item in group.items.iter() {
                        {
                            let key = item.key.clone();
                            let visible = !item.hidden;
                            rsx! {
                                label { key: "{item.key}", class: "editor-item",
                                    input {
                                        r#type: "checkbox",
                                        checked: visible,
                                        disabled: saving,
                                        onchange: move |_| {
                                            on_command.call(LayoutCommand::SetHidden {
                                                key: key.clone(),
                                                hidden: visible,
                                            });
                                        },
                                    }
                                    "{item.label}"
                                }
                            }
                        }
                    }
                }
            }

            div { class: "editor-footer",
                button {
                    class: "editor-reset",
                    disabled: saving,
                    onclick: move |_| on_command.call(LayoutCommand::Reset),
                    "Сбросить"
                }
                span { class: "editor-status", "{status_text}" }
            }
        }
    }
}
