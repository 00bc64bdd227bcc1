use dioxus::prelude::*;
use idp_core::grouping::ModuleGroup;

/// One tab per module group; the primary module is starred.
#[component]
pub fn ModuleTabs(
    groups: Vec<ModuleGroup>,
    active_module: Option<String>,
    primary_module: Option<String>,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "module-tabs", role: "tablist",
            for group in groups.iter() {
                {
                    let id = group.id().to_string();
                    let is_active = active_module.as_deref() == Some(id.as_str());
                    let is_primary = primary_module.as_deref() == Some(id.as_str());
                    let class = if is_active { "module-tab active" } else { "module-tab" };
                    let selected_id = id.clone();
                    rsx! {
                        button {
                            key: "{id}",
                            class: "{class}",
                            role: "tab",
                            "aria-selected": "{is_active}",
                            onclick: move |_| on_select.call(selected_id.clone()),
                            if is_primary {
                                span { class: "module-tab-primary", "★" }
                            }
                            "{group.module.label}"
                        }
                    }
                }
            }
        }
    }
}
