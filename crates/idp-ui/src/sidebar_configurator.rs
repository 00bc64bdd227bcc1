//! Drag-and-drop editor for module order and page order.
//!
//! HTML5 drag events feed the [`Configurator`] state machine; a successful
//! drop runs through [`LayoutReorder`] and is emitted as
//! [`LayoutCommand::Replace`]. Pages cannot be dragged between modules.

use std::rc::Rc;

use dioxus::prelude::*;
use idp_core::dnd::{Configurator, ConfiguratorState, DragEntity, LayoutReorder};
use idp_core::layout::{LayoutSettings, layout_groups};
use idp_core::nav::{ModuleDefinition, NavItem};

use crate::command::LayoutCommand;

/// What a drop resolves against; shared by every row's handlers.
struct DropContext {
    items: Vec<NavItem>,
    modules: Vec<ModuleDefinition>,
    layout: LayoutSettings,
}

impl DropContext {
    /// Finish the drag in `configurator` over `target`; the new layout, if any.
    fn drop_on(&self, configurator: &mut Configurator, target: &DragEntity) -> Option<LayoutSettings> {
        configurator.sync(&layout_groups(&self.items, &self.modules, &self.layout));
        let mut reorder = LayoutReorder::new(&self.layout, &self.items, &self.modules);
        if configurator.drag_end(Some(target), &mut reorder) {
            reorder.into_changed()
        } else {
            None
        }
    }
}

fn is_dragged(state: &ConfiguratorState, entity: &DragEntity) -> bool {
    match (state, entity) {
        (ConfiguratorState::DraggingModule(id), DragEntity::Module(other)) => id == other,
        (ConfiguratorState::DraggingItem { key, .. }, DragEntity::Item { key: other, .. }) => key == other,
        _ => false,
    }
}

#[component]
pub fn SidebarConfigurator(
    items: Vec<NavItem>,
    modules: Vec<ModuleDefinition>,
    layout: LayoutSettings,
    saving: bool,
    on_command: EventHandler<LayoutCommand>,
    on_close: EventHandler<()>,
) -> Element {
    let mut configurator = use_signal(|| {
        let mut configurator = Configurator::new();
        configurator.open();
        configurator
    });

    let groups = layout_groups(&items, &modules, &layout);
    let context = Rc::new(DropContext { items, modules, layout });
    let state = configurator.read().state().clone();
    let root_class = if saving { "sidebar-configurator saving" } else { "sidebar-configurator" };

    // Every draggable row shares these handlers; `entity` is the row itself.
    let row_handlers = move |entity: DragEntity| {
        let start_entity = entity.clone();
        let drop_entity = entity;
        let context = context.clone();
        (
            move |_evt: DragEvent| {
                let mut configurator = configurator.write();
                if saving {
                    configurator.begin_save();
                } else {
                    configurator.finish_save();
                }
                configurator.drag_start(start_entity.clone());
            },
            move |evt: DragEvent| {
                evt.prevent_default();
                let next = context.drop_on(&mut configurator.write(), &drop_entity);
                if let Some(next) = next {
                    tracing::debug!(items = next.items.len(), "Sidebar layout reordered");
                    on_command.call(LayoutCommand::Replace(next));
                }
            },
        )
    };

    rsx! {
        div { class: "{root_class}",
            header { class: "configurator-header",
                span { "Настройка меню" }
                button {
                    class: "configurator-close",
                    disabled: saving,
                    onclick: move |_| {
                        configurator.write().close();
                        on_close.call(());
                    },
                    "Готово"
                }
            }
            ul { class: "configurator-modules",
                for group in groups.iter() {
                    {
                        let module_entity = DragEntity::module(group.id());
                        let module_class = if is_dragged(&state, &module_entity) {
                            "configurator-module dragging"
                        } else {
                            "configurator-module"
                        };
                        let (on_module_start, on_module_drop) = row_handlers(module_entity);
                        rsx! {
                            li { key: "{group.id()}", class: "{module_class}",
                                div {
                                    class: "configurator-module-header",
                                    draggable: !saving,
                                    ondragstart: on_module_start,
                                    ondragover: move |evt| evt.prevent_default(),
                                    ondrop: on_module_drop,
                                    ondragend: move |_| configurator.write().drag_cancel(),
                                    span { class: "drag-handle", "⋮⋮" }
                                    "{group.module.label}"
                                }
                                ul { class: "configurator-items",
                                    for item in group.items.iter() {
                                        {
                                            let item_entity = DragEntity::item(item.key.clone(), group.id());
                                            let item_class = match (is_dragged(&state, &item_entity), item.hidden) {
                                                (true, _) => "configurator-item dragging",
                                                (false, true) => "configurator-item hidden",
                                                (false, false) => "configurator-item",
                                            };
                                            let (on_item_start, on_item_drop) = row_handlers(item_entity);
                                            rsx! {
                                                li {
                                                    key: "{item.key}",
                                                    class: "{item_class}",
                                                    draggable: !saving,
                                                    ondragstart: on_item_start,
                                                    ondragover: move |evt| evt.prevent_default(),
                                                    ondrop: on_item_drop,
                                                    ondragend: move |_| configurator.write().drag_cancel(),
                                                    span { class: "drag-handle", "⋮⋮" }
                                                    "{item.label}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
