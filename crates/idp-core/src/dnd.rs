//! Drag-and-drop customization, independent of any UI library.
//!
//! The UI reports what was picked up and what it was dropped on; the
//! [`Configurator`] turns that into index moves on a [`ReorderHandler`].
//! [`LayoutReorder`] is the handler that feeds the layout mutation helpers.

use std::collections::HashMap;

use crate::grouping::ModuleGroup;
use crate::layout::{
    LayoutSettings, layout_groups, materialize_layout, reorder_module_items_layout,
    reorder_modules_layout,
};
use crate::nav::{ModuleDefinition, NavItem};

/// Something that can be dragged or dropped on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragEntity {
    Module(String),
    Item { key: String, module: String },
}

impl DragEntity {
    pub fn item(key: impl Into<String>, module: impl Into<String>) -> Self {
        Self::Item {
            key: key.into(),
            module: module.into(),
        }
    }

    pub fn module(id: impl Into<String>) -> Self {
        Self::Module(id.into())
    }
}

/// The list an index move applies to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragScope {
    Modules,
    Items(String),
}

/// Receiver of reorder gestures.
pub trait ReorderHandler {
    /// Move the entry at `old_index` of `scope` to `new_index`.
    fn on_reorder(&mut self, scope: &DragScope, old_index: usize, new_index: usize);

    /// A page was dropped into a different module.
    fn on_cross_group_move(&mut self, key: &str, from_module: &str, to_module: &str);
}

/// Where a configurator instance is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfiguratorState {
    #[default]
    Closed,
    Idle,
    DraggingModule(String),
    DraggingItem { key: String, module: String },
}

/// Drag state machine for one sidebar configurator.
#[derive(Clone, Debug, Default)]
pub struct Configurator {
    state: ConfiguratorState,
    saving: bool,
    modules: Vec<String>,
    items: HashMap<String, Vec<String>>,
}

impl Configurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the orderings indices are resolved against.
    pub fn sync(&mut self, groups: &[ModuleGroup]) {
        self.modules = groups.iter().map(|g| g.id().to_string()).collect();
        self.items = groups
            .iter()
            .map(|g| (g.id().to_string(), g.keys()))
            .collect();
    }

    pub fn state(&self) -> &ConfiguratorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ConfiguratorState::Closed
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Hide/show and drags are only accepted while open and not saving.
    pub fn can_edit(&self) -> bool {
        self.is_open() && !self.saving
    }

    pub fn open(&mut self) {
        if self.state == ConfiguratorState::Closed {
            self.state = ConfiguratorState::Idle;
        }
    }

    /// Close, abandoning any drag in progress.
    pub fn close(&mut self) {
        self.state = ConfiguratorState::Closed;
    }

    pub fn begin_save(&mut self) {
        self.saving = true;
    }

    pub fn finish_save(&mut self) {
        self.saving = false;
    }

    /// Pick something up. Refused unless idle and not saving.
    pub fn drag_start(&mut self, active: DragEntity) -> bool {
        if self.state != ConfiguratorState::Idle || self.saving {
            tracing::debug!(state = ?self.state, saving = self.saving, "Ignoring drag start");
            return false;
        }
        self.state = match active {
            DragEntity::Module(id) => ConfiguratorState::DraggingModule(id),
            DragEntity::Item { key, module } => ConfiguratorState::DraggingItem { key, module },
        };
        true
    }

    pub fn drag_cancel(&mut self) {
        if self.is_open() {
            self.state = ConfiguratorState::Idle;
        }
    }

    /// Drop on `over`. Returns whether the handler was invoked.
    ///
    /// Dropping on nothing, or on the dragged entity itself, is a no-op.
    pub fn drag_end(&mut self, over: Option<&DragEntity>, handler: &mut impl ReorderHandler) -> bool {
        let active = match std::mem::replace(&mut self.state, ConfiguratorState::Idle) {
            ConfiguratorState::DraggingModule(id) => DragEntity::Module(id),
            ConfiguratorState::DraggingItem { key, module } => DragEntity::Item { key, module },
            other => {
                self.state = other;
                return false;
            }
        };
        let Some(over) = over else {
            tracing::debug!(?active, "Drag ended outside any drop zone");
            return false;
        };
        if *over == active {
            return false;
        }

        match (&active, over) {
            (DragEntity::Module(from), DragEntity::Module(to)) => {
                let old = self.modules.iter().position(|id| id == from);
                let new = self.modules.iter().position(|id| id == to);
                match (old, new) {
                    (Some(old), Some(new)) => {
                        handler.on_reorder(&DragScope::Modules, old, new);
                        true
                    }
                    _ => false,
                }
            }
            (
                DragEntity::Item { key: from, module: from_module },
                DragEntity::Item { key: to, module: to_module },
            ) if from_module == to_module => {
                let Some(keys) = self.items.get(from_module) else {
                    return false;
                };
                let old = keys.iter().position(|k| k == from);
                let new = keys.iter().position(|k| k == to);
                match (old, new) {
                    (Some(old), Some(new)) => {
                        handler.on_reorder(&DragScope::Items(from_module.clone()), old, new);
                        true
                    }
                    _ => false,
                }
            }
            (DragEntity::Item { key, module: from_module }, DragEntity::Item { module: to_module, .. })
            | (DragEntity::Item { key, module: from_module }, DragEntity::Module(to_module)) => {
                if from_module == to_module {
                    return false;
                }
                handler.on_cross_group_move(key, from_module, to_module);
                true
            }
            (DragEntity::Module(_), DragEntity::Item { .. }) => false,
        }
    }
}

/// Move one element, shifting the ones in between.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
}

/// Applies reorder gestures to a layout through the pure mutation helpers.
///
/// The starting layout is materialized first, so index moves act on exactly
/// the order the user sees.
pub struct LayoutReorder<'a> {
    items: &'a [NavItem],
    modules: &'a [ModuleDefinition],
    layout: LayoutSettings,
    changed: bool,
}

impl<'a> LayoutReorder<'a> {
    pub fn new(layout: &LayoutSettings, items: &'a [NavItem], modules: &'a [ModuleDefinition]) -> Self {
        Self {
            items,
            modules,
            layout: materialize_layout(layout, items, modules),
            changed: false,
        }
    }

    pub fn groups(&self) -> Vec<ModuleGroup> {
        layout_groups(self.items, self.modules, &self.layout)
    }

    pub fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    /// The new layout, if any gesture changed it.
    pub fn into_changed(self) -> Option<LayoutSettings> {
        self.changed.then_some(self.layout)
    }
}

impl ReorderHandler for LayoutReorder<'_> {
    fn on_reorder(&mut self, scope: &DragScope, old_index: usize, new_index: usize) {
        let groups = self.groups();
        match scope {
            DragScope::Modules => {
                let mut order: Vec<String> = groups.iter().map(|g| g.id().to_string()).collect();
                array_move(&mut order, old_index, new_index);
                self.layout = reorder_modules_layout(&self.layout, self.items, &order);
            }
            DragScope::Items(module_id) => {
                let Some(group) = groups.iter().find(|g| g.id() == module_id) else {
                    tracing::debug!(module = %module_id, "Reorder for a module with no items");
                    return;
                };
                let mut keys = group.keys();
                array_move(&mut keys, old_index, new_index);
                self.layout = reorder_module_items_layout(&self.layout, self.items, module_id, &keys);
            }
        }
        self.changed = true;
    }

    fn on_cross_group_move(&mut self, key: &str, from_module: &str, to_module: &str) {
        // Layouts order and hide pages; module membership belongs to the server.
        tracing::debug!(key, from_module, to_module, "Rejecting cross-module page move");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        reorders: Vec<(DragScope, usize, usize)>,
        moves: Vec<(String, String, String)>,
    }

    impl ReorderHandler for Recorder {
        fn on_reorder(&mut self, scope: &DragScope, old_index: usize, new_index: usize) {
            self.reorders.push((scope.clone(), old_index, new_index));
        }

        fn on_cross_group_move(&mut self, key: &str, from_module: &str, to_module: &str) {
            self.moves.push((key.into(), from_module.into(), to_module.into()));
        }
    }

    fn fixture() -> (Vec<NavItem>, Vec<ModuleDefinition>) {
        let items = vec![
            NavItem::new("overview", "Обзор").with_module("control").with_position(1.0),
            NavItem::new("reports", "Отчёты").with_module("control").with_position(2.0),
            NavItem::new("inbox", "Входящие").with_module("tasks").with_position(1.0),
        ];
        let modules = vec![
            ModuleDefinition::new("control", "Контроль", 1.0),
            ModuleDefinition::new("tasks", "Задачи", 2.0),
        ];
        (items, modules)
    }

    fn open_configurator() -> Configurator {
        let (items, modules) = fixture();
        let mut configurator = Configurator::new();
        configurator.sync(&layout_groups(&items, &modules, &LayoutSettings::default()));
        configurator.open();
        configurator
    }

    #[test]
    fn test_lifecycle() {
        let mut configurator = Configurator::new();
        assert!(!configurator.drag_start(DragEntity::module("tasks")));
        configurator.open();
        assert_eq!(configurator.state(), &ConfiguratorState::Idle);
        assert!(configurator.drag_start(DragEntity::module("tasks")));
        assert_eq!(configurator.state(), &ConfiguratorState::DraggingModule("tasks".into()));
        configurator.close();
        assert!(!configurator.is_open());
    }

    #[test]
    fn test_module_drop_reports_indices() {
        let mut configurator = open_configurator();
        let mut recorder = Recorder::default();
        configurator.drag_start(DragEntity::module("tasks"));
        assert!(configurator.drag_end(Some(&DragEntity::module("control")), &mut recorder));
        assert_eq!(recorder.reorders, vec![(DragScope::Modules, 1, 0)]);
        assert_eq!(configurator.state(), &ConfiguratorState::Idle);
    }

    #[test]
    fn test_same_or_missing_target_is_noop() {
        let mut configurator = open_configurator();
        let mut recorder = Recorder::default();

        configurator.drag_start(DragEntity::item("overview", "control"));
        assert!(!configurator.drag_end(Some(&DragEntity::item("overview", "control")), &mut recorder));

        configurator.drag_start(DragEntity::item("overview", "control"));
        assert!(!configurator.drag_end(None, &mut recorder));

        assert!(recorder.reorders.is_empty());
        assert!(recorder.moves.is_empty());
    }

    #[test]
    fn test_cross_group_drop() {
        let mut configurator = open_configurator();
        let mut recorder = Recorder::default();
        configurator.drag_start(DragEntity::item("inbox", "tasks"));
        assert!(configurator.drag_end(Some(&DragEntity::item("overview", "control")), &mut recorder));
        assert_eq!(recorder.moves, vec![("inbox".into(), "tasks".into(), "control".into())]);
    }

    #[test]
    fn test_saving_blocks_drags() {
        let mut configurator = open_configurator();
        configurator.begin_save();
        assert!(!configurator.can_edit());
        assert!(!configurator.drag_start(DragEntity::module("tasks")));
        configurator.finish_save();
        assert!(configurator.can_edit());
        assert!(configurator.drag_start(DragEntity::module("tasks")));
    }

    #[test]
    fn test_layout_reorder_items() {
        let (items, modules) = fixture();
        let mut configurator = open_configurator();
        let mut reorder = LayoutReorder::new(&LayoutSettings::default(), &items, &modules);

        configurator.drag_start(DragEntity::item("reports", "control"));
        configurator.drag_end(Some(&DragEntity::item("overview", "control")), &mut reorder);

        let layout = reorder.into_changed().unwrap();
        assert_eq!(layout.keys(), vec!["reports", "overview", "inbox"]);
    }

    #[test]
    fn test_layout_reorder_rejects_cross_group() {
        let (items, modules) = fixture();
        let mut reorder = LayoutReorder::new(&LayoutSettings::default(), &items, &modules);
        reorder.on_cross_group_move("inbox", "tasks", "control");
        assert!(reorder.into_changed().is_none());
    }

    #[test]
    fn test_array_move() {
        let mut values = vec!['a', 'b', 'c', 'd'];
        array_move(&mut values, 0, 2);
        assert_eq!(values, vec!['b', 'c', 'a', 'd']);
        array_move(&mut values, 3, 0);
        assert_eq!(values, vec!['d', 'b', 'c', 'a']);
        array_move(&mut values, 9, 0);
        assert_eq!(values, vec!['d', 'b', 'c', 'a']);
    }
}
