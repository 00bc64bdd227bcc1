//! # IDP Core
//!
//! Navigation model and pure layout logic for the Intelligent Data Pro sidebar.
//!
//! Everything in this crate is synchronous and side-effect free apart from
//! `tracing` records, so the ordering, grouping and layout rules can be
//! exercised without a UI or a network.
//!
//! ## Layers
//!
//! - [`nav`]: typed navigation records and the tolerant JSON parse boundary
//! - [`collation`]: locale-aware label comparison (Cyrillic and Latin)
//! - [`ordering`]: the sidebar item comparator
//! - [`grouping`]: bucketing items into module groups
//! - [`layout`]: persisted layout settings and the pure mutation helpers
//! - [`dnd`]: drag-and-drop capability trait and configurator state machine
//! - [`theme`]: explicit theme layer context

pub mod collation;
pub mod dnd;
pub mod error;
pub mod grouping;
pub mod layout;
pub mod nav;
pub mod ordering;
pub mod theme;

pub use collation::compare_labels;
pub use dnd::{
    Configurator, ConfiguratorState, DragEntity, DragScope, LayoutReorder, ReorderHandler, array_move,
};
pub use error::NormalizeError;
pub use grouping::{ModuleGroup, group_raw_sidebar_items, group_sidebar_items_by_module};
pub use layout::{
    CustomLink, LAYOUT_VERSION, LayoutItem, LayoutSettings, apply_layout,
    ensure_layout_contains_keys, layout_groups, materialize_layout, merge_layout_layers,
    order_groups_by_layout, reorder_module_items_layout, reorder_modules_layout,
    set_layout_item_hidden, set_layout_primary_module,
};
pub use nav::{
    DEFAULT_MODULE_ID, DEFAULT_MODULE_ORDER, ModuleDefinition, NavItem, NavStatus, NavStatusKind,
    parse_module_definitions, parse_nav_items,
};
pub use ordering::{SidebarSortable, compare_sidebar_items, sort_sidebar_items};
pub use theme::{ResolvedTheme, ThemeContext, ThemeLayer, ThemePreset, ThemeScope};
