//! Shared UI components for the Intelligent Data Pro sidebar.
//!
//! Rendering only: components receive groups and layouts as props and report
//! user intent through [`LayoutCommand`]s and event handlers. Persistence is
//! the host application's job.

pub mod command;
pub mod left_sidebar;
pub mod module_tabs;
pub mod sidebar_configurator;
pub mod sidebar_editor;
pub mod smart_sidebar;
pub mod theme;

pub use command::LayoutCommand;
pub use left_sidebar::{LeftSidebar, NavEntry};
pub use module_tabs::ModuleTabs;
pub use sidebar_configurator::SidebarConfigurator;
pub use sidebar_editor::SidebarEditor;
pub use smart_sidebar::{SmartSidebar, initial_module};
pub use theme::{ThemeSwitcher, ThemedRoot, use_theme};

/// Sidebar CSS: layout, badges, drag affordances and theme variables.
pub const SIDEBAR_CSS: &str = include_str!("../assets/sidebar.css");
