pub mod sidebar;

pub use sidebar::{PendingWrite, SidebarState, SidebarView, WriteKind};
