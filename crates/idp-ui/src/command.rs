//! Layout edits requested by the UI.

use idp_core::layout::LayoutSettings;

/// One user edit to the layer being customized.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutCommand {
    /// A drag produced a whole new layout.
    Replace(LayoutSettings),
    SetHidden { key: String, hidden: bool },
    SetPrimaryModule(Option<String>),
    /// Clear the layer back to the server-declared order.
    Reset,
}

impl LayoutCommand {
    /// Short label for logs and status lines.
    pub fn describe(&self) -> &'static str {
        match self {
            LayoutCommand::Replace(_) => "reorder",
            LayoutCommand::SetHidden { hidden: true, .. } => "hide",
            LayoutCommand::SetHidden { hidden: false, .. } => "show",
            LayoutCommand::SetPrimaryModule(_) => "primary-module",
            LayoutCommand::Reset => "reset",
        }
    }
}
