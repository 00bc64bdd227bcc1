//! Sidebar state: server payload, the layer being edited, save status.
//!
//! Pure: commands are planned into [`PendingWrite`]s here, sent by the
//! bridge, and the outcome is folded back with [`SidebarState::commit`] or
//! [`SidebarState::fail`]. A failed write leaves the previous layout in place.

use idp_client::{ApiError, LayoutScope, LayoutSnapshot, SidebarPayload};
use idp_core::grouping::ModuleGroup;
use idp_core::layout::{
    LayoutSettings, layout_groups, materialize_layout, set_layout_item_hidden,
    set_layout_primary_module,
};
use idp_core::nav::{ModuleDefinition, NavItem};
use idp_core::theme::ThemeScope;
use idp_ui::LayoutCommand;

/// How the sidebar is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SidebarView {
    /// Module tabs with the selected module's pages.
    #[default]
    Tabs,
    /// Every module and page in one list.
    Flat,
}

impl SidebarView {
    pub fn toggled(self) -> Self {
        match self {
            SidebarView::Tabs => SidebarView::Flat,
            SidebarView::Flat => SidebarView::Tabs,
        }
    }

    /// Label of the button that switches away from this view.
    pub fn toggle_label(self) -> &'static str {
        match self {
            SidebarView::Tabs => "Все разделы",
            SidebarView::Flat => "По модулям",
        }
    }
}

/// What a write does to its layer.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteKind {
    Save(LayoutSettings),
    Reset,
}

/// A layout write waiting to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingWrite {
    pub scope: LayoutScope,
    pub kind: WriteKind,
}

/// Sidebar state for the workspace.
#[derive(Clone, Debug)]
pub struct SidebarState {
    pub payload: SidebarPayload,
    /// Canonical merge from the last write's snapshot. Cleared on load.
    pub server_merged: Option<LayoutSettings>,
    pub loaded: bool,
    pub edit_scope: LayoutScope,
    pub saving: bool,
    pub status: Option<String>,
    pub active_key: Option<String>,
    pub configuring: bool,
    pub view: SidebarView,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            payload: SidebarPayload::default(),
            server_merged: None,
            loaded: false,
            edit_scope: LayoutScope::User,
            saving: false,
            status: None,
            active_key: None,
            configuring: false,
            view: SidebarView::default(),
        }
    }

    /// Replace the server payload (initial load or refresh).
    pub fn load(&mut self, payload: SidebarPayload) {
        self.payload = payload;
        self.server_merged = None;
        self.loaded = true;
        if !self.payload.can_edit_global {
            self.edit_scope = LayoutScope::User;
        }
    }

    pub fn fail_load(&mut self, error: &ApiError) {
        self.loaded = true;
        self.status = Some(status_message(error));
    }

    pub fn items(&self) -> &[NavItem] {
        &self.payload.items
    }

    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.payload.modules
    }

    pub fn can_edit_global(&self) -> bool {
        self.payload.can_edit_global
    }

    /// What the sidebar shows: the server's merge after a write, otherwise
    /// global as base and user as override.
    pub fn effective_layout(&self) -> LayoutSettings {
        match &self.server_merged {
            Some(merged) => merged.clone(),
            None => self.payload.layout.merged(),
        }
    }

    pub fn groups(&self) -> Vec<ModuleGroup> {
        layout_groups(self.items(), self.modules(), &self.effective_layout())
    }

    pub fn primary_module(&self) -> Option<String> {
        self.effective_layout().primary_module
    }

    /// Starting point for edits in the current scope.
    ///
    /// A user customizes what they see, so user edits start from the merged
    /// layout. Global edits start from the global layer alone.
    pub fn editing_layout(&self) -> LayoutSettings {
        match self.edit_scope {
            LayoutScope::User => self.effective_layout(),
            LayoutScope::Global => self.payload.layout.global.clone().unwrap_or_default(),
        }
    }

    /// Groups as they look under [`Self::editing_layout`].
    pub fn editing_groups(&self) -> Vec<ModuleGroup> {
        layout_groups(self.items(), self.modules(), &self.editing_layout())
    }

    /// Whether the theme layer for `scope` may be changed by this session.
    pub fn can_edit_theme(&self, scope: ThemeScope) -> bool {
        self.loaded
            && match scope {
                ThemeScope::User => true,
                ThemeScope::Global => self.can_edit_global(),
            }
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    /// Switch the layer being edited. Global needs the server capability.
    pub fn set_edit_scope(&mut self, scope: LayoutScope) -> bool {
        if scope == LayoutScope::Global && !self.can_edit_global() {
            self.status = Some(status_message(&ApiError::GlobalEditDenied));
            return false;
        }
        self.edit_scope = scope;
        self.status = None;
        true
    }

    pub fn navigate(&mut self, key: impl Into<String>) {
        self.active_key = Some(key.into());
    }

    /// Compute the write a command asks for. `None` when nothing would change.
    pub fn plan(&self, command: &LayoutCommand) -> Option<PendingWrite> {
        let base = self.editing_layout();
        let kind = match command {
            LayoutCommand::Replace(layout) => {
                if *layout == base {
                    return None;
                }
                WriteKind::Save(layout.clone())
            }
            LayoutCommand::SetHidden { key, hidden } => {
                let materialized = materialize_layout(&base, self.items(), self.modules());
                WriteKind::Save(set_layout_item_hidden(&materialized, key, *hidden))
            }
            LayoutCommand::SetPrimaryModule(module) => {
                let next = set_layout_primary_module(&base, module.as_deref());
                if next == base {
                    return None;
                }
                WriteKind::Save(next)
            }
            LayoutCommand::Reset => WriteKind::Reset,
        };
        Some(PendingWrite {
            scope: self.edit_scope,
            kind,
        })
    }

    /// Mark a write in flight. Refused while another one is.
    pub fn begin(&mut self, write: &PendingWrite) -> bool {
        if self.saving {
            tracing::debug!(scope = %write.scope, "Ignoring layout write while saving");
            return false;
        }
        self.saving = true;
        self.status = None;
        true
    }

    /// Adopt the canonical snapshot returned after a write.
    pub fn commit(&mut self, scope: LayoutScope, snapshot: &LayoutSnapshot) {
        let layer = snapshot.layout.clone().filter(|_| snapshot.has_custom);
        self.payload.layout.set(scope, layer);
        self.server_merged = snapshot.merged.clone();
        self.payload.can_edit_global = snapshot.can_edit_global;
        if !snapshot.can_edit_global {
            self.edit_scope = LayoutScope::User;
        }
        self.saving = false;
        self.status = Some("Сохранено".to_string());
    }

    /// Record a failed write; the committed layout is left untouched.
    pub fn fail(&mut self, error: &ApiError) {
        self.saving = false;
        self.status = Some(status_message(error));
    }
}

/// User-facing status line for an API failure.
pub fn status_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthenticated => "Сессия истекла, войдите снова".to_string(),
        ApiError::Forbidden(_) => "Недостаточно прав".to_string(),
        ApiError::GlobalEditDenied => "Нет прав на изменение общего меню".to_string(),
        ApiError::RateLimited => "Слишком много запросов, попробуйте позже".to_string(),
        ApiError::NotFound(_) => "Настройки меню не найдены".to_string(),
        other => format!("Не удалось сохранить: {other}"),
    }
}
