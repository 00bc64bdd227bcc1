//! Wire types for the navigation endpoints.

use idp_core::layout::{LAYOUT_VERSION, LayoutSettings, merge_layout_layers};
use idp_core::nav::{ModuleDefinition, NavItem, deserialize_module_definitions, deserialize_nav_items};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which persisted layer a request targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutScope {
    User,
    Global,
}

impl LayoutScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutScope::User => "user",
            LayoutScope::Global => "global",
        }
    }

    /// Snapshot endpoint (GET to read, POST to save or reset).
    pub fn snapshot_path(&self) -> &'static str {
        match self {
            LayoutScope::User => "/api/v1/navigation/user-sidebar-layout",
            LayoutScope::Global => "/api/v1/navigation/global-sidebar-layout",
        }
    }

    /// Legacy PUT endpoint.
    pub fn legacy_path(&self) -> &'static str {
        match self {
            LayoutScope::User => "/api/v1/navigation/sidebar/user",
            LayoutScope::Global => "/api/v1/navigation/sidebar/global",
        }
    }
}

impl std::fmt::Display for LayoutScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user and global layers as delivered with the sidebar.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutLayers {
    #[serde(default)]
    pub user: Option<LayoutSettings>,
    #[serde(default)]
    pub global: Option<LayoutSettings>,
}

impl LayoutLayers {
    pub fn get(&self, scope: LayoutScope) -> Option<&LayoutSettings> {
        match scope {
            LayoutScope::User => self.user.as_ref(),
            LayoutScope::Global => self.global.as_ref(),
        }
    }

    pub fn set(&mut self, scope: LayoutScope, layout: Option<LayoutSettings>) {
        match scope {
            LayoutScope::User => self.user = layout,
            LayoutScope::Global => self.global = layout,
        }
    }

    /// Global as base, user as override.
    pub fn merged(&self) -> LayoutSettings {
        let empty = LayoutSettings::default();
        merge_layout_layers(
            self.global.as_ref().unwrap_or(&empty),
            self.user.as_ref().unwrap_or(&empty),
        )
    }
}

fn default_version() -> u32 {
    LAYOUT_VERSION
}

/// `GET /api/v1/navigation/sidebar`.
///
/// Items and modules go through the tolerant parse boundary, so a malformed
/// entry is dropped instead of failing the whole payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarPayload {
    #[serde(default = "default_version")]
    pub v: u32,
    #[serde(default, deserialize_with = "deserialize_nav_items")]
    pub items: Vec<NavItem>,
    #[serde(default, deserialize_with = "deserialize_module_definitions")]
    pub modules: Vec<ModuleDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets: Option<Value>,
    #[serde(default)]
    pub layout: LayoutLayers,
    /// Snake case on this endpoint, unlike the snapshot.
    #[serde(default, rename = "can_edit_global", alias = "canEditGlobal")]
    pub can_edit_global: bool,
}

impl Default for SidebarPayload {
    fn default() -> Self {
        Self {
            v: LAYOUT_VERSION,
            items: Vec::new(),
            modules: Vec::new(),
            widgets: None,
            layout: LayoutLayers::default(),
            can_edit_global: false,
        }
    }
}

/// A versioned read of one layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    /// The scope's own layer; `None` when nothing is customized.
    #[serde(default)]
    pub layout: Option<LayoutSettings>,
    #[serde(default)]
    pub version: Option<u64>,
    #[serde(default)]
    pub has_custom: bool,
    /// Server-side merge of global and user.
    #[serde(default)]
    pub merged: Option<LayoutSettings>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub can_edit_global: bool,
}

impl LayoutSnapshot {
    /// The scope's own layer, or an empty one.
    pub fn scope_layout(&self) -> LayoutSettings {
        self.layout.clone().unwrap_or_default()
    }

    /// What the sidebar should display: the server merge when present.
    pub fn effective_layout(&self) -> LayoutSettings {
        self.merged
            .clone()
            .or_else(|| self.layout.clone())
            .unwrap_or_default()
    }
}

/// Body of a snapshot POST.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveLayoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<LayoutSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<bool>,
}

impl SaveLayoutRequest {
    pub fn save(payload: LayoutSettings, version: Option<u64>) -> Self {
        Self {
            payload: Some(payload),
            version,
            reset: None,
        }
    }

    pub fn reset() -> Self {
        Self {
            reset: Some(true),
            ..Self::default()
        }
    }
}

/// Body of the legacy PUT.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyLayoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset: Option<bool>,
}

impl LegacyLayoutRequest {
    pub fn layout(layout: LayoutSettings) -> Self {
        Self {
            layout: Some(layout),
            reset: None,
        }
    }

    pub fn reset() -> Self {
        Self {
            layout: None,
            reset: Some(true),
        }
    }
}

/// Response of the legacy PUT: the refreshed sidebar.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyLayoutResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub payload: Option<SidebarPayload>,
}
