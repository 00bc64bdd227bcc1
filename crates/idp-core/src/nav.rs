//! Navigation records and the tolerant parse boundary.
//!
//! The server hands us loosely shaped JSON: items without a module, modules
//! with an empty id, orders sent as strings. Everything is normalized here,
//! once, into typed records that uphold the invariants the rest of the crate
//! relies on. Entries that cannot be salvaged are rejected with a
//! [`NormalizeError`] and skipped by the list parsers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{NormalizeError, json_kind};

/// Module id used for items and modules that do not name one.
pub const DEFAULT_MODULE_ID: &str = "general";

/// Order assigned to modules without a numeric order; sorts after any real order.
pub const DEFAULT_MODULE_ORDER: f64 = f64::MAX;

/// Badge attached to a navigation item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavStatusKind {
    New,
    Wip,
    Locked,
}

impl NavStatusKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "wip" => Some(Self::Wip),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Wip => "wip",
            Self::Locked => "locked",
        }
    }
}

/// Status tag with an optional explanatory link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavStatus {
    pub kind: NavStatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One navigable sidebar destination.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub key: String,
    pub label: String,
    /// Target path. `None` renders as a disabled placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default = "default_module_id")]
    pub module: String,
    #[serde(default)]
    pub section_order: Option<f64>,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<NavStatus>,
}

fn default_module_id() -> String {
    DEFAULT_MODULE_ID.to_string()
}

impl NavItem {
    /// Build an item with only the required fields set.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            href: None,
            module: default_module_id(),
            section_order: None,
            position: None,
            hidden: false,
            status: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_section_order(mut self, section_order: f64) -> Self {
        self.section_order = Some(section_order);
        self
    }

    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_status(mut self, kind: NavStatusKind, link: Option<String>) -> Self {
        self.status = Some(NavStatus { kind, link });
        self
    }

    /// Module id this item is grouped under; blank ids fall back to `general`.
    pub fn effective_module(&self) -> &str {
        let trimmed = self.module.trim();
        if trimmed.is_empty() {
            DEFAULT_MODULE_ID
        } else {
            trimmed
        }
    }

    /// Whether the item can be navigated to.
    pub fn is_enabled(&self) -> bool {
        self.href.as_deref().is_some_and(|href| !href.trim().is_empty())
    }

    /// Normalize one raw JSON entry.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let obj = value
            .as_object()
            .ok_or(NormalizeError::NotAnObject(json_kind(value)))?;

        let key = string_field(obj, "key").ok_or(NormalizeError::MissingKey("key"))?;
        let label = string_field(obj, "label").unwrap_or_else(|| key.clone());
        let module = string_field(obj, "module").unwrap_or_else(default_module_id);

        Ok(Self {
            href: string_field(obj, "href"),
            section_order: number_field(obj, "section_order"),
            position: number_field(obj, "position"),
            hidden: obj.get("hidden").and_then(Value::as_bool).unwrap_or(false),
            status: obj.get("status").and_then(parse_status),
            key,
            label,
            module,
        })
    }
}

/// A top-level grouping of navigation items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_module_order")]
    pub order: f64,
}

fn default_module_order() -> f64 {
    DEFAULT_MODULE_ORDER
}

impl ModuleDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, order: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            order,
        }
    }

    /// A definition for a module the server never declared.
    pub fn synthesized(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            order: DEFAULT_MODULE_ORDER,
        }
    }

    /// Apply the id, label and order fallbacks to an already typed definition.
    pub fn normalized(&self) -> Self {
        let id = match self.id.trim() {
            "" => DEFAULT_MODULE_ID.to_string(),
            trimmed => trimmed.to_string(),
        };
        let label = match self.label.trim() {
            "" => id.clone(),
            trimmed => trimmed.to_string(),
        };
        let order = if self.order.is_finite() {
            self.order
        } else {
            DEFAULT_MODULE_ORDER
        };
        Self { id, label, order }
    }

    /// Normalize one raw JSON entry.
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        let obj = value
            .as_object()
            .ok_or(NormalizeError::NotAnObject(json_kind(value)))?;

        let id = string_field(obj, "id").unwrap_or_else(default_module_id);
        let label = string_field(obj, "label").unwrap_or_else(|| id.clone());
        let order = number_field(obj, "order").unwrap_or(DEFAULT_MODULE_ORDER);

        Ok(Self { id, label, order })
    }
}

/// Normalize a raw item list, skipping entries that cannot be salvaged.
pub fn parse_nav_items(values: &[Value]) -> Vec<NavItem> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match NavItem::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!(index, error = %e, "Skipping malformed navigation item");
                None
            }
        })
        .collect()
}

/// Normalize a raw module list, skipping entries that cannot be salvaged.
pub fn parse_module_definitions(values: &[Value]) -> Vec<ModuleDefinition> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match ModuleDefinition::from_value(value) {
            Ok(module) => Some(module),
            Err(e) => {
                tracing::debug!(index, error = %e, "Skipping malformed module definition");
                None
            }
        })
        .collect()
}

/// Serde adapter: deserialize a JSON array of items through [`parse_nav_items`].
pub fn deserialize_nav_items<'de, D>(deserializer: D) -> Result<Vec<NavItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(parse_nav_items(&raw))
}

/// Serde adapter: deserialize a JSON array of modules through [`parse_module_definitions`].
pub fn deserialize_module_definitions<'de, D>(
    deserializer: D,
) -> Result<Vec<ModuleDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(parse_module_definitions(&raw))
}

/// Non-blank string, or a number rendered as a string (numeric keys happen).
fn string_field(obj: &Map<String, Value>, name: &str) -> Option<String> {
    match obj.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number, or a string that parses as one.
fn number_field(obj: &Map<String, Value>, name: &str) -> Option<f64> {
    let number = match obj.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn parse_status(value: &Value) -> Option<NavStatus> {
    match value {
        Value::String(s) => NavStatusKind::parse(s).map(|kind| NavStatus { kind, link: None }),
        Value::Object(obj) => {
            let kind = obj
                .get("kind")
                .or_else(|| obj.get("type"))
                .and_then(Value::as_str)
                .and_then(NavStatusKind::parse)?;
            Some(NavStatus {
                kind,
                link: string_field(obj, "link"),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_defaults_module_to_general() {
        let item = NavItem::from_value(&json!({ "key": "notes", "label": "Заметки" })).unwrap();
        assert_eq!(item.module, DEFAULT_MODULE_ID);
        assert_eq!(item.effective_module(), DEFAULT_MODULE_ID);
        assert!(!item.is_enabled());
    }

    #[test]
    fn test_item_blank_module_and_label_fall_back() {
        let item = NavItem::from_value(&json!({ "key": "tasks", "label": "  ", "module": "" })).unwrap();
        assert_eq!(item.module, DEFAULT_MODULE_ID);
        assert_eq!(item.label, "tasks");
    }

    #[test]
    fn test_item_numeric_fields_accept_strings() {
        let item = NavItem::from_value(&json!({
            "key": "a",
            "section_order": "2",
            "position": 3,
            "hidden": true,
        }))
        .unwrap();
        assert_eq!(item.section_order, Some(2.0));
        assert_eq!(item.position, Some(3.0));
        assert!(item.hidden);
    }

    #[test]
    fn test_item_non_numeric_order_is_none() {
        let item = NavItem::from_value(&json!({ "key": "a", "section_order": "soon", "position": null })).unwrap();
        assert_eq!(item.section_order, None);
        assert_eq!(item.position, None);
    }

    #[test]
    fn test_item_rejections() {
        assert_eq!(NavItem::from_value(&Value::Null), Err(NormalizeError::NotAnObject("null")));
        assert_eq!(NavItem::from_value(&json!([1])), Err(NormalizeError::NotAnObject("array")));
        assert_eq!(
            NavItem::from_value(&json!({ "label": "orphan" })),
            Err(NormalizeError::MissingKey("key"))
        );
    }

    #[test]
    fn test_item_status_forms() {
        let short = NavItem::from_value(&json!({ "key": "a", "status": "WIP" })).unwrap();
        assert_eq!(short.status.unwrap().kind, NavStatusKind::Wip);

        let full = NavItem::from_value(&json!({
            "key": "b",
            "status": { "kind": "locked", "link": "/billing" },
        }))
        .unwrap();
        let status = full.status.unwrap();
        assert_eq!(status.kind, NavStatusKind::Locked);
        assert_eq!(status.link.as_deref(), Some("/billing"));

        let unknown = NavItem::from_value(&json!({ "key": "c", "status": "beta" })).unwrap();
        assert!(unknown.status.is_none());
    }

    #[test]
    fn test_module_normalization() {
        let module = ModuleDefinition::from_value(&json!({ "id": "", "order": "x" })).unwrap();
        assert_eq!(module.id, DEFAULT_MODULE_ID);
        assert_eq!(module.label, DEFAULT_MODULE_ID);
        assert_eq!(module.order, DEFAULT_MODULE_ORDER);

        let typed = ModuleDefinition::new(" ", "", f64::NAN).normalized();
        assert_eq!(typed, ModuleDefinition::new("general", "general", DEFAULT_MODULE_ORDER));
    }

    #[test]
    fn test_parse_lists_skip_garbage() {
        let items = parse_nav_items(&[Value::Null, json!("text"), json!({ "key": "x" })]);
        assert_eq!(items.len(), 1);

        let modules = parse_module_definitions(&[Value::Null, json!({ "id": "crm", "order": 2 })]);
        assert_eq!(modules, vec![ModuleDefinition::new("crm", "crm", 2.0)]);
    }
}
