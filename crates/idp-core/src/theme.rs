//! Theme layers.
//!
//! A theme is a set of CSS custom properties. Admins set a global layer,
//! users may override it with their own, and the resolved theme is defaults,
//! then global, then user. The layers live in an explicit [`ThemeContext`]
//! owned by whoever renders, never in process-wide state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Built-in palettes a layer can start from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemePreset {
    #[default]
    Light,
    Dark,
    Contrast,
}

impl ThemePreset {
    /// Value for the `data-theme` attribute.
    pub fn css_value(&self) -> &'static str {
        match self {
            ThemePreset::Light => "light",
            ThemePreset::Dark => "dark",
            ThemePreset::Contrast => "contrast",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemePreset::Light => "Светлая",
            ThemePreset::Dark => "Тёмная",
            ThemePreset::Contrast => "Контрастная",
        }
    }

    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Light, ThemePreset::Dark, ThemePreset::Contrast]
    }

    pub fn from_css_value(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.css_value() == value)
    }

    fn variables(&self) -> BTreeMap<String, String> {
        let pairs: &[(&str, &str)] = match self {
            ThemePreset::Light => &[
                ("--sidebar-bg", "#f8fafc"),
                ("--sidebar-fg", "#0f172a"),
                ("--sidebar-accent", "#2563eb"),
            ],
            ThemePreset::Dark => &[
                ("--sidebar-bg", "#0f172a"),
                ("--sidebar-fg", "#e2e8f0"),
                ("--sidebar-accent", "#60a5fa"),
            ],
            ThemePreset::Contrast => &[
                ("--sidebar-bg", "#000000"),
                ("--sidebar-fg", "#ffffff"),
                ("--sidebar-accent", "#ffd400"),
            ],
        };
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Which layer a change targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeScope {
    Global,
    User,
}

/// One layer: an optional preset plus explicit variable overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<ThemePreset>,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// The theme actually applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub preset: ThemePreset,
    pub variables: BTreeMap<String, String>,
}

impl ResolvedTheme {
    /// Inline `style` attribute declaring every variable.
    pub fn style(&self) -> String {
        self.variables
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Defaults plus the global and user layers for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeContext {
    defaults: ThemePreset,
    global: ThemeLayer,
    user: ThemeLayer,
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeContext {
    pub fn new() -> Self {
        Self {
            defaults: ThemePreset::default(),
            global: ThemeLayer::default(),
            user: ThemeLayer::default(),
        }
    }

    pub fn layer(&self, scope: ThemeScope) -> &ThemeLayer {
        match scope {
            ThemeScope::Global => &self.global,
            ThemeScope::User => &self.user,
        }
    }

    /// Replace one layer wholesale.
    pub fn set_layer(&mut self, scope: ThemeScope, layer: ThemeLayer) {
        match scope {
            ThemeScope::Global => self.global = layer,
            ThemeScope::User => self.user = layer,
        }
    }

    /// Switch a layer's preset, keeping its explicit overrides.
    pub fn set_preset(&mut self, scope: ThemeScope, preset: Option<ThemePreset>) {
        match scope {
            ThemeScope::Global => self.global.preset = preset,
            ThemeScope::User => self.user.preset = preset,
        }
    }

    pub fn resolve(&self) -> ResolvedTheme {
        let preset = self
            .user
            .preset
            .or(self.global.preset)
            .unwrap_or(self.defaults);

        let mut variables = preset.variables();
        variables.extend(self.global.values.clone());
        variables.extend(self.user.values.clone());

        ResolvedTheme { preset, variables }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(pairs: &[(&str, &str)]) -> ThemeLayer {
        ThemeLayer {
            preset: None,
            values: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    #[test]
    fn test_defaults_resolve() {
        let resolved = ThemeContext::new().resolve();
        assert_eq!(resolved.preset, ThemePreset::Light);
        assert_eq!(resolved.variables["--sidebar-bg"], "#f8fafc");
    }

    #[test]
    fn test_user_over_global_over_defaults() {
        let mut ctx = ThemeContext::new();
        ctx.set_layer(ThemeScope::Global, layer(&[("--sidebar-bg", "#111"), ("--sidebar-fg", "#222")]));
        ctx.set_layer(ThemeScope::User, layer(&[("--sidebar-bg", "#333")]));

        let resolved = ctx.resolve();
        assert_eq!(resolved.variables["--sidebar-bg"], "#333");
        assert_eq!(resolved.variables["--sidebar-fg"], "#222");
        assert_eq!(resolved.variables["--sidebar-accent"], "#2563eb");
    }

    #[test]
    fn test_preset_precedence() {
        let mut ctx = ThemeContext::new();
        ctx.set_preset(ThemeScope::Global, Some(ThemePreset::Dark));
        assert_eq!(ctx.resolve().preset, ThemePreset::Dark);
        ctx.set_preset(ThemeScope::User, Some(ThemePreset::Contrast));
        assert_eq!(ctx.resolve().preset, ThemePreset::Contrast);
        ctx.set_preset(ThemeScope::User, None);
        assert_eq!(ctx.resolve().preset, ThemePreset::Dark);
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut a = ThemeContext::new();
        let b = ThemeContext::new();
        a.set_preset(ThemeScope::User, Some(ThemePreset::Dark));
        assert_ne!(a.resolve(), b.resolve());
    }

    #[test]
    fn test_style_string() {
        let mut ctx = ThemeContext::new();
        ctx.set_layer(ThemeScope::User, layer(&[("--x", "1")]));
        assert!(ctx.resolve().style().contains("--x: 1;"));
    }
}
