//! Theme root and switcher.
//!
//! The [`ThemeContext`] lives in a signal provided by [`ThemedRoot`], so each
//! root (and each test) owns its own theme state.

use dioxus::prelude::*;
use idp_core::theme::{ThemeContext, ThemePreset, ThemeScope};

/// The theme signal provided by the nearest [`ThemedRoot`].
pub fn use_theme() -> Signal<ThemeContext> {
    use_context()
}

/// Themed root wrapper component.
#[component]
pub fn ThemedRoot(children: Element) -> Element {
    let theme = use_context_provider(|| Signal::new(ThemeContext::new()));
    let resolved = theme.read().resolve();

    rsx! {
        div {
            class: "themed-root",
            "data-theme": "{resolved.preset.css_value()}",
            style: "{resolved.style()}",
            {children}
        }
    }
}

/// Preset dropdown for one theme layer.
#[component]
pub fn ThemeSwitcher(scope: ThemeScope, #[props(default)] disabled: bool) -> Element {
    let mut theme = use_theme();
    let current = theme.read().layer(scope).preset;
    let current_value = current.map(|p| p.css_value()).unwrap_or("");

    rsx! {
        div { class: "theme-switcher",
            select {
                value: "{current_value}",
                disabled,
                onchange: move |evt| {
                    let preset = ThemePreset::from_css_value(&evt.value());
                    theme.write().set_preset(scope, preset);
                },
                option { value: "", selected: current.is_none(), "По умолчанию" }
                for preset in ThemePreset::all() {
                    option {
                        value: "{preset.css_value()}",
                        selected: current == Some(*preset),
                        "{preset.display_name()}"
                    }
                }
            }
        }
    }
}
