//! Entry point for the Intelligent Data Pro sidebar desktop app.

use std::path::PathBuf;

use dioxus::desktop::{Config, LogicalPosition, LogicalSize, WindowBuilder};
use dioxus::prelude::*;

use idp_logging::{IdpSubscriberBuilder, LogConfig};
use idp_ui::ThemedRoot;
use idp_workspace::components::app::RootApp;

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|v| v.parse::<f64>().ok())
}

fn main() {
    let preset = std::env::var("IDP_LOG").unwrap_or_default();
    let log_dir = std::env::var("IDP_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./logs"));

    // Held for the whole run so file output is flushed on exit.
    let _log_guard = match IdpSubscriberBuilder::new()
        .with_config(LogConfig::from_preset(&preset, log_dir))
        .init()
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    tracing::info!("Starting Intelligent Data Pro sidebar");

    let mut wb = WindowBuilder::new()
        .with_title("Intelligent Data Pro")
        .with_maximized(false);

    match (env_f64("IDP_WIN_W"), env_f64("IDP_WIN_H")) {
        (Some(w), Some(h)) => wb = wb.with_inner_size(LogicalSize::new(w, h)),
        _ => wb = wb.with_inner_size(LogicalSize::new(1280.0, 800.0)),
    }
    if let (Some(x), Some(y)) = (env_f64("IDP_WIN_X"), env_f64("IDP_WIN_Y")) {
        wb = wb.with_position(LogicalPosition::new(x, y));
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(wb)
                .with_custom_head(format!("<style>{}</style>", idp_ui::SIDEBAR_CSS)),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        ThemedRoot {
            RootApp {}
        }
    }
}
