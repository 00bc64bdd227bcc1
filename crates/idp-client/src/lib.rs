//! # IDP Client
//!
//! Thin async wrappers around the navigation REST API, plus a per-scope
//! snapshot cache that refetches the canonical layout after every write.
//!
//! ```no_run
//! # async fn demo() -> idp_client::ApiResult<()> {
//! use idp_client::{ClientConfig, LayoutScope, LayoutStore, NavigationClient};
//!
//! let client = NavigationClient::from_config(&ClientConfig::from_env()?);
//! let store = LayoutStore::new(client);
//! let sidebar = store.sidebar().await?;
//! let snapshot = store.snapshot(LayoutScope::User).await?;
//! println!("{} items, custom layout: {}", sidebar.items.len(), snapshot.has_custom);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use client::NavigationClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ApiError, ApiResult};
pub use store::{LayoutBackend, LayoutStore};
pub use types::{
    LayoutLayers, LayoutScope, LayoutSnapshot, LegacyLayoutRequest, LegacyLayoutResponse,
    SaveLayoutRequest, SidebarPayload,
};
