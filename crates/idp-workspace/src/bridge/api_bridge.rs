//! API bridge between the navigation API and the sidebar signals.

use std::sync::Arc;

use idp_client::{
    ApiResult, ClientConfig, LayoutBackend, LayoutSnapshot, LayoutStore, NavigationClient,
    SidebarPayload,
};

use crate::state::{PendingWrite, WriteKind};

/// Handle to the snapshot store, cheap to clone into spawned tasks.
pub struct ApiBridge<B = NavigationClient> {
    store: Arc<LayoutStore<B>>,
}

impl<B> Clone for ApiBridge<B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl ApiBridge<NavigationClient> {
    /// Build from `IDP_API_URL` / `IDP_API_TOKEN`.
    pub fn from_env() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        tracing::info!(base_url = %config.base_url, authenticated = config.token.is_some(), "Navigation API configured");
        Ok(Self::new(NavigationClient::from_config(&config)))
    }
}

impl<B: LayoutBackend> ApiBridge<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Arc::new(LayoutStore::new(backend)),
        }
    }

    pub fn store(&self) -> &LayoutStore<B> {
        &self.store
    }

    pub async fn load(&self) -> ApiResult<SidebarPayload> {
        let payload = self.store.sidebar().await?;
        tracing::info!(
            items = payload.items.len(),
            modules = payload.modules.len(),
            can_edit_global = payload.can_edit_global,
            "Loaded sidebar"
        );
        Ok(payload)
    }

    /// Send one planned write and return the canonical snapshot.
    pub async fn persist(&self, write: &PendingWrite) -> ApiResult<LayoutSnapshot> {
        match &write.kind {
            WriteKind::Save(layout) => self.store.save(write.scope, layout).await,
            WriteKind::Reset => self.store.reset(write.scope).await,
        }
    }
}
