//! Per-scope snapshot cache over a [`LayoutBackend`].
//!
//! Reads are served from the cache once loaded. Every write invalidates its
//! scope and refetches, so callers always end up holding the server's
//! canonical snapshot rather than their own optimistic copy. Concurrent
//! writes to one scope are not merged: the last one to land wins.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use idp_core::layout::LayoutSettings;

use crate::client::NavigationClient;
use crate::error::{ApiError, ApiResult};
use crate::types::{LayoutScope, LayoutSnapshot, SidebarPayload};

/// The persistence operations the store needs.
#[async_trait]
pub trait LayoutBackend: Send + Sync {
    async fn fetch_sidebar(&self) -> ApiResult<SidebarPayload>;

    async fn fetch_snapshot(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot>;

    async fn save(
        &self,
        scope: LayoutScope,
        payload: &LayoutSettings,
        version: Option<u64>,
        etag: Option<&str>,
    ) -> ApiResult<LayoutSnapshot>;

    async fn reset(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot>;
}

#[async_trait]
impl LayoutBackend for NavigationClient {
    async fn fetch_sidebar(&self) -> ApiResult<SidebarPayload> {
        NavigationClient::fetch_sidebar(self).await
    }

    async fn fetch_snapshot(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        self.fetch_layout_snapshot(scope).await
    }

    async fn save(
        &self,
        scope: LayoutScope,
        payload: &LayoutSettings,
        version: Option<u64>,
        etag: Option<&str>,
    ) -> ApiResult<LayoutSnapshot> {
        self.save_layout(scope, payload, version, etag).await
    }

    async fn reset(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        self.reset_layout(scope).await
    }
}

/// Snapshot cache keyed by scope.
pub struct LayoutStore<B> {
    backend: B,
    snapshots: DashMap<LayoutScope, LayoutSnapshot>,
    can_edit_global: AtomicBool,
}

impl<B: LayoutBackend> LayoutStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            snapshots: DashMap::new(),
            can_edit_global: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the latest payload or snapshot granted global edits.
    pub fn can_edit_global(&self) -> bool {
        self.can_edit_global.load(Ordering::Acquire)
    }

    pub fn cached(&self, scope: LayoutScope) -> Option<LayoutSnapshot> {
        self.snapshots.get(&scope).map(|entry| entry.value().clone())
    }

    pub fn invalidate(&self, scope: LayoutScope) {
        self.snapshots.remove(&scope);
    }

    /// Fetch the sidebar payload. Not cached; it also refreshes the capability.
    pub async fn sidebar(&self) -> ApiResult<SidebarPayload> {
        let payload = self.backend.fetch_sidebar().await?;
        self.can_edit_global
            .store(payload.can_edit_global, Ordering::Release);
        Ok(payload)
    }

    /// Cached snapshot, fetched on first use.
    pub async fn snapshot(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        match self.cached(scope) {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh(scope).await,
        }
    }

    /// Fetch and cache a fresh snapshot.
    pub async fn refresh(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        let snapshot = self.backend.fetch_snapshot(scope).await?;
        self.remember(scope, snapshot.clone());
        Ok(snapshot)
    }

    /// Persist `payload` to `scope` and return the canonical snapshot.
    pub async fn save(&self, scope: LayoutScope, payload: &LayoutSettings) -> ApiResult<LayoutSnapshot> {
        self.ensure_writable(scope)?;

        let previous = self.cached(scope);
        let version = previous.as_ref().and_then(|s| s.version);
        let etag = previous.as_ref().and_then(|s| s.etag.clone());

        let written = self
            .backend
            .save(scope, payload, version, etag.as_deref())
            .await?;
        tracing::info!(%scope, items = payload.items.len(), version = ?written.version, "Saved sidebar layout");

        self.settle(scope, written).await
    }

    /// Clear `scope` and return the canonical snapshot.
    pub async fn reset(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        self.ensure_writable(scope)?;

        let written = self.backend.reset(scope).await?;
        tracing::info!(%scope, "Reset sidebar layout");

        self.settle(scope, written).await
    }

    fn ensure_writable(&self, scope: LayoutScope) -> ApiResult<()> {
        if scope == LayoutScope::Global && !self.can_edit_global() {
            return Err(ApiError::GlobalEditDenied);
        }
        Ok(())
    }

    /// Drop the cached scope and refetch it; keep the write's own response
    /// if the refetch fails, since the write itself went through.
    async fn settle(&self, scope: LayoutScope, written: LayoutSnapshot) -> ApiResult<LayoutSnapshot> {
        self.invalidate(scope);
        match self.refresh(scope).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!(%scope, error = %e, "Refetch after write failed; using write response");
                self.remember(scope, written.clone());
                Ok(written)
            }
        }
    }

    fn remember(&self, scope: LayoutScope, snapshot: LayoutSnapshot) {
        self.can_edit_global
            .store(snapshot.can_edit_global, Ordering::Release);
        self.snapshots.insert(scope, snapshot);
    }
}
