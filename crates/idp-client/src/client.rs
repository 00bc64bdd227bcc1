use reqwest::header::IF_MATCH;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use idp_core::layout::LayoutSettings;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    LayoutScope, LayoutSnapshot, LegacyLayoutRequest, LegacyLayoutResponse, SaveLayoutRequest,
    SidebarPayload,
};

/// Client for the navigation API
#[derive(Clone, Debug)]
pub struct NavigationClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl NavigationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Navigation API returned an error");
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the navigation items, modules and both layout layers
    pub async fn fetch_sidebar(&self) -> ApiResult<SidebarPayload> {
        self.send(self.request(Method::GET, "/api/v1/navigation/sidebar"))
            .await
    }

    /// Read one layer with its version and concurrency token
    pub async fn fetch_layout_snapshot(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        self.send(self.request(Method::GET, scope.snapshot_path()))
            .await
    }

    /// Persist a layer. `version` is the one previously read, if any; `etag`
    /// is sent as `If-Match`.
    pub async fn save_layout(
        &self,
        scope: LayoutScope,
        payload: &LayoutSettings,
        version: Option<u64>,
        etag: Option<&str>,
    ) -> ApiResult<LayoutSnapshot> {
        let body = SaveLayoutRequest::save(payload.clone(), version);
        let mut builder = self.request(Method::POST, scope.snapshot_path()).json(&body);
        if let Some(etag) = etag {
            builder = builder.header(IF_MATCH, etag);
        }
        self.send(builder).await
    }

    /// Clear a layer back to the server-declared order
    pub async fn reset_layout(&self, scope: LayoutScope) -> ApiResult<LayoutSnapshot> {
        let builder = self
            .request(Method::POST, scope.snapshot_path())
            .json(&SaveLayoutRequest::reset());
        self.send(builder).await
    }

    /// Older whole-layout PUT, answered with the refreshed sidebar
    pub async fn put_layout_legacy(
        &self,
        scope: LayoutScope,
        request: &LegacyLayoutRequest,
    ) -> ApiResult<LegacyLayoutResponse> {
        let builder = self.request(Method::PUT, scope.legacy_path()).json(request);
        self.send(builder).await
    }

    pub async fn fetch_user_sidebar_layout_snapshot(&self) -> ApiResult<LayoutSnapshot> {
        self.fetch_layout_snapshot(LayoutScope::User).await
    }

    pub async fn save_user_sidebar_layout(
        &self,
        payload: &LayoutSettings,
        version: Option<u64>,
    ) -> ApiResult<LayoutSnapshot> {
        self.save_layout(LayoutScope::User, payload, version, None)
            .await
    }

    pub async fn fetch_global_sidebar_layout_snapshot(&self) -> ApiResult<LayoutSnapshot> {
        self.fetch_layout_snapshot(LayoutScope::Global).await
    }

    pub async fn save_global_sidebar_layout(
        &self,
        payload: &LayoutSettings,
        version: Option<u64>,
    ) -> ApiResult<LayoutSnapshot> {
        self.save_layout(LayoutScope::Global, payload, version, None)
            .await
    }
}
