//! NavigationClient against an in-process axum double of the navigation API.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use idp_client::*;
use idp_core::layout::{LayoutSettings, set_layout_item_hidden};

#[derive(Default)]
struct Recorded {
    auth: Mutex<Vec<Option<String>>>,
    if_match: Mutex<Vec<Option<String>>>,
    bodies: Mutex<Vec<Value>>,
    can_edit_global: bool,
}

type Shared = Arc<Recorded>;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn sidebar(State(recorded): State<Shared>, headers: HeaderMap) -> Json<Value> {
    recorded.auth.lock().unwrap().push(header(&headers, "authorization"));
    Json(json!({
        "v": 1,
        "items": [
            { "key": "overview", "label": "Обзор", "module": "control", "position": 1 },
            null,
            { "key": "inbox", "label": "Входящие", "module": "tasks", "position": "2" },
        ],
        "modules": [{ "id": "control", "label": "Контроль", "order": 1 }],
        "layout": { "user": null, "global": { "items": [{ "key": "inbox", "position": 1 }] } },
        "can_edit_global": recorded.can_edit_global,
    }))
}

async fn user_snapshot() -> Json<Value> {
    Json(json!({
        "layout": null,
        "version": 3,
        "hasCustom": false,
        "merged": null,
        "etag": "\"3\"",
        "canEditGlobal": false,
    }))
}

async fn save_user(
    State(recorded): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    recorded.if_match.lock().unwrap().push(header(&headers, "if-match"));
    recorded.bodies.lock().unwrap().push(body.clone());

    let reset = body.get("reset").and_then(Value::as_bool).unwrap_or(false);
    let layout = if reset { Value::Null } else { body["payload"].clone() };
    Json(json!({
        "layout": layout,
        "version": 4,
        "hasCustom": !reset,
        "merged": layout,
        "etag": "\"4\"",
        "canEditGlobal": false,
    }))
}

async fn global_snapshot() -> Json<Value> {
    Json(json!({
        "layout": { "v": 1, "items": [{ "key": "inbox", "position": 1, "hidden": true }] },
        "version": 8,
        "hasCustom": true,
        "merged": null,
        "etag": "\"8\"",
        "canEditGlobal": true,
    }))
}

async fn save_global(State(recorded): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    recorded.bodies.lock().unwrap().push(body.clone());
    Json(json!({
        "layout": body["payload"].clone(),
        "version": 9,
        "hasCustom": true,
        "merged": body["payload"].clone(),
        "etag": "\"9\"",
        "canEditGlobal": true,
    }))
}

async fn legacy_put(State(recorded): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    recorded.bodies.lock().unwrap().push(body);
    Json(json!({ "ok": true, "payload": { "items": [{ "key": "a" }] } }))
}

async fn forbidden() -> (StatusCode, &'static str) {
    (StatusCode::FORBIDDEN, "feature disabled")
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn navigation_api() -> (String, Shared) {
    let recorded = Shared::default();
    let router = Router::new()
        .route("/api/v1/navigation/sidebar", get(sidebar))
        .route(
            "/api/v1/navigation/user-sidebar-layout",
            get(user_snapshot).post(save_user),
        )
        .route("/api/v1/navigation/global-sidebar-layout", get(forbidden).post(forbidden))
        .route("/api/v1/navigation/sidebar/user", put(legacy_put))
        .with_state(recorded.clone());
    (spawn_server(router).await, recorded)
}

async fn admin_api() -> (String, Shared) {
    let recorded = Arc::new(Recorded {
        can_edit_global: true,
        ..Recorded::default()
    });
    let router = Router::new()
        .route("/api/v1/navigation/sidebar", get(sidebar))
        .route(
            "/api/v1/navigation/global-sidebar-layout",
            get(global_snapshot).post(save_global),
        )
        .with_state(recorded.clone());
    (spawn_server(router).await, recorded)
}

async fn status_api(status: StatusCode) -> String {
    let router = Router::new().route(
        "/api/v1/navigation/sidebar",
        get(move || async move { (status, "nope") }),
    );
    spawn_server(router).await
}

// ----------------------------------------------------------------------------
// Reads
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_fetch_sidebar_normalizes_payload() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::new(base);

    let payload = client.fetch_sidebar().await.unwrap();
    assert_eq!(payload.items.len(), 2);
    assert_eq!(payload.items[1].position, Some(2.0));
    assert_eq!(payload.modules[0].id, "control");
    assert!(payload.layout.user.is_none());
    assert_eq!(payload.layout.merged().keys(), vec!["inbox"]);

    assert!(!payload.can_edit_global);
    assert_eq!(recorded.auth.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn test_fetch_sidebar_reads_capability() {
    let (base, _) = admin_api().await;
    let client = NavigationClient::new(base);

    let payload = client.fetch_sidebar().await.unwrap();
    assert!(payload.can_edit_global);
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::from_config(&ClientConfig::new(base).with_token("t0ken"));

    client.fetch_sidebar().await.unwrap();
    assert_eq!(
        recorded.auth.lock().unwrap().as_slice(),
        &[Some("Bearer t0ken".to_string())]
    );
}

#[tokio::test]
async fn test_fetch_user_snapshot() {
    let (base, _) = navigation_api().await;
    let client = NavigationClient::new(format!("{base}/"));

    let snapshot = client.fetch_user_sidebar_layout_snapshot().await.unwrap();
    assert_eq!(snapshot.version, Some(3));
    assert_eq!(snapshot.etag.as_deref(), Some("\"3\""));
    assert!(!snapshot.has_custom);
}

// ----------------------------------------------------------------------------
// Writes
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_save_posts_payload_and_version() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::new(base);
    let layout = set_layout_item_hidden(&LayoutSettings::default(), "inbox", true);

    let snapshot = client.save_user_sidebar_layout(&layout, Some(3)).await.unwrap();
    assert_eq!(snapshot.version, Some(4));
    assert_eq!(snapshot.scope_layout(), layout);

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies[0]["version"], 3);
    assert_eq!(bodies[0]["payload"]["items"][0]["key"], "inbox");
    assert_eq!(recorded.if_match.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn test_save_sends_if_match() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::new(base);

    client
        .save_layout(LayoutScope::User, &LayoutSettings::default(), Some(3), Some("\"3\""))
        .await
        .unwrap();
    assert_eq!(
        recorded.if_match.lock().unwrap().as_slice(),
        &[Some("\"3\"".to_string())]
    );
}

#[tokio::test]
async fn test_reset_posts_reset_flag() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::new(base);

    let snapshot = client.reset_layout(LayoutScope::User).await.unwrap();
    assert!(!snapshot.has_custom);
    assert!(snapshot.layout.is_none());
    assert_eq!(recorded.bodies.lock().unwrap()[0], json!({ "reset": true }));
}

#[tokio::test]
async fn test_legacy_put() {
    let (base, recorded) = navigation_api().await;
    let client = NavigationClient::new(base);

    let response = client
        .put_layout_legacy(LayoutScope::User, &LegacyLayoutRequest::reset())
        .await
        .unwrap();
    assert!(response.ok);
    assert_eq!(response.payload.unwrap().items[0].key, "a");
    assert_eq!(recorded.bodies.lock().unwrap()[0], json!({ "reset": true }));
}

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let cases = [
        (StatusCode::UNAUTHORIZED, 401),
        (StatusCode::FORBIDDEN, 403),
        (StatusCode::NOT_FOUND, 404),
        (StatusCode::TOO_MANY_REQUESTS, 429),
        (StatusCode::INTERNAL_SERVER_ERROR, 500),
        (StatusCode::BAD_GATEWAY, 502),
        (StatusCode::CONFLICT, 409),
    ];

    for (status, code) in cases {
        let client = NavigationClient::new(status_api(status).await);
        let err = client.fetch_sidebar().await.unwrap_err();
        assert_eq!(err.status(), Some(code), "{err}");
        match code {
            401 => assert!(matches!(err, ApiError::Unauthenticated)),
            403 => assert!(matches!(err, ApiError::Forbidden(ref body) if body == "nope")),
            404 => assert!(matches!(err, ApiError::NotFound(_))),
            429 => assert!(matches!(err, ApiError::RateLimited)),
            500 | 502 => assert!(matches!(err, ApiError::Server { .. })),
            _ => assert!(matches!(err, ApiError::Status { status: 409, .. })),
        }
    }
}

#[tokio::test]
async fn test_global_scope_forbidden() {
    let (base, _) = navigation_api().await;
    let client = NavigationClient::new(base);

    let err = client.fetch_global_sidebar_layout_snapshot().await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden(ref body) if body == "feature disabled"));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let router = Router::new().route(
        "/api/v1/navigation/user-sidebar-layout",
        get(|| async { "not json" }),
    );
    let client = NavigationClient::new(spawn_server(router).await);

    let err = client.fetch_user_sidebar_layout_snapshot().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_store_over_http() {
    let (base, _) = navigation_api().await;
    let store = LayoutStore::new(NavigationClient::new(base));

    store.sidebar().await.unwrap();
    let err = store
        .save(LayoutScope::Global, &LayoutSettings::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GlobalEditDenied));

    let layout = set_layout_item_hidden(&LayoutSettings::default(), "overview", true);
    let snapshot = store.save(LayoutScope::User, &layout).await.unwrap();
    // The double's GET ignores writes, so the refetch wins over the POST reply.
    assert_eq!(snapshot.version, Some(3));
}

#[tokio::test]
async fn test_store_global_save_with_capability() {
    let (base, recorded) = admin_api().await;
    let store = LayoutStore::new(NavigationClient::new(base));

    store.sidebar().await.unwrap();
    assert!(store.can_edit_global());

    let layout = set_layout_item_hidden(&LayoutSettings::default(), "inbox", true);
    let snapshot = store.save(LayoutScope::Global, &layout).await.unwrap();
    assert_eq!(snapshot.version, Some(8));
    assert!(snapshot.scope_layout().entry("inbox").unwrap().hidden);

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies[0]["payload"]["items"][0]["key"], "inbox");
}
