#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    extract::Query,
    http::{header, Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use studyplan_api::app::{router, AppState};
use studyplan_api::auth::{generate_jwt, Identity};
use studyplan_api::config::AppConfig;
use studyplan_api::database::MemoryStore;

pub const ADMIN_EMAIL: &str = "staff@example.com";

pub const STUB_CHANNEL: &str = "UCstub";
pub const STUB_THUMBNAIL: &str = "https://i.ytimg.com/stub/high.jpg";

/// Router over an in-memory store, driven without a socket
pub struct TestApp {
    pub store: MemoryStore,
    pub config: AppConfig,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let mut config = AppConfig::development();
        config.security.admin_emails = format!(" {} ", ADMIN_EMAIL.to_uppercase());
        config.youtube.api_key = None;
        configure(&mut config);

        let store = MemoryStore::new();
        let state = AppState::new(config.clone(), Arc::new(store.clone()));

        Self {
            store,
            config,
            router: router(state),
        }
    }

    pub fn token(&self, identity: &Identity) -> String {
        generate_jwt(identity, &self.config.security).expect("token")
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<TestResponse> {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = self.router.clone().oneshot(request.body(Body::empty())?).await?;
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(TestResponse { status, location, body })
    }
}

async fn stub_channels(Query(query): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
    if query.get("id").map(String::as_str) != Some(STUB_CHANNEL) {
        return Json(json!({ "items": [] }));
    }
    Json(json!({
        "items": [{
            "snippet": {
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/stub/default.jpg" },
                    "high": { "url": STUB_THUMBNAIL }
                }
            }
        }]
    }))
}

async fn stub_playlists() -> Json<Value> {
    Json(json!({
        "items": [{
            "id": "PL1",
            "snippet": { "title": "Algebra", "description": "Unit 1" },
            "contentDetails": { "itemCount": 12 }
        }]
    }))
}

async fn stub_playlist_items() -> Json<Value> {
    Json(json!({
        "items": [
            {
                "snippet": { "title": "Lesson 1", "position": 0 },
                "contentDetails": { "videoId": "vid1" }
            },
            { "snippet": { "title": "Private video" } }
        ]
    }))
}

async fn stub_forbidden() -> StatusCode {
    StatusCode::FORBIDDEN
}

/// Serves canned YouTube Data API responses on a local port and returns its
/// base URL. Paths under `/forbidden/` always answer 403.
pub async fn spawn_youtube_stub() -> Result<String> {
    let app = Router::new()
        .route("/v3/channels", get(stub_channels))
        .route("/v3/playlists", get(stub_playlists))
        .route("/v3/playlistItems", get(stub_playlist_items))
        .route("/forbidden/*rest", get(stub_forbidden));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}", addr))
}
