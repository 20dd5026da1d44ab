// handlers/public/youtube.rs - video metadata proxy
//
// These never fail with an unhandled server error: list endpoints answer 200
// with an empty list and an error code, the thumbnail endpoint answers a JSON
// error with a matching status.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::youtube::YouTubeError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelQuery {
    pub channel_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistQuery {
    pub playlist_id: Option<String>,
}

/// Treat `?channelId=` the same as a missing parameter
fn required(value: Option<String>, name: &'static str) -> Result<String, YouTubeError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(YouTubeError::MissingParam(name))
}

fn empty_list(err: &YouTubeError) -> Json<Value> {
    match err {
        YouTubeError::MissingApiKey | YouTubeError::MissingParam(_) => {
            tracing::debug!("YouTube proxy request rejected: {}", err)
        }
        _ => tracing::warn!("YouTube proxy request failed: {}", err),
    }
    Json(json!({ "items": [], "error": err.code() }))
}

/// GET /api/youtube/channel-thumbnail?channelId=...
pub async fn channel_thumbnail(State(state): State<AppState>, Query(query): Query<ChannelQuery>) -> Response {
    let result = match required(query.channel_id, "channelId") {
        Ok(channel_id) => state.youtube.channel_thumbnail(&channel_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(err) => {
            let status = match err {
                YouTubeError::MissingParam(_) => StatusCode::BAD_REQUEST,
                YouTubeError::NotFound(_) => StatusCode::NOT_FOUND,
                YouTubeError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
                YouTubeError::Upstream(_) | YouTubeError::Fetch(_) => StatusCode::BAD_GATEWAY,
            };
            if status.is_server_error() {
                tracing::warn!("Channel thumbnail lookup failed: {}", err);
            }
            (status, Json(json!({ "error": err.code() }))).into_response()
        }
    }
}

/// GET /api/youtube/playlist-items?playlistId=...
pub async fn playlist_items(State(state): State<AppState>, Query(query): Query<PlaylistQuery>) -> Json<Value> {
    let result = match required(query.playlist_id, "playlistId") {
        Ok(playlist_id) => state.youtube.playlist_items(&playlist_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => Json(json!({ "items": items })),
        Err(err) => empty_list(&err),
    }
}

/// GET /api/youtube/playlists?channelId=...
pub async fn playlists(State(state): State<AppState>, Query(query): Query<ChannelQuery>) -> Json<Value> {
    let result = match required(query.channel_id, "channelId") {
        Ok(channel_id) => state.youtube.playlists(&channel_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(items) => Json(json!({ "items": items })),
        Err(err) => empty_list(&err),
    }
}
