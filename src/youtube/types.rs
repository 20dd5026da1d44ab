use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Video in a playlist, trimmed to what the lesson browser shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub position: Option<i64>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub item_count: Option<i64>,
}

const THUMBNAIL_PREFERENCE: [&str; 5] = ["maxres", "standard", "high", "medium", "default"];

/// Largest available thumbnail URL from a `snippet.thumbnails` object
pub fn best_thumbnail(snippet: &Value) -> Option<String> {
    let thumbnails = snippet.get("thumbnails")?;
    THUMBNAIL_PREFERENCE
        .iter()
        .find_map(|size| thumbnails.get(size)?.get("url")?.as_str())
        .map(str::to_string)
}

fn text(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn items(body: &Value) -> &[Value] {
    body.get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// `playlistItems.list` response → items. Entries without a video id
/// (deleted or private videos) are dropped.
pub fn parse_playlist_items(body: &Value) -> Vec<PlaylistItem> {
    items(body)
        .iter()
        .filter_map(|item| {
            let snippet = item.get("snippet")?;
            let video_id = item
                .get("contentDetails")
                .and_then(|details| details.get("videoId"))
                .or_else(|| snippet.get("resourceId").and_then(|r| r.get("videoId")))
                .and_then(Value::as_str)?
                .to_string();

            Some(PlaylistItem {
                video_id,
                title: text(snippet, "title"),
                description: text(snippet, "description"),
                thumbnail: best_thumbnail(snippet),
                position: snippet.get("position").and_then(Value::as_i64),
                published_at: snippet
                    .get("publishedAt")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .collect()
}

/// `playlists.list` response → playlists
pub fn parse_playlists(body: &Value) -> Vec<Playlist> {
    items(body)
        .iter()
        .filter_map(|item| {
            let id = item.get("id").and_then(Value::as_str)?.to_string();
            let snippet = item.get("snippet")?;
            Some(Playlist {
                id,
                title: text(snippet, "title"),
                description: text(snippet, "description"),
                thumbnail: best_thumbnail(snippet),
                item_count: item
                    .get("contentDetails")
                    .and_then(|details| details.get("itemCount"))
                    .and_then(Value::as_i64),
            })
        })
        .collect()
}

/// `channels.list` response → thumbnail of the first channel
pub fn parse_channel_thumbnail(body: &Value) -> Option<String> {
    items(body).first()?.get("snippet").and_then(best_thumbnail)
}
