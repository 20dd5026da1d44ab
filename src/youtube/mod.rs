//! Thin client for the YouTube Data API v3, used by the lesson-browser
//! proxy endpoints. Every failure maps to a stable error code so the
//! handlers can degrade to an empty result instead of a server error.

pub mod types;

pub use types::{Playlist, PlaylistItem};

use serde_json::Value;
use url::Url;

use crate::config::YouTubeConfig;

#[derive(Debug, thiserror::Error)]
pub enum YouTubeError {
    #[error("YouTube API key is not configured")]
    MissingApiKey,
    #[error("Missing query parameter: {0}")]
    MissingParam(&'static str),
    #[error("Upstream returned status {0}")]
    Upstream(u16),
    #[error("Nothing found for {0}")]
    NotFound(String),
    #[error("Request to YouTube failed: {0}")]
    Fetch(String),
}

impl YouTubeError {
    /// Code returned to clients in the `error` field
    pub fn code(&self) -> &'static str {
        match self {
            YouTubeError::MissingApiKey => "missing_api_key",
            YouTubeError::MissingParam(_) => "missing_param",
            YouTubeError::Upstream(_) => "upstream_error",
            YouTubeError::NotFound(_) => "not_found",
            YouTubeError::Fetch(_) => "fetch_error",
        }
    }
}

impl From<reqwest::Error> for YouTubeError {
    fn from(err: reqwest::Error) -> Self {
        YouTubeError::Fetch(err.to_string())
    }
}

pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    max_results: u32,
}

impl YouTubeClient {
    pub fn new(config: &YouTubeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: with_trailing_slash(&config.base_url),
            max_results: config.max_results,
        }
    }

    pub async fn channel_thumbnail(&self, channel_id: &str) -> Result<String, YouTubeError> {
        let body = self
            .get("channels", &[("part", "snippet"), ("id", channel_id)])
            .await?;
        types::parse_channel_thumbnail(&body).ok_or_else(|| YouTubeError::NotFound(channel_id.to_string()))
    }

    pub async fn playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>, YouTubeError> {
        let max_results = self.max_results.to_string();
        let body = self
            .get(
                "playlistItems",
                &[
                    ("part", "snippet,contentDetails"),
                    ("playlistId", playlist_id),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;
        Ok(types::parse_playlist_items(&body))
    }

    pub async fn playlists(&self, channel_id: &str) -> Result<Vec<Playlist>, YouTubeError> {
        let max_results = self.max_results.to_string();
        let body = self
            .get(
                "playlists",
                &[
                    ("part", "snippet,contentDetails"),
                    ("channelId", channel_id),
                    ("maxResults", max_results.as_str()),
                ],
            )
            .await?;
        Ok(types::parse_playlists(&body))
    }

    async fn get(&self, resource: &str, params: &[(&str, &str)]) -> Result<Value, YouTubeError> {
        let api_key = self.api_key.as_deref().ok_or(YouTubeError::MissingApiKey)?;
        let url = self.endpoint(resource, params, api_key)?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("YouTube {} request failed with status {}", resource, status);
            return Err(YouTubeError::Upstream(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)], api_key: &str) -> Result<Url, YouTubeError> {
        let base = Url::parse(&self.base_url).map_err(|e| YouTubeError::Fetch(e.to_string()))?;
        let mut url = base.join(resource).map_err(|e| YouTubeError::Fetch(e.to_string()))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().copied())
            .append_pair("key", api_key);
        Ok(url)
    }
}

/// `Url::join` replaces the last segment unless the base ends in `/`
fn with_trailing_slash(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn client(api_key: Option<&str>) -> YouTubeClient {
        let mut config = AppConfig::development().youtube;
        config.api_key = api_key.map(str::to_string);
        YouTubeClient::new(&config)
    }

    #[test]
    fn builds_endpoint_with_key_and_params() {
        let url = client(Some("k"))
            .endpoint("playlists", &[("part", "snippet"), ("channelId", "UC 1")], "k")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/playlists?part=snippet&channelId=UC+1&key=k"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_version_segment() {
        let mut config = AppConfig::development().youtube;
        config.base_url = "https://www.googleapis.com/youtube/v3".to_string();
        let url = YouTubeClient::new(&config)
            .endpoint("playlists", &[("part", "snippet")], "k")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/playlists?part=snippet&key=k"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let err = client(None).playlists("UC123").await.unwrap_err();
        assert!(matches!(err, YouTubeError::MissingApiKey));
        assert_eq!(err.code(), "missing_api_key");
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(YouTubeError::MissingParam("playlistId").code(), "missing_param");
        assert_eq!(YouTubeError::Upstream(403).code(), "upstream_error");
        assert_eq!(YouTubeError::Fetch("reset".into()).code(), "fetch_error");
        assert_eq!(YouTubeError::NotFound("UC1".into()).code(), "not_found");
    }
}
