//! Client for the YouTube Data API v3.
//!
//! Fetches the `snippet` part for a single video and maps it onto the
//! [`Video`] record. Use [`YouTubeClient::with_base_url`] to point at a
//! mock server in tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{ClientError, MetadataSource};
use crate::domain::Video;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Client for video metadata lookups.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Create a client pointed at the production API.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, timeout, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: impl Into<String>,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    published_at: DateTime<Utc>,
}

#[async_trait]
impl MetadataSource for YouTubeClient {
    async fn video_metadata(&self, url: &str) -> Result<Video, ClientError> {
        let video_id = extract_video_id(url)?;
        debug!(%video_id, "fetching video metadata");

        let endpoint = format!("{}/youtube/v3/videos", self.base_url);
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("part", "snippet"),
                ("id", video_id.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let list: VideoListResponse = response.json().await?;
        let item = list
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NotFound(video_id.clone()))?;

        Ok(Video {
            title: item.snippet.title,
            description: item.snippet.description,
            published_at: item.snippet.published_at,
        })
    }
}

/// Extract the video ID from a YouTube URL.
///
/// Handles `watch?v=`, `youtu.be/`, `/shorts/`, `/embed/`, and `/live/`
/// forms. Deterministic and collision-free for distinct canonical URLs.
pub fn extract_video_id(url: &str) -> Result<String, ClientError> {
    const MARKERS: [&str; 5] = ["v=", "youtu.be/", "/shorts/", "/embed/", "/live/"];

    for marker in MARKERS {
        if let Some(idx) = url.find(marker) {
            let rest = &url[idx + marker.len()..];
            let id: String = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect();
            if !id.is_empty() {
                return Ok(id);
            }
        }
    }

    Err(ClientError::InvalidUrl(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_ignores_trailing_params() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_from_short_url() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_from_shorts_and_embed() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abc123DEF-_").unwrap(),
            "abc123DEF-_"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/abc123DEF-_").unwrap(),
            "abc123DEF-_"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/live/abc123DEF-_").unwrap(),
            "abc123DEF-_"
        );
    }

    #[test]
    fn test_extract_rejects_url_without_id() {
        assert!(extract_video_id("https://www.youtube.com/").is_err());
        assert!(extract_video_id("https://example.com/watch").is_err());
        assert!(extract_video_id("https://www.youtube.com/watch?v=").is_err());
    }
}
