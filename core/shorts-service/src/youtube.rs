// core/shorts-service/src/youtube.rs
// YouTube Data API v3 client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use ziktok_common::{log_external_api_call, redact_api_key, MetricsTimer};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Failure to get a decodable reply out of the platform.
///
/// Structured API errors are not represented here: they arrive inside a
/// successfully decoded body and are inspected by the caller.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub errors: Vec<ApiErrorDetail>,
}

impl ApiError {
    /// Reason of the first error detail, if the platform gave one.
    pub fn reason(&self) -> Option<&str> {
        self.errors
            .first()
            .map(|detail| detail.reason.as_str())
            .filter(|reason| !reason.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorDetail {
    pub message: String,
    pub domain: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Thumbnail,
    pub medium: Thumbnail,
    pub high: Thumbnail,
}

// channels.list

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelListResponse {
    pub items: Vec<ChannelItem>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub content_details: ChannelContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelSnippet {
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RelatedPlaylists {
    pub uploads: String,
}

// playlistItems.list

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistItemListResponse {
    pub items: Vec<PlaylistItem>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

// videos.list

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoListResponse {
    pub items: Vec<Video>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub snippet: VideoSnippet,
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub description: String,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoContentDetails {
    pub duration: String,
}

// search.list

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchListResponse {
    pub items: Vec<SearchItem>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchSnippet {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
}

// ============================================================================
// PLATFORM TRAIT
// ============================================================================

/// The four read-only lookups the service needs from the video platform.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, UpstreamError>;

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, UpstreamError>;

    /// `video_ids` is a comma-separated batch.
    async fn list_videos(&self, video_ids: &str) -> Result<VideoListResponse, UpstreamError>;

    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, UpstreamError>;
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Issues a GET and decodes the body whatever the HTTP status is, since
    /// the platform reports failures inside a JSON `error` member.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}/{}", self.base_url, resource);
        let timer = MetricsTimer::new();

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(redact_api_key(&e.to_string())))?;

        log_external_api_call(
            "youtube",
            response.url().as_str(),
            timer.elapsed_millis(),
            response.status().as_u16(),
        );

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(redact_api_key(&e.to_string())))
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn list_channels(&self, channel_id: &str) -> Result<ChannelListResponse, UpstreamError> {
        self.get_json(
            "channels",
            &[("part", "contentDetails,snippet"), ("id", channel_id)],
        )
        .await
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, UpstreamError> {
        let max_results = max_results.to_string();
        self.get_json(
            "playlistItems",
            &[
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ],
        )
        .await
    }

    async fn list_videos(&self, video_ids: &str) -> Result<VideoListResponse, UpstreamError> {
        self.get_json(
            "videos",
            &[("part", "contentDetails,snippet"), ("id", video_ids)],
        )
        .await
    }

    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, UpstreamError> {
        let max_results = max_results.to_string();
        self.get_json(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("type", "channel"),
                ("maxResults", max_results.as_str()),
            ],
        )
        .await
    }
}
