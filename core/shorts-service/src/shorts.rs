// core/shorts-service/src/shorts.rs
// Shorts pipeline and channel search

use std::future::Future;
use std::sync::Arc;

use ziktok_common::{log_cache_lookup, LogContext, MetricsTimer, ServiceError, ServiceMetrics, TtlCache};

use crate::duration::is_short;
use crate::models::{ChannelSummary, SearchResult, ShortVideo, ShortsResult};
use crate::youtube::{ApiError, UpstreamError, Video, VideoPlatform};

/// Page size for the uploads playlist; only the first page is read.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;
pub const SEARCH_PAGE_SIZE: u32 = 5;

pub fn cache_key(channel_id: &str) -> String {
    format!("channel_{}", channel_id)
}

pub struct ShortsService {
    /// `None` when no API key is configured.
    platform: Option<Arc<dyn VideoPlatform>>,
    cache: TtlCache<ShortsResult>,
    metrics: ServiceMetrics,
}

impl ShortsService {
    pub fn new(platform: Option<Arc<dyn VideoPlatform>>, metrics: ServiceMetrics) -> Self {
        Self {
            platform,
            cache: TtlCache::new(),
            metrics,
        }
    }

    pub fn with_cache(mut self, cache: TtlCache<ShortsResult>) -> Self {
        self.cache = cache;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.platform.is_some()
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    fn platform(&self) -> Result<&Arc<dyn VideoPlatform>, ServiceError> {
        self.platform.as_ref().ok_or(ServiceError::MissingApiKey)
    }

    /// Returns the shorts of `channel_id`, from cache when a fresh entry exists.
    ///
    /// A miss runs channel -> uploads playlist -> video details and stores the
    /// result only if every step succeeded.
    pub async fn get_shorts(
        &self,
        ctx: &LogContext,
        channel_id: &str,
    ) -> Result<ShortsResult, ServiceError> {
        let key = cache_key(channel_id);

        let cached = self.cache.get(&key).await;
        log_cache_lookup(ctx, &key, cached.is_some());
        self.metrics.record_cache_lookup(cached.is_some());
        if let Some(result) = cached {
            return Ok(result);
        }

        let platform = self.platform()?;
        tracing::info!(channel_id = channel_id, "Fetching shorts from YouTube API");

        // 1. Channel -> uploads playlist
        let channels = self
            .observe("channels", platform.list_channels(channel_id))
            .await
            .map_err(|e| ServiceError::upstream("Failed to fetch channel data", e))?;
        if let Some(error) = channels.error {
            return Err(api_error("YouTube API error", error));
        }
        let channel = channels
            .items
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::NotFound("Channel not found".to_string()))?;

        let uploads = channel.content_details.related_playlists.uploads;
        let channel_title = channel.snippet.title;

        // 2. Most recent uploads
        let playlist = self
            .observe(
                "playlistItems",
                platform.list_playlist_items(&uploads, PLAYLIST_PAGE_SIZE),
            )
            .await
            .map_err(|e| ServiceError::upstream("Failed to fetch playlist data", e))?;
        if let Some(error) = playlist.error {
            return Err(api_error("YouTube API error (playlist)", error));
        }

        if playlist.items.is_empty() {
            tracing::info!(channel_id = channel_id, "Uploads playlist is empty");
            let result = ShortsResult {
                shorts: Vec::new(),
                channel_id: channel_id.to_string(),
                channel_title,
            };
            self.store(key, &result).await;
            return Ok(result);
        }

        let video_ids = playlist
            .items
            .iter()
            .map(|item| item.snippet.resource_id.video_id.as_str())
            .collect::<Vec<_>>()
            .join(",");

        // 3. Durations and metadata in one batch
        let videos = self
            .observe("videos", platform.list_videos(&video_ids))
            .await
            .map_err(|e| ServiceError::upstream("Failed to fetch videos data", e))?;
        if let Some(error) = videos.error {
            return Err(api_error("YouTube API error (videos)", error));
        }

        let result = ShortsResult {
            shorts: filter_shorts(videos.items),
            channel_id: channel_id.to_string(),
            channel_title,
        };
        self.store(key, &result).await;

        Ok(result)
    }

    /// Finds up to five channels matching `query`. Never cached.
    pub async fn search_channels(
        &self,
        ctx: &LogContext,
        query: &str,
    ) -> Result<SearchResult, ServiceError> {
        let platform = self.platform()?;
        tracing::info!(request_id = %ctx.request_id, query = query, "Searching channels");

        let search = self
            .observe("search", platform.search_channels(query, SEARCH_PAGE_SIZE))
            .await
            .map_err(|e| ServiceError::upstream("Failed to search channels", e))?;
        if let Some(error) = search.error {
            return Err(api_error("YouTube API error (search)", error));
        }

        if search.items.is_empty() {
            return Err(ServiceError::NotFound("Channel not found".to_string()));
        }

        let channels = search
            .items
            .into_iter()
            .map(|item| ChannelSummary {
                id: item.snippet.channel_id,
                title: item.snippet.title,
                thumbnail: item.snippet.thumbnails.default.url,
                description: item.snippet.description,
            })
            .collect();

        Ok(SearchResult { channels })
    }

    async fn store(&self, key: String, result: &ShortsResult) {
        self.metrics.record_shorts_returned(result.shorts.len());
        self.cache.set(key, result.clone()).await;
    }

    async fn observe<T, F>(&self, endpoint: &str, call: F) -> Result<T, UpstreamError>
    where
        F: Future<Output = Result<T, UpstreamError>>,
    {
        let timer = MetricsTimer::new();
        let result = call.await;
        let outcome = if result.is_ok() { "ok" } else { "error" };
        self.metrics
            .record_upstream_call(endpoint, outcome, timer.elapsed_seconds());
        result
    }
}

fn api_error(error: &str, api: ApiError) -> ServiceError {
    let reason = api.reason().map(str::to_string);
    ServiceError::UpstreamApi {
        error: error.to_string(),
        message: api.message,
        reason,
    }
}

/// Keeps videos of at most one minute, in upstream order.
pub fn filter_shorts(videos: Vec<Video>) -> Vec<ShortVideo> {
    videos
        .into_iter()
        .filter(|video| is_short(&video.content_details.duration))
        .map(|video| ShortVideo {
            id: video.id,
            title: video.snippet.title,
            channel_title: video.snippet.channel_title,
            published_at: video.snippet.published_at,
            thumbnail: video.snippet.thumbnails.high.url,
            description: video.snippet.description,
        })
        .collect()
}
