// core/shorts-service/src/testing.rs
// In-memory video platform for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::youtube::{
    ApiError, ApiErrorDetail, ChannelContentDetails, ChannelItem, ChannelListResponse,
    ChannelSnippet, PlaylistItem, PlaylistItemListResponse, PlaylistItemSnippet,
    RelatedPlaylists, ResourceId, SearchItem, SearchListResponse, SearchSnippet, Thumbnail,
    Thumbnails, UpstreamError, Video, VideoContentDetails, VideoListResponse, VideoPlatform,
    VideoSnippet,
};

pub fn fake_video(id: &str, duration: &str) -> Video {
    Video {
        id: id.to_string(),
        snippet: VideoSnippet {
            title: format!("Video {}", id),
            channel_title: "Test Channel".to_string(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            description: format!("About {}", id),
            thumbnails: Thumbnails {
                high: Thumbnail {
                    url: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
                },
                ..Default::default()
            },
        },
        content_details: VideoContentDetails {
            duration: duration.to_string(),
        },
    }
}

/// Canned responses plus a count of every call made.
#[derive(Default)]
pub struct FakePlatform {
    channels: ChannelListResponse,
    playlist: PlaylistItemListResponse,
    videos: VideoListResponse,
    search: SearchListResponse,
    failing: Option<&'static str>,
    calls: AtomicUsize,
    last_playlist: Mutex<Option<(String, u32)>>,
    last_video_ids: Mutex<Option<String>>,
    last_search: Mutex<Option<(String, u32)>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(mut self, title: &str, uploads: &str) -> Self {
        self.channels.items = vec![ChannelItem {
            id: String::new(),
            snippet: ChannelSnippet {
                title: title.to_string(),
            },
            content_details: ChannelContentDetails {
                related_playlists: RelatedPlaylists {
                    uploads: uploads.to_string(),
                },
            },
        }];
        self
    }

    pub fn uploads(mut self, video_ids: &[&str]) -> Self {
        self.playlist.items = video_ids
            .iter()
            .map(|id| PlaylistItem {
                snippet: PlaylistItemSnippet {
                    resource_id: ResourceId {
                        video_id: id.to_string(),
                    },
                },
            })
            .collect();
        self
    }

    /// `(id, ISO-8601 duration)` pairs.
    pub fn videos(mut self, videos: &[(&str, &str)]) -> Self {
        self.videos.items = videos
            .iter()
            .map(|(id, duration)| fake_video(id, duration))
            .collect();
        self
    }

    pub fn search_results(mut self, channel_ids: &[&str]) -> Self {
        self.search.items = channel_ids
            .iter()
            .map(|id| SearchItem {
                snippet: SearchSnippet {
                    channel_id: id.to_string(),
                    title: format!("Channel {}", id),
                    description: format!("All about {}", id),
                    thumbnails: Thumbnails {
                        default: Thumbnail {
                            url: format!("https://yt3.ggpht.com/{}/default.jpg", id),
                        },
                        ..Default::default()
                    },
                },
            })
            .collect();
        self
    }

    /// Makes calls to `endpoint` fail at the transport level.
    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing = Some(endpoint);
        self
    }

    /// Makes `endpoint` answer with a structured API error.
    pub fn api_error(mut self, endpoint: &str, message: &str, reason: Option<&str>) -> Self {
        let error = Some(ApiError {
            code: 403,
            message: message.to_string(),
            errors: reason
                .map(|reason| {
                    vec![ApiErrorDetail {
                        reason: reason.to_string(),
                        ..Default::default()
                    }]
                })
                .unwrap_or_default(),
        });

        match endpoint {
            "channels" => self.channels.error = error,
            "playlistItems" => self.playlist.error = error,
            "videos" => self.videos.error = error,
            "search" => self.search.error = error,
            other => panic!("unknown endpoint {}", other),
        }
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_playlist(&self) -> Option<(String, u32)> {
        self.last_playlist.lock().unwrap().clone()
    }

    pub fn last_video_ids(&self) -> Option<String> {
        self.last_video_ids.lock().unwrap().clone()
    }

    pub fn last_search(&self) -> Option<(String, u32)> {
        self.last_search.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &str) -> Result<(), UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(endpoint) {
            return Err(UpstreamError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl VideoPlatform for FakePlatform {
    async fn list_channels(&self, _channel_id: &str) -> Result<ChannelListResponse, UpstreamError> {
        self.record("channels")?;
        Ok(self.channels.clone())
    }

    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<PlaylistItemListResponse, UpstreamError> {
        *self.last_playlist.lock().unwrap() = Some((playlist_id.to_string(), max_results));
        self.record("playlistItems")?;
        Ok(self.playlist.clone())
    }

    async fn list_videos(&self, video_ids: &str) -> Result<VideoListResponse, UpstreamError> {
        *self.last_video_ids.lock().unwrap() = Some(video_ids.to_string());
        self.record("videos")?;
        Ok(self.videos.clone())
    }

    async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchListResponse, UpstreamError> {
        *self.last_search.lock().unwrap() = Some((query.to_string(), max_results));
        self.record("search")?;
        Ok(self.search.clone())
    }
}
