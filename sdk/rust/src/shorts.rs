use super::client::ZikTokClient;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortVideo {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelShorts {
    pub shorts: Vec<ShortVideo>,
    pub channel_id: String,
    pub channel_title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    channels: Vec<Channel>,
}

impl ZikTokClient {
    /// Shorts of one channel, most recent uploads first.
    pub async fn get_shorts(&self, channel_id: &str) -> Result<ChannelShorts> {
        let url = self.endpoint(&["api", "channel", channel_id, "shorts"])?;
        self.get_json(url).await
    }

    pub async fn search_channels(&self, query: &str) -> Result<Vec<Channel>> {
        let url = self.endpoint(&["api", "channel", "search", query])?;
        let response: SearchResponse = self.get_json(url).await?;
        Ok(response.channels)
    }
}
