// core/shorts-service/src/models.rs
// Response bodies served to clients

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortVideo {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail: String,
    pub description: String,
}

/// Outcome of one shorts pipeline run; this is what gets cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortsResult {
    pub shorts: Vec<ShortVideo>,
    pub channel_id: String,
    pub channel_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub channels: Vec<ChannelSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorts_result_uses_camel_case_keys() {
        let result = ShortsResult {
            shorts: vec![ShortVideo {
                id: "v1".to_string(),
                title: "Clip".to_string(),
                channel_title: "Chan".to_string(),
                published_at: "2024-01-01T00:00:00Z".to_string(),
                thumbnail: "https://i.ytimg.com/vi/v1/hqdefault.jpg".to_string(),
                description: String::new(),
            }],
            channel_id: "UC1".to_string(),
            channel_title: "Chan".to_string(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["channelId"], "UC1");
        assert_eq!(json["channelTitle"], "Chan");
        assert_eq!(json["shorts"][0]["publishedAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["shorts"][0]["channelTitle"], "Chan");
        assert!(json["shorts"][0].get("channel_title").is_none());
    }

    #[test]
    fn test_empty_shorts_serialize_as_array() {
        let result = ShortsResult {
            shorts: Vec::new(),
            channel_id: "UC1".to_string(),
            channel_title: "Chan".to_string(),
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"shorts\":[]"));
    }

    #[test]
    fn test_search_result_shape() {
        let result = SearchResult {
            channels: vec![ChannelSummary {
                id: "UC1".to_string(),
                title: "T".to_string(),
                thumbnail: "u".to_string(),
                description: "D".to_string(),
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["channels"][0]["id"], "UC1");
        assert_eq!(json["channels"][0]["thumbnail"], "u");
    }
}
