use anyhow::{anyhow, Result};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

pub struct ZikTokClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

/// A non-2xx reply from the service, decoded from its error envelope.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{status} {error}")]
pub struct ApiError {
    pub status: u16,
    pub error: String,
    pub details: Option<String>,
    pub reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl ApiError {
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(body) => Self {
                status,
                error: body.error,
                details: body.details,
                reason: body.reason,
            },
            // Not our envelope (proxy page, empty body, ...)
            Err(_) => Self {
                status,
                error: String::from_utf8_lossy(body).trim().to_string(),
                details: None,
                reason: None,
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl ZikTokClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Appends percent-encoded `segments` to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("base URL cannot have a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        Ok(response.json::<T>().await?)
    }
}
