//! HTTP client for the club data store.
//!
//! The store owns persistence; this crate only reads rosters and stat
//! records from it and writes whole stat records back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::models::{PlayerIdentity, StatRecord};

/// Errors talking to the club data store.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Acknowledgement body returned by a stat record write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Source of the club roster.
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Every registered player, approved or not.
    async fn fetch_roster(&self) -> Result<Vec<PlayerIdentity>, ClientError>;
}

/// Source of per-player stat records.
#[async_trait]
pub trait StatFetcher: Send + Sync {
    async fn fetch_stats(&self, username: &str) -> Result<StatRecord, ClientError>;
}

/// Sink for whole stat records.
#[async_trait]
pub trait StatPersister: Send + Sync {
    async fn save_stats(&self, username: &str, record: &StatRecord)
        -> Result<SaveAck, ClientError>;
}

/// Configuration for the club API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root of the store's REST API
    pub base_url: Url,

    /// Per-request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(15),
            user_agent: format!("club-stats/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// reqwest-backed client for the club store.
#[derive(Debug, Clone)]
pub struct ClubApiClient {
    client: Client,
    config: ClientConfig,
}

impl ClubApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("club-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Turn a non-2xx response into an error, keeping any message the store sent.
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<SaveAck>(&body)
            .ok()
            .and_then(|ack| ack.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

        Err(ClientError::HttpStatus {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RosterSource for ClubApiClient {
    async fn fetch_roster(&self) -> Result<Vec<PlayerIdentity>, ClientError> {
        let url = self.endpoint(&["players"])?;
        info!("Fetching roster from {}", url);

        let response = Self::check_status(self.client.get(url).send().await?).await?;
        let players: Vec<PlayerIdentity> = response.json().await?;

        debug!("Roster has {} players", players.len());
        Ok(players)
    }
}

#[async_trait]
impl StatFetcher for ClubApiClient {
    async fn fetch_stats(&self, username: &str) -> Result<StatRecord, ClientError> {
        let url = self.endpoint(&["player-details", username])?;
        debug!("Fetching stats for {}", username);

        let response = Self::check_status(self.client.get(url).send().await?).await?;
        let mut record: StatRecord = response.json().await?;
        if record.username.is_empty() {
            record.username = username.to_string();
        }
        Ok(record)
    }
}

#[async_trait]
impl StatPersister for ClubApiClient {
    async fn save_stats(
        &self,
        username: &str,
        record: &StatRecord,
    ) -> Result<SaveAck, ClientError> {
        let url = self.endpoint(&["player-details", username])?;
        info!("Saving stats for {}", username);

        let response =
            Self::check_status(self.client.put(url).json(record).send().await?).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(SaveAck {
                success: true,
                message: None,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}
