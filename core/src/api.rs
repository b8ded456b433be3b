//! # Game-statistics API client
//!
//! Only two endpoints are touched: a player's battle log and a player's
//! profile. The probers only look at the status code of each response; the
//! profile is decoded for tag validation.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use crprobe_common::config::ApiCredentials;
use crprobe_common::tag::PlayerTag;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::ApiError;

const USER_AGENT: &str = concat!("crprobe/", env!("CARGO_PKG_VERSION"));

/// Which player resource a probe requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endpoint {
    #[default]
    BattleLog,
    Profile,
}

impl Endpoint {
    pub fn path(&self, tag: &PlayerTag) -> String {
        match self {
            Endpoint::BattleLog => format!("/players/{}/battlelog", tag.path_segment()),
            Endpoint::Profile => format!("/players/{}", tag.path_segment()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "battlelog" | "battle-log" => Ok(Endpoint::BattleLog),
            "profile" | "player" => Ok(Endpoint::Profile),
            _ => Err(format!("unknown endpoint '{s}' (expected 'battlelog' or 'profile')")),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::BattleLog => write!(f, "battlelog"),
            Endpoint::Profile => write!(f, "profile"),
        }
    }
}

/// Joins `base` (which may carry a path such as `/v1`) with the endpoint path.
pub fn endpoint_url(base: &Url, endpoint: Endpoint, tag: &PlayerTag) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), endpoint.path(tag))
}

/// Anything that can report the status code of one probe request.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch_status(&self, tag: &PlayerTag) -> Result<StatusCode, ApiError>;
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default)]
    pub best_trophies: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub battle_count: u32,
    #[serde(default)]
    pub three_crown_wins: u32,
    pub arena: Option<Arena>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Arena {
    pub name: String,
}

/// Bearer-authenticated client sharing one connection pool across requests.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    credentials: ApiCredentials,
    endpoint: Endpoint,
}

impl ApiClient {
    pub fn new(credentials: ApiCredentials) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            credentials,
            endpoint: Endpoint::default(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn base_url(&self) -> &Url {
        &self.credentials.base_url
    }

    pub fn url_for(&self, tag: &PlayerTag) -> String {
        endpoint_url(&self.credentials.base_url, self.endpoint, tag)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        self.http
            .get(url)
            .bearer_auth(self.credentials.token())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })
    }

    /// Fetches and decodes a player's profile, failing on any non-2xx status.
    pub async fn player_profile(&self, tag: &PlayerTag) -> Result<PlayerProfile, ApiError> {
        let url = endpoint_url(&self.credentials.base_url, Endpoint::Profile, tag);
        let response = self.get(&url).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        response.json::<PlayerProfile>().await.map_err(ApiError::Decode)
    }
}

#[async_trait]
impl StatusFetcher for ApiClient {
    async fn fetch_status(&self, tag: &PlayerTag) -> Result<StatusCode, ApiError> {
        let url = self.url_for(tag);
        Ok(self.get(&url).await?.status())
    }
}
