use crprobe_common::error::ConfigError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode API response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("admin request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("auth backend rejected the request with {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}
