use std::path::PathBuf;

use thiserror::Error;

/// Raised while reading configuration, always before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set. {hint}")]
    Missing {
        var: &'static str,
        hint: &'static str,
    },

    #[error("{var} is not a valid http(s) URL ('{value}'): {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to load env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("player tag is empty")]
    Empty,

    #[error("player tag '{tag}' contains invalid character '{ch}'")]
    InvalidChar { tag: String, ch: char },
}
