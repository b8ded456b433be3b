//! # Configuration
//!
//! Credentials come from a dotenv-style file (`.env.local` by default) that is
//! merged into the process environment, then read through an [`EnvSource`].
//! Reading goes through the trait so validation can be exercised without
//! touching the real environment.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENV_FILE: &str = ".env.local";

pub const API_KEY_VAR: &str = "RATE_LIMIT_TESTING_KEY";
pub const API_BASE_VAR: &str = "CR_API_BASE_URL";
pub const DEFAULT_API_BASE: &str = "https://api.clashroyale.com/v1";

pub const SUPABASE_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const SERVICE_ROLE_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

const API_KEY_HINT: &str = "Add your Clash Royale API token to .env.local or export it.";
const SUPABASE_HINT: &str = "Please create a .env file with your Supabase credentials. \
                             You can use env.template as a reference.";

/// Terminal output settings shared by every command.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// `0` prints everything, `1` drops banner and headers,
    /// `2` also drops per-request status lines.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Config {
    pub fn show_headers(&self) -> bool {
        self.quiet == 0
    }

    pub fn show_statuses(&self) -> bool {
        self.quiet < 2
    }
}

/// Somewhere to look variables up.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Merges `path` into the process environment.
///
/// Returns `Ok(false)` when the file does not exist; variables that are
/// already set are left untouched.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Credentials for the game-statistics API.
#[derive(Clone)]
pub struct ApiCredentials {
    token: String,
    pub base_url: Url,
}

impl ApiCredentials {
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let token = required(env, API_KEY_VAR, API_KEY_HINT)?;
        let base = non_empty(env, API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let base_url = parse_http_url(API_BASE_VAR, &base)?;

        Ok(Self { token, base_url })
    }

    pub fn new(token: impl Into<String>, base_url: Url) -> Self {
        Self {
            token: token.into(),
            base_url,
        }
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Credentials for the auth backend's administrative interface.
#[derive(Clone)]
pub struct AdminCredentials {
    pub url: Url,
    service_role_key: String,
}

impl AdminCredentials {
    /// Validates the backend URL first, then the service-role key.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let raw_url = required(env, SUPABASE_URL_VAR, SUPABASE_HINT)?;
        let service_role_key = required(env, SERVICE_ROLE_VAR, SUPABASE_HINT)?;
        let url = parse_http_url(SUPABASE_URL_VAR, &raw_url)?;

        Ok(Self {
            url,
            service_role_key,
        })
    }

    pub fn new(url: Url, service_role_key: impl Into<String>) -> Self {
        Self {
            url,
            service_role_key: service_role_key.into(),
        }
    }

    pub fn service_role_key(&self) -> &str {
        &self.service_role_key
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("url", &self.url.as_str())
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

/// Parses an absolute `http`/`https` URL.
pub fn parse_http_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn non_empty(env: &impl EnvSource, var: &str) -> Option<String> {
    env.var(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    env: &impl EnvSource,
    var: &'static str,
    hint: &'static str,
) -> Result<String, ConfigError> {
    non_empty(env, var).ok_or(ConfigError::Missing { var, hint })
}
