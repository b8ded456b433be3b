pub mod burst;
pub mod delete_user;
pub mod sequential;
pub mod validate;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use crprobe_common::config::{self, API_BASE_VAR, ApiCredentials, DEFAULT_ENV_FILE, ProcessEnv};
use crprobe_common::tag::{self, PlayerTag};
use crprobe_core::admin::UserId;
use crprobe_core::api::{ApiClient, Endpoint};
use crprobe_core::pacing::{DEFAULT_MIN_SPACING, DEFAULT_TOTAL_DURATION};
use crprobe_core::prober::DEFAULT_ROUNDS;
use url::Url;

#[derive(Parser)]
#[command(name = "crprobe")]
#[command(about = "Probe the Clash Royale API's rate limits and manage auth users.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Dotenv file to read credentials from
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Less output: -q hides banner and headers, -qq also hides per-request lines
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send one request at a time, round after round
    #[command(alias = "seq")]
    Sequential {
        /// Number of passes over the tag list
        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// Send concurrent batches, one request per tag, for a fixed duration
    #[command(alias = "b")]
    Burst {
        /// Total run time in seconds; no batch starts after it has passed
        #[arg(short, long, default_value_t = DEFAULT_TOTAL_DURATION.as_secs())]
        duration: u64,
        /// Minimum time between batch starts in milliseconds
        #[arg(long, default_value_t = DEFAULT_MIN_SPACING.as_millis() as u64)]
        spacing_ms: u64,
        /// End the run after the first batch that receives a 429
        #[arg(long)]
        stop_on_throttle: bool,
        #[command(flatten)]
        probe: ProbeArgs,
    },
    /// Look up a player's profile to check that a tag exists
    #[command(alias = "v")]
    Validate {
        tag: PlayerTag,
        /// API base URL, overrides CR_API_BASE_URL
        #[arg(long, value_parser = parse_api_base)]
        api_base: Option<Url>,
    },
    /// Delete a user from the auth backend
    DeleteUser {
        user_id: UserId,
        /// Validate configuration and build the client without deleting
        #[arg(long)]
        dry_run: bool,
        /// Ask the backend for a soft delete
        #[arg(long)]
        soft: bool,
    },
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Player tag to probe; repeat for more. Defaults to the built-in list
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<PlayerTag>,

    /// Resource to request for each tag (battlelog or profile)
    #[arg(long, default_value = "battlelog")]
    pub endpoint: Endpoint,

    /// API base URL, overrides CR_API_BASE_URL
    #[arg(long, value_parser = parse_api_base)]
    pub api_base: Option<Url>,
}

impl ProbeArgs {
    pub fn tags(&self) -> Vec<PlayerTag> {
        if self.tags.is_empty() {
            tag::default_tags()
        } else {
            self.tags.clone()
        }
    }

    pub fn client(&self) -> anyhow::Result<ApiClient> {
        Ok(api_client(self.api_base.clone())?.with_endpoint(self.endpoint))
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Reads the API token from the environment before anything is sent.
pub fn api_client(api_base: Option<Url>) -> anyhow::Result<ApiClient> {
    let mut credentials = ApiCredentials::from_env(&ProcessEnv)?;
    if let Some(base) = api_base {
        credentials = credentials.with_base_url(base);
    }
    ApiClient::new(credentials).context("could not create API client")
}

fn parse_api_base(s: &str) -> Result<Url, String> {
    config::parse_http_url(API_BASE_VAR, s).map_err(|e| e.to_string())
}
