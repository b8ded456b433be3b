//! # User administration
//!
//! Deletes a user from the auth backend (Supabase Auth) through its admin
//! REST interface, authenticated with the service-role key.
//!
//! Credentials are validated before the client is built, so a missing URL
//! or key never results in a request.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use crprobe_common::config::{AdminCredentials, EnvSource};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AdminError;

/// Identifier of an auth user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("invalid user id '{s}': {e}"))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[async_trait]
pub trait UserAdmin: Send + Sync {
    async fn delete_user(&self, id: &UserId, soft: bool) -> Result<(), AdminError>;
}

pub struct SupabaseAdmin {
    http: Client,
    credentials: AdminCredentials,
}

impl SupabaseAdmin {
    pub fn new(credentials: AdminCredentials) -> Result<Self, AdminError> {
        let http = Client::builder().build().map_err(AdminError::Client)?;
        Ok(Self { http, credentials })
    }

    pub fn user_url(&self, id: &UserId) -> String {
        format!(
            "{}/auth/v1/admin/users/{}",
            self.credentials.url.as_str().trim_end_matches('/'),
            id
        )
    }
}

#[async_trait]
impl UserAdmin for SupabaseAdmin {
    async fn delete_user(&self, id: &UserId, soft: bool) -> Result<(), AdminError> {
        let key = self.credentials.service_role_key();
        let response = self
            .http
            .delete(self.user_url(id))
            .header("apikey", key)
            .bearer_auth(key)
            .json(&json!({ "should_soft_delete": soft }))
            .send()
            .await?;

        let status = response.status();
        debug!(%id, %status, "delete response");

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AdminError::Rejected { status, body })
        }
    }
}

/// `DryRun` validates configuration and builds the client but never deletes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteMode {
    #[default]
    Execute,
    DryRun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionOutcome {
    Deleted,
    Skipped,
}

#[derive(Clone, Debug)]
pub struct DeletionRequest {
    pub user_id: UserId,
    pub mode: DeleteMode,
    pub soft: bool,
}

pub async fn execute(
    admin: &dyn UserAdmin,
    request: &DeletionRequest,
) -> Result<DeletionOutcome, AdminError> {
    match request.mode {
        DeleteMode::DryRun => {
            info!("Dry run: user {} would be deleted", request.user_id);
            Ok(DeletionOutcome::Skipped)
        }
        DeleteMode::Execute => {
            admin.delete_user(&request.user_id, request.soft).await?;
            Ok(DeletionOutcome::Deleted)
        }
    }
}

/// Reads credentials from `env`, builds the admin client and runs `request`.
pub async fn delete_from_env(
    env: &(impl EnvSource + Sync),
    request: &DeletionRequest,
) -> Result<DeletionOutcome, AdminError> {
    let credentials = AdminCredentials::from_env(env)?;
    debug!(url = %credentials.url, "admin credentials loaded");

    let admin = SupabaseAdmin::new(credentials)?;
    execute(&admin, request).await
}
