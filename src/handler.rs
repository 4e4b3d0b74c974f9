//! Request Handler
//!
//! Authenticates an inbound event against the cached secret, assumes the
//! cross-account role and drives the requested directory method through the
//! aggregator.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::cache::SecretCache;
use crate::config::Config;
use crate::directory::{aggregate, resolve_action};
use crate::error::{ProxyError, Result};
use crate::models::{ProxyEvent, ResponseEnvelope};
use crate::services::{DirectoryApi, RoleAssumer, SecretStore};

/// Field of the secret payload holding the shared token.
#[derive(Debug, Deserialize)]
struct SecretPayload {
    token: Option<String>,
}

/// Identifiers the handler passes to its collaborators.
#[derive(Debug, Clone, Default)]
pub struct HandlerSettings {
    pub role_arn: String,
    pub role_session_name: String,
    pub external_id: String,
    pub secret_id: String,
}

impl From<&Config> for HandlerSettings {
    fn from(config: &Config) -> Self {
        Self {
            role_arn: config.role_arn.clone(),
            role_session_name: config.role_session_name.clone(),
            external_id: config.external_id.clone(),
            secret_id: config.secret_token_arn.clone(),
        }
    }
}

// == Proxy Handler ==
/// Orchestrates one proxied request.
///
/// Cheap to clone; clones share the same secret cache.
#[derive(Clone)]
pub struct ProxyHandler {
    settings: Arc<HandlerSettings>,
    secret_cache: Arc<RwLock<SecretCache>>,
    secrets: Arc<dyn SecretStore>,
    roles: Arc<dyn RoleAssumer>,
    directory: Arc<dyn DirectoryApi>,
}

impl ProxyHandler {
    pub fn new(
        settings: HandlerSettings,
        secret_cache: Arc<RwLock<SecretCache>>,
        secrets: Arc<dyn SecretStore>,
        roles: Arc<dyn RoleAssumer>,
        directory: Arc<dyn DirectoryApi>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            secret_cache,
            secrets,
            roles,
            directory,
        }
    }

    /// Shared handle to the secret cache.
    pub fn secret_cache(&self) -> &Arc<RwLock<SecretCache>> {
        &self.secret_cache
    }

    // == Handle ==
    /// Processes `event` and wraps the outcome in a response envelope.
    ///
    /// Failures are logged with their cause and answered with the opaque
    /// 500 envelope.
    pub async fn handle(&self, event: ProxyEvent) -> ResponseEnvelope {
        match self.process(event).await {
            Ok(body) => ResponseEnvelope::ok(&body),
            Err(err) => {
                report_failure(&err);
                ResponseEnvelope::internal_error()
            }
        }
    }

    /// Runs the request and returns the directory result, surfacing every
    /// failure as-is.
    pub async fn process(&self, event: ProxyEvent) -> Result<Value> {
        debug!(
            operation = ?event.operation_name(),
            has_api_key = event.api_key().is_some(),
            "Received event"
        );

        let api_key = event.api_key().ok_or(ProxyError::MissingApiKey)?;
        let secret_token = self.secret_token().await?;
        if api_key != secret_token {
            return Err(ProxyError::TokenMismatch);
        }

        let action = event
            .operation_name()
            .ok_or(ProxyError::MissingOperation)?
            .to_string();
        info!(operation = %action, "Operation received");
        let spec = resolve_action(&action)?;

        let params = match event.path_parameters {
            Some(params) => {
                debug!(params = ?params, "Path parameters");
                params
            }
            None => {
                debug!("Event contains no path parameters");
                Map::new()
            }
        };

        let settings = &self.settings;
        let credentials = self
            .roles
            .assume_role(
                &settings.role_arn,
                &settings.role_session_name,
                &settings.external_id,
            )
            .await?;

        let directory = &self.directory;
        let credentials = &credentials;
        let result = aggregate(spec.method_name, spec.result_array_key, params, move |params| {
            directory.call(credentials, spec.method_name, params)
        })
        .await?;
        info!(
            operation = %action,
            records = result.record_count(),
            "Directory call completed"
        );

        let body = result.into_value();
        if let Some(status) = body.get("statusCode") {
            return Err(ProxyError::UnexpectedResponse(format!(
                "body carries statusCode {}",
                status
            )));
        }

        Ok(body)
    }

    // == Secret Token ==
    /// Returns the shared token, from cache when fresh.
    ///
    /// On a miss the secret is fetched and written back with the cache's
    /// configured TTL. Concurrent misses may each fetch and write; the last
    /// write wins.
    async fn secret_token(&self) -> Result<String> {
        if let Some(cached) = self.secret_cache.read().await.read()? {
            debug!(
                expires_in_secs = cached.remaining_ms.saturating_add(500) / 1000,
                "Secret token found in cache"
            );
            return Ok(cached.value);
        }

        info!("Secret token not found in cache, fetching it from the secret store");
        let payload = self.secrets.fetch_secret(&self.settings.secret_id).await?;
        let token = parse_secret_token(&payload)?;

        // Read back through the codec so callers compare the decoded form
        let mut cache = self.secret_cache.write().await;
        cache.write(&token, None)?;
        match cache.read()? {
            Some(cached) => Ok(cached.value),
            // Only reachable when the TTL runs out between write and read
            None => Ok(token),
        }
    }
}

/// Logs a failed request with its full cause chain.
pub fn report_failure(err: &ProxyError) {
    error!(error = %err.display_chain(), "Request failed");
}

/// Extracts the `token` field from a JSON secret payload.
fn parse_secret_token(payload: &str) -> Result<String> {
    let secret: SecretPayload = serde_json::from_str(payload)
        .map_err(|err| ProxyError::MalformedSecret(err.to_string()))?;
    secret
        .token
        .ok_or_else(|| ProxyError::MalformedSecret("missing token field".to_string()))
}
