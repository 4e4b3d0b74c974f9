//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::cache::SecretCache;
use crate::config::Config;
use crate::error::Result;
use crate::handler::{report_failure, HandlerSettings, ProxyHandler};
use crate::models::{HealthResponse, ProxyEvent, RequestContext, ResponseEnvelope};
use crate::services::{
    AwsJsonClient, HttpDirectoryClient, HttpRoleAssumer, HttpSecretStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Request orchestrator, holding the process-wide secret cache
    pub handler: ProxyHandler,
}

impl AppState {
    /// Creates a new AppState around the given handler.
    pub fn new(handler: ProxyHandler) -> Self {
        Self { handler }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP collaborators and an empty secret cache using the
    /// configured TTL.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let secrets = HttpSecretStore::new(AwsJsonClient::with_client(
            http_client.clone(),
            &config.secrets_endpoint,
        ));
        let roles = HttpRoleAssumer::new(AwsJsonClient::with_client(
            http_client.clone(),
            &config.sts_endpoint,
        ));
        let directory = HttpDirectoryClient::new(AwsJsonClient::with_client(
            http_client,
            &config.organizations_endpoint,
        ));

        let cache = SecretCache::new().with_ttl(config.secret_ttl_ms);
        let handler = ProxyHandler::new(
            HandlerSettings::from(config),
            Arc::new(RwLock::new(cache)),
            Arc::new(secrets),
            Arc::new(roles),
            Arc::new(directory),
        );

        Ok(Self::new(handler))
    }
}

/// Handler for POST /invoke
///
/// Accepts a full event and returns the response envelope as JSON.
pub async fn invoke_handler(
    State(state): State<AppState>,
    Json(event): Json<ProxyEvent>,
) -> Json<ResponseEnvelope> {
    Json(state.handler.handle(event).await)
}

/// Handler for GET /api/:operation
///
/// Builds an event from the request: headers pass through, the query string
/// becomes the path parameters. Success renders the envelope as the HTTP
/// response itself; failures go out through
/// [`ProxyError`](crate::error::ProxyError)'s opaque 500.
pub async fn operation_handler(
    State(state): State<AppState>,
    Path(operation): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<ResponseEnvelope> {
    let event = event_from_request(operation, query, &headers);
    let body = state.handler.process(event).await.map_err(|err| {
        report_failure(&err);
        err
    })?;
    Ok(ResponseEnvelope::ok(&body))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn event_from_request(
    operation: String,
    query: HashMap<String, String>,
    headers: &HeaderMap,
) -> ProxyEvent {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    let path_parameters = (!query.is_empty()).then(|| {
        query
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<String, Value>>()
    });

    ProxyEvent {
        headers: Some(headers),
        request_context: Some(RequestContext {
            operation_name: Some(operation),
        }),
        path_parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_event_from_request() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("abc"));
        let mut query = HashMap::new();
        query.insert("ParentId".to_string(), "ou-1".to_string());

        let event = event_from_request("ListChildren".to_string(), query, &headers);

        assert_eq!(event.api_key(), Some("abc"));
        assert_eq!(event.operation_name(), Some("ListChildren"));
        assert_eq!(
            event.path_parameters.unwrap()["ParentId"],
            Value::String("ou-1".to_string())
        );
    }

    #[test]
    fn test_event_from_request_without_query() {
        let event = event_from_request("ListRoots".to_string(), HashMap::new(), &HeaderMap::new());

        assert!(event.path_parameters.is_none());
        assert!(event.api_key().is_none());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_app_state_from_config() {
        let config = Config {
            secret_ttl_ms: 60_000,
            ..Config::default()
        };
        let state = AppState::from_config(&config).unwrap();

        let cache = state.handler.secret_cache().try_read().unwrap();
        assert_eq!(cache.ttl_ms(), 60_000);
        assert!(cache.read().unwrap().is_none());
    }
}
