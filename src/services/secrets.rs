//! Secret store collaborator

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AwsJsonClient;
use crate::error::{ProxyError, Result};

const GET_SECRET_VALUE_TARGET: &str = "secretsmanager.GetSecretValue";

/// Source of the shared secret that callers must present.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the raw secret payload stored under `secret_id`.
    ///
    /// Failures surface as [`ProxyError::SecretFetch`].
    async fn fetch_secret(&self, secret_id: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueResponse {
    secret_string: Option<String>,
}

/// Secrets Manager style store reached over the AWS JSON protocol.
#[derive(Debug, Clone)]
pub struct HttpSecretStore {
    client: AwsJsonClient,
}

impl HttpSecretStore {
    pub fn new(client: AwsJsonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for HttpSecretStore {
    async fn fetch_secret(&self, secret_id: &str) -> Result<String> {
        info!(secret_id = %secret_id, "Retrieving secret");

        let reply = self
            .client
            .call(GET_SECRET_VALUE_TARGET, &json!({ "SecretId": secret_id }), None)
            .await
            .map_err(|err| {
                let message = format!("{:#}", err);
                warn!(error = %message, "Secret retrieval failed");
                ProxyError::SecretFetch(message)
            })?;

        let response: GetSecretValueResponse = serde_json::from_value(reply)
            .map_err(|err| ProxyError::SecretFetch(format!("parsing response: {}", err)))?;

        response
            .secret_string
            .ok_or_else(|| ProxyError::SecretFetch("secret has no string value".to_string()))
    }
}
