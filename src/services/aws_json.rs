//! AWS JSON protocol transport
//!
//! Minimal POST-with-target client shared by the HTTP collaborators.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use tracing::debug;

use super::TemporaryCredentials;

const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const TARGET_HEADER: &str = "X-Amz-Target";
const SECURITY_TOKEN_HEADER: &str = "X-Amz-Security-Token";
const ACCESS_KEY_HEADER: &str = "X-Amz-Access-Key-Id";

/// Sends `X-Amz-Target` requests to one endpoint.
///
/// Requests are not SigV4-signed; temporary credentials travel as the
/// access key id and security token headers. The secret key is never sent.
#[derive(Debug, Clone)]
pub struct AwsJsonClient {
    endpoint: String,
    http_client: Client,
}

impl AwsJsonClient {
    /// Creates a client with its own connection pool.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("creating HTTP client")?;
        Ok(Self::with_client(http_client, endpoint))
    }

    /// Creates a client sharing an existing connection pool.
    pub fn with_client(http_client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs `body` with the given target and returns the decoded JSON reply.
    pub async fn call(
        &self,
        target: &str,
        body: &Value,
        credentials: Option<&TemporaryCredentials>,
    ) -> Result<Value> {
        debug!(endpoint = %self.endpoint, target = %target, "Sending request");

        let mut request = self
            .http_client
            .post(format!("{}/", self.endpoint))
            .header(TARGET_HEADER, target)
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .body(body.to_string());

        if let Some(credentials) = credentials {
            request = request
                .header(ACCESS_KEY_HEADER, &credentials.access_key_id)
                .header(SECURITY_TOKEN_HEADER, &credentials.session_token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("sending {} request", target))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "{} failed with status {}: {}",
                target,
                status,
                body
            ));
        }

        response
            .json()
            .await
            .with_context(|| format!("parsing {} response", target))
    }
}
