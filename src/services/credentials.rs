//! Role assumption collaborator

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::AwsJsonClient;
use crate::error::{ProxyError, Result};

const ASSUME_ROLE_TARGET: &str = "AWSSecurityTokenServiceV20110615.AssumeRole";

/// Lifetime requested for assumed-role sessions.
pub const ASSUME_ROLE_DURATION_SECS: u64 = 900;

// == Temporary Credentials ==
/// Short-lived credentials for the cross-account role.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .finish()
    }
}

/// Exchanges the proxy's own identity for credentials in the directory account.
#[async_trait]
pub trait RoleAssumer: Send + Sync {
    /// Failures surface as [`ProxyError::RoleAssume`].
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        external_id: &str,
    ) -> Result<TemporaryCredentials>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumeRoleResponse {
    credentials: TemporaryCredentials,
    assumed_role_user: Option<AssumedRoleUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AssumedRoleUser {
    arn: String,
}

/// STS style role assumption over the AWS JSON protocol.
#[derive(Debug, Clone)]
pub struct HttpRoleAssumer {
    client: AwsJsonClient,
}

impl HttpRoleAssumer {
    pub fn new(client: AwsJsonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleAssumer for HttpRoleAssumer {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
        external_id: &str,
    ) -> Result<TemporaryCredentials> {
        info!(role_arn = %role_arn, "Trying to assume role");

        let body = json!({
            "RoleArn": role_arn,
            "RoleSessionName": session_name,
            "ExternalId": external_id,
            "DurationSeconds": ASSUME_ROLE_DURATION_SECS,
        });

        let reply = self
            .client
            .call(ASSUME_ROLE_TARGET, &body, None)
            .await
            .map_err(|err| {
                let message = format!("{:#}", err);
                warn!(error = %message, "Role assumption failed");
                ProxyError::RoleAssume(message)
            })?;

        let response: AssumeRoleResponse = serde_json::from_value(reply)
            .map_err(|err| ProxyError::RoleAssume(format!("parsing response: {}", err)))?;

        if let Some(user) = &response.assumed_role_user {
            info!(assumed_role_user_arn = %user.arn, "Role assumed");
        }

        Ok(response.credentials)
    }
}
