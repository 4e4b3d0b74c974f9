//! Paged directory API collaborator

use async_trait::async_trait;
use serde_json::Value;

use super::{AwsJsonClient, TemporaryCredentials};
use crate::directory::Page;
use crate::error::BoxError;

const TARGET_PREFIX: &str = "AWSOrganizationsV20161128";

/// Paged organization directory.
///
/// `method_name` is one of the methods named in the action table. Errors are
/// returned untagged; the aggregator attaches the method name.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn call(
        &self,
        credentials: &TemporaryCredentials,
        method_name: &str,
        params: Page,
    ) -> Result<Page, BoxError>;
}

/// Organizations style directory reached over the AWS JSON protocol.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: AwsJsonClient,
}

impl HttpDirectoryClient {
    pub fn new(client: AwsJsonClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
    async fn call(
        &self,
        credentials: &TemporaryCredentials,
        method_name: &str,
        params: Page,
    ) -> Result<Page, BoxError> {
        let target = format!("{}.{}", TARGET_PREFIX, operation_name(method_name));
        let reply = self
            .client
            .call(&target, &Value::Object(params), Some(credentials))
            .await?;

        match reply {
            Value::Object(page) => Ok(page),
            other => Err(format!("{} returned a non-object body: {}", target, other).into()),
        }
    }
}

/// `listAccounts` -> `ListAccounts`
fn operation_name(method_name: &str) -> String {
    let mut chars = method_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
