//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_TTL_MS;

const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_ORGANIZATIONS_ENDPOINT: &str = "https://organizations.us-east-1.amazonaws.com";

/// Proxy configuration parameters.
///
/// Values can be configured via environment variables. The role and secret
/// identifiers have no default and must be set before the server starts.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Role assumed in the directory account
    pub role_arn: String,
    /// Session name used when assuming the role
    pub role_session_name: String,
    /// External id presented when assuming the role
    pub external_id: String,
    /// Identifier of the secret holding the shared API token
    pub secret_token_arn: String,
    /// Region used to derive default service endpoints
    pub aws_region: String,
    /// How long a fetched secret stays cached, in milliseconds
    pub secret_ttl_ms: u64,
    /// Role assumption service endpoint
    pub sts_endpoint: String,
    /// Secret store endpoint
    pub secrets_endpoint: String,
    /// Directory API endpoint
    pub organizations_endpoint: String,
    /// Timeout applied to every outbound HTTP request, in seconds
    pub http_timeout_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ROLE_ARN`, `ROLE_SESSION_NAME`, `EXTERNAL_ID` - cross-account role (required)
    /// - `SECRET_TOKEN_ARN` - secret holding the API token (required)
    /// - `AWS_REGION` - region for default endpoints (default: us-east-1)
    /// - `SECRET_TTL_MS` - secret cache TTL (default: 300000)
    /// - `STS_ENDPOINT`, `SECRETS_ENDPOINT` - default to the regional endpoints
    /// - `ORGANIZATIONS_ENDPOINT` - default: the us-east-1 endpoint
    /// - `HTTP_TIMEOUT_SECS` - outbound request timeout (default: 10)
    pub fn from_env() -> Self {
        let aws_region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            role_arn: env::var("ROLE_ARN").unwrap_or_default(),
            role_session_name: env::var("ROLE_SESSION_NAME").unwrap_or_default(),
            external_id: env::var("EXTERNAL_ID").unwrap_or_default(),
            secret_token_arn: env::var("SECRET_TOKEN_ARN").unwrap_or_default(),
            secret_ttl_ms: env::var("SECRET_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            sts_endpoint: env::var("STS_ENDPOINT")
                .unwrap_or_else(|_| regional_endpoint("sts", &aws_region)),
            secrets_endpoint: env::var("SECRETS_ENDPOINT")
                .unwrap_or_else(|_| regional_endpoint("secretsmanager", &aws_region)),
            organizations_endpoint: env::var("ORGANIZATIONS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ORGANIZATIONS_ENDPOINT.to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            aws_region,
        }
    }

    /// Names of required variables that are unset or empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("ROLE_ARN", &self.role_arn),
            ("ROLE_SESSION_NAME", &self.role_session_name),
            ("EXTERNAL_ID", &self.external_id),
            ("SECRET_TOKEN_ARN", &self.secret_token_arn),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

fn regional_endpoint(service: &str, region: &str) -> String {
    format!("https://{}.{}.amazonaws.com", service, region)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            role_arn: String::new(),
            role_session_name: String::new(),
            external_id: String::new(),
            secret_token_arn: String::new(),
            aws_region: DEFAULT_REGION.to_string(),
            secret_ttl_ms: DEFAULT_TTL_MS,
            sts_endpoint: regional_endpoint("sts", DEFAULT_REGION),
            secrets_endpoint: regional_endpoint("secretsmanager", DEFAULT_REGION),
            organizations_endpoint: DEFAULT_ORGANIZATIONS_ENDPOINT.to_string(),
            http_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.secret_ttl_ms, 300_000);
        assert_eq!(config.sts_endpoint, "https://sts.us-east-1.amazonaws.com");
        assert_eq!(
            config.secrets_endpoint,
            "https://secretsmanager.us-east-1.amazonaws.com"
        );
        assert_eq!(config.http_timeout_secs, 10);
    }

    #[test]
    fn test_missing_required() {
        let mut config = Config::default();
        assert_eq!(
            config.missing_required(),
            vec!["ROLE_ARN", "ROLE_SESSION_NAME", "EXTERNAL_ID", "SECRET_TOKEN_ARN"]
        );

        config.role_arn = "arn:aws:iam::111122223333:role/reader".to_string();
        config.role_session_name = "directory-proxy".to_string();
        config.external_id = "ext".to_string();
        config.secret_token_arn = "arn:aws:secretsmanager:us-east-1:1:secret:token".to_string();
        assert!(config.missing_required().is_empty());
    }

    #[test]
    fn test_regional_endpoint() {
        assert_eq!(
            regional_endpoint("sts", "eu-west-1"),
            "https://sts.eu-west-1.amazonaws.com"
        );
    }
}
