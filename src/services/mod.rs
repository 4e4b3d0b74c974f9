//! Services Module
//!
//! Remote collaborators the proxy depends on: the secret store, the role
//! assumption service and the paged directory API. Each is a trait so the
//! handler can be driven by any implementation; the `Http*` types talk to
//! AWS-JSON-protocol endpoints over reqwest.

mod aws_json;
mod credentials;
mod directory;
mod secrets;

pub use aws_json::AwsJsonClient;
pub use credentials::{HttpRoleAssumer, RoleAssumer, TemporaryCredentials, ASSUME_ROLE_DURATION_SECS};
pub use directory::{DirectoryApi, HttpDirectoryClient};
pub use secrets::{HttpSecretStore, SecretStore};
