//! Inbound event model
//!
//! API-gateway shaped event carrying the caller's key, the requested
//! operation and its parameters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Header carrying the caller's shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Inbound request event.
///
/// Every field may be absent or `null` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
    #[serde(default)]
    pub path_parameters: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl ProxyEvent {
    /// Creates an event for `operation` with no headers or parameters.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            headers: None,
            request_context: Some(RequestContext {
                operation_name: Some(operation.into()),
            }),
            path_parameters: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path_parameters
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Header value by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?.iter().find_map(|(key, value)| {
            key.eq_ignore_ascii_case(name).then_some(value.as_str())
        })
    }

    pub fn api_key(&self) -> Option<&str> {
        self.header(API_KEY_HEADER)
    }

    pub fn operation_name(&self) -> Option<&str> {
        self.request_context.as_ref()?.operation_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_deserialize() {
        let json = r#"{
            "headers": {"X-API-Key": "abc", "Accept": "*/*"},
            "requestContext": {"operationName": "ListChildren", "stage": "prod"},
            "pathParameters": {"ParentId": "ou-1", "ChildType": "ACCOUNT"}
        }"#;
        let event: ProxyEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.api_key(), Some("abc"));
        assert_eq!(event.operation_name(), Some("ListChildren"));
        assert_eq!(event.path_parameters.unwrap()["ParentId"], json!("ou-1"));
    }

    #[test]
    fn test_event_with_nulls() {
        let json = r#"{"headers": null, "requestContext": null, "pathParameters": null}"#;
        let event: ProxyEvent = serde_json::from_str(json).unwrap();

        assert!(event.api_key().is_none());
        assert!(event.operation_name().is_none());
        assert!(event.path_parameters.is_none());
    }

    #[test]
    fn test_event_empty_object() {
        let event: ProxyEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event, ProxyEvent::default());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let event = ProxyEvent::new("ListRoots").with_header("x-api-key", "k");
        assert_eq!(event.api_key(), Some("k"));
        assert_eq!(event.header("X-API-KEY"), Some("k"));
        assert!(event.header("Authorization").is_none());
    }

    #[test]
    fn test_builder_helpers() {
        let event = ProxyEvent::new("DescribeAccount").with_path_parameter("AccountId", "111122223333");

        assert_eq!(event.operation_name(), Some("DescribeAccount"));
        assert_eq!(
            event.path_parameters.unwrap().get("AccountId"),
            Some(&json!("111122223333"))
        );
    }
}
