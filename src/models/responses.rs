//! Response models
//!
//! Envelope returned for every proxied request, plus the health payload.

use std::collections::BTreeMap;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const JSON_CONTENT_TYPE: &str = "application/json";
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Lambda-proxy style response.
///
/// `body` holds the JSON-encoded payload as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ResponseEnvelope {
    /// Creates an envelope with a JSON content type around `body`.
    pub fn new(status_code: u16, body: &Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
        Self {
            status_code,
            headers,
            body: body.to_string(),
            is_base64_encoded: false,
        }
    }

    pub fn ok(body: &Value) -> Self {
        Self::new(200, body)
    }

    /// Opaque failure; never carries detail about the cause.
    pub fn internal_error() -> Self {
        Self::new(500, &Value::String(INTERNAL_ERROR_MESSAGE.to_string()))
    }

    /// Parses `body` back into JSON.
    pub fn json_body(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], self.body).into_response()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_serialize() {
        let envelope = ResponseEnvelope::ok(&json!({"Roots": [], "RecordCount": 0}));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["headers"]["Content-Type"], "application/json");
        assert_eq!(json["isBase64Encoded"], false);
        assert_eq!(
            envelope.json_body().unwrap(),
            json!({"Roots": [], "RecordCount": 0})
        );
    }

    #[test]
    fn test_internal_error_is_opaque() {
        let envelope = ResponseEnvelope::internal_error();

        assert_eq!(envelope.status_code, 500);
        assert_eq!(envelope.body, "\"Internal Server Error\"");
    }

    #[test]
    fn test_envelope_into_response() {
        let response = ResponseEnvelope::internal_error().into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
