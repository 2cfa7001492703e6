//! Uniform response envelope returned to the gateway.
//!
//! # Invariants
//! - Every response carries `Access-Control-Allow-Origin: *`.
//! - Error bodies are always the single-key object `{"error": <message>}`.
//! - Bodies are never base64 encoded.

use crate::error::ActionError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const ALLOW_ORIGIN_HEADER: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS_HEADER: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS_HEADER: &str = "Access-Control-Allow-Headers";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    /// Fixed pre-flight answer: 200, empty body, full CORS declaration.
    pub fn preflight() -> Self {
        let mut headers = base_headers();
        headers.insert(ALLOW_METHODS_HEADER.to_string(), ALLOWED_METHODS.to_string());
        headers.insert(ALLOW_HEADERS_HEADER.to_string(), ALLOWED_HEADERS.to_string());
        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn json(status_code: u16, payload: &Value) -> Self {
        let mut headers = base_headers();
        headers.insert(
            CONTENT_TYPE_HEADER.to_string(),
            "application/json".to_string(),
        );
        Self {
            status_code,
            headers,
            body: payload.to_string(),
            is_base64_encoded: false,
        }
    }

    pub fn ok(payload: &Value) -> Self {
        Self::json(200, payload)
    }

    pub fn from_error(err: &ActionError) -> Self {
        Self::json(err.status_code(), &json!({ "error": err.to_string() }))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Parses the body back into JSON. Empty bodies yield `None`.
    pub fn body_json(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

fn base_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(ALLOW_ORIGIN_HEADER.to_string(), "*".to_string());
    headers
}
