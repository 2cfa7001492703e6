//! Gateway request model.
//!
//! # Responsibility
//! - Deserialize the invocation event handed over by the gateway.
//! - Expose method, action, query parameters and the decoded body.
//!
//! # Invariants
//! - A missing method is treated as `GET`.
//! - A missing or blank body decodes as the empty JSON object.

use crate::error::{ActionError, ActionResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// HTTP methods understood by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl Method {
    /// Matches the method token exactly; gateway methods are uppercase.
    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Delete,
            Self::Options,
        ]
        .into_iter()
        .find(|method| method.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Invocation event as delivered by the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

impl GatewayRequest {
    pub fn new(method: Method) -> Self {
        Self {
            http_method: Some(method.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Sets one query parameter.
    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.to_string(), value.into());
        self
    }

    pub fn with_action(self, action: &str) -> Self {
        self.with_query("action", action)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Raw method text, `GET` when the gateway omitted it.
    pub fn method_text(&self) -> &str {
        self.http_method.as_deref().unwrap_or("GET")
    }

    /// Parsed method, `None` when the method is not supported.
    pub fn method(&self) -> Option<Method> {
        Method::parse(self.method_text())
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Action name from the `action` query parameter; empty when absent.
    pub fn action(&self) -> &str {
        self.query("action").unwrap_or("")
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .and_then(|context| context.request_id.as_deref())
    }

    /// Returns the body text, base64-decoding it when flagged.
    pub fn body_text(&self) -> ActionResult<String> {
        let raw = self.body.as_deref().unwrap_or("");
        if !self.is_base64_encoded {
            return Ok(raw.to_string());
        }

        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|err| ActionError::Body(format!("invalid base64 body: {err}")))?;
        String::from_utf8(bytes)
            .map_err(|err| ActionError::Body(format!("body is not valid UTF-8: {err}")))
    }

    /// Decodes the JSON body into `T`.
    pub fn json_body<T: DeserializeOwned>(&self) -> ActionResult<T> {
        let text = self.body_text()?;
        let text = if text.trim().is_empty() {
            "{}"
        } else {
            text.as_str()
        };
        serde_json::from_str(text).map_err(|err| ActionError::Body(err.to_string()))
    }
}
