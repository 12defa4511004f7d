//! HTTP request model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth::AuthConfig;
use crate::key_value::KeyValuePair;

/// Supported HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
}

impl HttpMethod {
    /// Returns all available HTTP methods.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Head,
            Self::Options,
        ]
    }

    /// Returns whether this method typically has a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// No body.
    #[default]
    None,
    /// JSON body.
    Json,
    /// Plain text body.
    Text,
    /// URL-encoded form body.
    FormUrlencoded,
}

/// Request body: a kind plus raw content.
///
/// Content is kept as entered; variable substitution applies to the content
/// string, never to the kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Body kind.
    #[serde(rename = "type", default)]
    pub body_type: BodyType,
    /// Raw body content. May contain `{{variables}}`.
    #[serde(default)]
    pub content: String,
}

impl RequestBody {
    /// Creates a body of the given kind.
    #[must_use]
    pub fn new(body_type: BodyType, content: impl Into<String>) -> Self {
        Self {
            body_type,
            content: content.into(),
        }
    }

    /// Creates a JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::new(BodyType::Json, content)
    }
}

/// An editable HTTP request definition.
///
/// Every string field may contain `{{variables}}`; the resolution pipeline
/// produces the concrete, send-ready copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Request URL, possibly relative to an inherited base URL.
    #[serde(default)]
    pub url: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Request headers, in display order.
    #[serde(default)]
    pub headers: Vec<KeyValuePair>,
    /// Query parameters, in display order.
    #[serde(default)]
    pub query_params: Vec<KeyValuePair>,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl HttpRequest {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(KeyValuePair::new(key, value));
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(KeyValuePair::new(key, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the authentication configuration.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Finds a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&KeyValuePair> {
        self.headers
            .iter()
            .find(|pair| pair.key.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_method_has_body() {
        assert!(HttpMethod::Post.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Head.has_body());
    }

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "https://api.example.com/users")
            .with_header("Content-Type", "application/json")
            .with_query_param("verbose", "1")
            .with_body(RequestBody::json(r#"{"name": "Ada"}"#));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.query_params.len(), 1);
        assert_eq!(request.body.body_type, BodyType::Json);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request =
            HttpRequest::new(HttpMethod::Get, "/users").with_header("Authorization", "Bearer x");
        assert!(request.header("authorization").is_some());
        assert!(request.header("AUTHORIZATION").is_some());
        assert!(request.header("Accept").is_none());
    }

    #[test]
    fn test_deserialize_minimal() {
        let request: HttpRequest = serde_json::from_str(r#"{"url": "/ping"}"#).unwrap();
        assert_eq!(request.url, "/ping");
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.headers.is_empty());
        assert_eq!(request.body.body_type, BodyType::None);
    }
}
