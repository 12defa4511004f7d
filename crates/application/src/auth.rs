//! Auth-header materialization.
//!
//! Maps a final [`AuthConfig`] to the concrete header or query-parameter
//! addition the transport collaborator sends. Not part of the resolution
//! pipeline itself; the host calls it on the resolved request.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use quiver_domain::{ApiKeyLocation, AuthConfig, AuthType, HttpRequest, KeyValuePair};

/// A concrete addition derived from an auth configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAddition {
    /// Add this header to the request.
    Header {
        /// Header name (e.g. "Authorization").
        name: String,
        /// Header value (e.g. "Bearer token123").
        value: String,
    },
    /// Add this query parameter.
    QueryParam {
        /// Query parameter name.
        name: String,
        /// Query parameter value.
        value: String,
    },
}

/// Maps an auth configuration to its wire-level addition, if any.
///
/// `basic` becomes `Authorization: Basic <base64(user:pass)>`, `bearer`
/// becomes `Authorization: Bearer <token>`, and `api_key` becomes a header
/// or query parameter named by its key. `none` (and a config whose active
/// sub-config is missing) yields nothing.
#[must_use]
pub fn materialize_auth(auth: &AuthConfig) -> Option<AuthAddition> {
    match auth.auth_type {
        AuthType::None => None,
        AuthType::Basic => auth.active_basic().map(|basic| AuthAddition::Header {
            name: "Authorization".to_string(),
            value: format!(
                "Basic {}",
                BASE64.encode(format!("{}:{}", basic.username, basic.password))
            ),
        }),
        AuthType::Bearer => auth.active_bearer().map(|bearer| AuthAddition::Header {
            name: "Authorization".to_string(),
            value: format!("Bearer {}", bearer.token),
        }),
        AuthType::ApiKey => auth.active_api_key().map(|api_key| match api_key.location {
            ApiKeyLocation::Header => AuthAddition::Header {
                name: api_key.key.clone(),
                value: api_key.value.clone(),
            },
            ApiKeyLocation::Query => AuthAddition::QueryParam {
                name: api_key.key.clone(),
                value: api_key.value.clone(),
            },
        }),
    }
}

/// Returns a copy of `request` with its auth addition applied.
///
/// A header the user already set (matched case-insensitively) is never
/// overwritten by the generated one; an existing query parameter with the
/// same name is likewise left alone.
#[must_use]
pub fn apply_auth(request: &HttpRequest) -> HttpRequest {
    let mut applied = request.clone();
    match materialize_auth(&request.auth) {
        Some(AuthAddition::Header { name, value }) => {
            if applied.header(&name).is_none() {
                applied.headers.push(KeyValuePair::new(name, value));
            }
        }
        Some(AuthAddition::QueryParam { name, value }) => {
            if !applied.query_params.iter().any(|p| p.key == name) {
                applied.query_params.push(KeyValuePair::new(name, value));
            }
        }
        None => {}
    }
    applied
}
