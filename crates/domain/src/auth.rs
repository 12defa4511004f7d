//! Authentication configuration.
//!
//! `AuthConfig` keeps all sub-configurations alongside a discriminator
//! instead of using an enum: the UI lets the user switch auth types without
//! losing the fields of the previous one, so inactive sub-configs must
//! survive persistence. Resolution reads only the sub-config matching
//! `auth_type` via the `active_*` accessors.

use serde::{Deserialize, Serialize};

/// Discriminator selecting which sub-configuration of an [`AuthConfig`]
/// is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    /// No authentication.
    #[default]
    None,
    /// HTTP Basic authentication.
    Basic,
    /// Bearer token authentication.
    Bearer,
    /// API key in a header or query parameter.
    ApiKey,
}

/// HTTP Basic credentials. Both fields may contain `{{variables}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Bearer token. May contain `{{variables}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BearerAuth {
    /// The token value.
    pub token: String,
}

/// Location an API key is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeyLocation {
    /// Send as an HTTP header.
    #[default]
    Header,
    /// Send as a query parameter.
    Query,
}

/// API key credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyAuth {
    /// Header or query parameter name.
    pub key: String,
    /// The key value.
    pub value: String,
    /// Where to add the key.
    #[serde(default)]
    pub location: ApiKeyLocation,
}

/// Authentication configuration for a request or a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Which sub-configuration is in effect.
    #[serde(rename = "type", default)]
    pub auth_type: AuthType,

    /// Basic credentials; read only when `auth_type` is `Basic`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic: Option<BasicAuth>,

    /// Bearer token; read only when `auth_type` is `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<BearerAuth>,

    /// API key; read only when `auth_type` is `ApiKey`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<ApiKeyAuth>,

    /// Opts a `None`-typed request out of inheriting collection auth.
    /// Meaningless for any other `auth_type`.
    #[serde(default)]
    pub disable_inherit: bool,
}

impl AuthConfig {
    /// Creates an unauthenticated config that still inherits collection auth.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an unauthenticated config that refuses inherited auth.
    #[must_use]
    pub fn inherit_disabled() -> Self {
        Self {
            disable_inherit: true,
            ..Self::default()
        }
    }

    /// Creates a basic authentication config.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Basic,
            basic: Some(BasicAuth {
                username: username.into(),
                password: password.into(),
            }),
            ..Self::default()
        }
    }

    /// Creates a bearer token config.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::Bearer,
            bearer: Some(BearerAuth {
                token: token.into(),
            }),
            ..Self::default()
        }
    }

    /// Creates an API key config targeting a header.
    #[must_use]
    pub fn api_key_header(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::api_key(key, value, ApiKeyLocation::Header)
    }

    /// Creates an API key config targeting query parameters.
    #[must_use]
    pub fn api_key_query(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::api_key(key, value, ApiKeyLocation::Query)
    }

    /// Creates an API key config with an explicit location.
    #[must_use]
    pub fn api_key(
        key: impl Into<String>,
        value: impl Into<String>,
        location: ApiKeyLocation,
    ) -> Self {
        Self {
            auth_type: AuthType::ApiKey,
            api_key: Some(ApiKeyAuth {
                key: key.into(),
                value: value.into(),
                location,
            }),
            ..Self::default()
        }
    }

    /// Returns true if any authentication is in effect.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !matches!(self.auth_type, AuthType::None)
    }

    /// Basic credentials, only when they are the active sub-config.
    #[must_use]
    pub const fn active_basic(&self) -> Option<&BasicAuth> {
        match self.auth_type {
            AuthType::Basic => self.basic.as_ref(),
            _ => None,
        }
    }

    /// Bearer token, only when it is the active sub-config.
    #[must_use]
    pub const fn active_bearer(&self) -> Option<&BearerAuth> {
        match self.auth_type {
            AuthType::Bearer => self.bearer.as_ref(),
            _ => None,
        }
    }

    /// API key, only when it is the active sub-config.
    #[must_use]
    pub const fn active_api_key(&self) -> Option<&ApiKeyAuth> {
        match self.auth_type {
            AuthType::ApiKey => self.api_key.as_ref(),
            _ => None,
        }
    }
}
