//! Request resolution pipeline.
//!
//! Turns an edited request plus its effective collection settings and the
//! active environment into the concrete request handed to the transport
//! collaborator. The pipeline never fails: unresolved variables stay
//! visible and every input shape reaching it is valid by construction.

use std::collections::HashMap;

use quiver_domain::{AuthType, CollectionSettings, Environment, HttpRequest, KeyValuePair};

use crate::variable_resolver::{replace_variables, resolve_request_variables};

/// Resolves a request against its effective collection settings and the
/// active environment.
///
/// Steps, in order:
/// 1. Variable-substitute the request itself.
/// 2. Prepend a non-blank, variable-substituted `base_url` to the request
///    URL with exactly one separating slash. No absolute-URL detection:
///    when a base URL is configured and the request URL is non-empty, the
///    base is always prepended.
/// 3. Seed headers from the collection settings, then overlay the request
///    headers case-insensitively; the leaf request wins on collision,
///    the opposite direction from the ancestor settings merge.
/// 4. Adopt the collection auth when the request itself carries none and
///    has not opted out via `disable_inherit`.
#[must_use]
pub fn resolve_request_with_collection_settings(
    request: &HttpRequest,
    collection_settings: Option<&CollectionSettings>,
    active_environment: Option<&Environment>,
) -> HttpRequest {
    let mut resolved = resolve_request_variables(request, active_environment);
    let Some(settings) = collection_settings else {
        return resolved;
    };

    if let Some(base_url) = settings.base_url.as_deref()
        && !base_url.trim().is_empty()
        && !resolved.url.is_empty()
    {
        let variables = active_environment
            .filter(|env| !env.variables.is_empty())
            .map(Environment::variable_map);
        let base = match &variables {
            Some(variables) => replace_variables(base_url, variables),
            None => base_url.to_string(),
        };
        resolved.url = join_base_url(base.trim(), &resolved.url);
    }

    if let Some(collection_headers) = settings.headers.as_deref() {
        resolved.headers = overlay_headers(collection_headers, &resolved.headers);
    }

    if resolved.auth.auth_type == AuthType::None
        && !resolved.auth.disable_inherit
        && let Some(auth) = &settings.auth
    {
        resolved.auth = auth.clone();
    }

    resolved
}

/// Joins a base URL and a request path with exactly one separating slash.
fn join_base_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Seeds `collection` headers, then overlays `request` headers on top.
/// Collision is case-insensitive by key and the request pair wins whole,
/// keeping the collection pair's slot in the output order.
fn overlay_headers(collection: &[KeyValuePair], request: &[KeyValuePair]) -> Vec<KeyValuePair> {
    let mut merged: Vec<KeyValuePair> = collection.to_vec();
    let mut index: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(slot, pair)| (pair.key.to_lowercase(), slot))
        .collect();

    for pair in request {
        let key = pair.key.to_lowercase();
        match index.get(&key) {
            Some(&slot) => merged[slot] = pair.clone(),
            None => {
                index.insert(key, merged.len());
                merged.push(pair.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use quiver_domain::{AuthConfig, HttpMethod};

    fn settings_with_base_url(url: &str) -> CollectionSettings {
        CollectionSettings {
            base_url: Some(url.to_string()),
            ..CollectionSettings::default()
        }
    }

    #[test]
    fn test_no_settings_no_environment_is_identity() {
        let request = HttpRequest::new(HttpMethod::Get, "https://api.test/users");
        let resolved = resolve_request_with_collection_settings(&request, None, None);
        assert_eq!(resolved, request);
    }

    #[test]
    fn test_base_url_normalization_trailing_and_leading_slash() {
        let request = HttpRequest::new(HttpMethod::Get, "/v1/users");
        let settings = settings_with_base_url("https://api.test/");
        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.url, "https://api.test/v1/users");
    }

    #[test]
    fn test_base_url_normalization_no_slashes() {
        let request = HttpRequest::new(HttpMethod::Get, "v1/users");
        let settings = settings_with_base_url("https://api.test");
        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.url, "https://api.test/v1/users");
    }

    #[test]
    fn test_base_url_prepended_even_to_absolute_urls() {
        // Relative-vs-absolute detection belongs to the UI layer; the
        // engine prepends unconditionally.
        let request = HttpRequest::new(HttpMethod::Get, "https://other.test/users");
        let settings = settings_with_base_url("https://api.test");
        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.url, "https://api.test/https://other.test/users");
    }

    #[test]
    fn test_blank_base_url_is_ignored() {
        let request = HttpRequest::new(HttpMethod::Get, "/users");
        let settings = settings_with_base_url("   ");
        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.url, "/users");
    }

    #[test]
    fn test_empty_request_url_stays_empty() {
        let request = HttpRequest::new(HttpMethod::Get, "");
        let settings = settings_with_base_url("https://api.test");
        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.url, "");
    }

    #[test]
    fn test_base_url_variables_are_resolved() {
        let mut env = Environment::new("dev", Utc::now());
        env.set_variable("host", "api.example.com");

        let request = HttpRequest::new(HttpMethod::Get, "/users");
        let settings = settings_with_base_url("https://{{host}}");
        let resolved =
            resolve_request_with_collection_settings(&request, Some(&settings), Some(&env));
        assert_eq!(resolved.url, "https://api.example.com/users");
    }

    #[test]
    fn test_request_header_wins_over_collection_header() {
        let request = HttpRequest::new(HttpMethod::Get, "/users")
            .with_header("Authorization", "Bearer yyy");
        let settings = CollectionSettings {
            headers: Some(vec![KeyValuePair::new("Authorization", "Basic xxx")]),
            ..CollectionSettings::default()
        };

        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.headers.len(), 1);
        assert_eq!(resolved.headers[0].value, "Bearer yyy");
    }

    #[test]
    fn test_collection_headers_seed_first() {
        let request = HttpRequest::new(HttpMethod::Get, "/users").with_header("X-Own", "1");
        let settings = CollectionSettings {
            headers: Some(vec![
                KeyValuePair::new("Accept", "application/json"),
                KeyValuePair::new("X-Shared", "yes"),
            ]),
            ..CollectionSettings::default()
        };

        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        let keys: Vec<&str> = resolved.headers.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, ["Accept", "X-Shared", "X-Own"]);
    }

    #[test]
    fn test_auth_inherited_when_request_has_none() {
        let request = HttpRequest::new(HttpMethod::Get, "/me");
        let settings = CollectionSettings {
            auth: Some(AuthConfig::bearer("collection-token")),
            ..CollectionSettings::default()
        };

        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.auth.auth_type, AuthType::Bearer);
        assert_eq!(
            resolved.auth.active_bearer().expect("bearer").token,
            "collection-token"
        );
    }

    #[test]
    fn test_auth_inheritance_suppressed_by_disable_inherit() {
        let request =
            HttpRequest::new(HttpMethod::Get, "/me").with_auth(AuthConfig::inherit_disabled());
        let settings = CollectionSettings {
            auth: Some(AuthConfig::bearer("collection-token")),
            ..CollectionSettings::default()
        };

        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.auth.auth_type, AuthType::None);
    }

    #[test]
    fn test_request_auth_is_used_as_is() {
        let request =
            HttpRequest::new(HttpMethod::Get, "/me").with_auth(AuthConfig::basic("me", "pw"));
        let settings = CollectionSettings {
            auth: Some(AuthConfig::bearer("collection-token")),
            ..CollectionSettings::default()
        };

        let resolved = resolve_request_with_collection_settings(&request, Some(&settings), None);
        assert_eq!(resolved.auth.auth_type, AuthType::Basic);
        assert!(resolved.auth.active_bearer().is_none());
    }

    #[test]
    fn test_full_pipeline() {
        let mut env = Environment::new("dev", Utc::now());
        env.set_variable("host", "api.example.com");
        env.set_variable("token", "sk-123");

        let request = HttpRequest::new(HttpMethod::Get, "/users/{{token}}")
            .with_header("X-Own", "{{token}}");
        let settings = CollectionSettings {
            base_url: Some("https://{{host}}/".to_string()),
            headers: Some(vec![KeyValuePair::new("Accept", "application/json")]),
            auth: Some(AuthConfig::bearer("shared")),
            ..CollectionSettings::default()
        };

        let resolved =
            resolve_request_with_collection_settings(&request, Some(&settings), Some(&env));
        assert_eq!(resolved.url, "https://api.example.com/users/sk-123");
        let keys: Vec<&str> = resolved.headers.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, ["Accept", "X-Own"]);
        assert_eq!(resolved.headers[1].value, "sk-123");
        assert_eq!(resolved.auth.auth_type, AuthType::Bearer);
    }
}
