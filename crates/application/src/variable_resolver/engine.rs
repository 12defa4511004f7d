//! Substitution engine over a flat variable map.

use std::collections::HashMap;

use quiver_domain::{Environment, HttpRequest};

use super::parser::parse_variables;

/// Substitutes every known `{{variable}}` in `text`.
///
/// Unknown names are kept verbatim, including the braces. Never fails.
#[must_use]
pub fn replace_variables(text: &str, variables: &HashMap<String, String>) -> String {
    let references = parse_variables(text);
    if references.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for reference in &references {
        result.push_str(&text[last_end..reference.span.start]);
        match variables.get(&reference.name) {
            Some(value) => result.push_str(value),
            None => result.push_str(&text[reference.span.clone()]),
        }
        last_end = reference.span.end;
    }
    result.push_str(&text[last_end..]);
    result
}

/// Substitutes the active environment's variables into every substitutable
/// field of `request`: the URL (trimmed afterwards), query-parameter keys
/// and values, header keys and values, the body content, and the populated
/// auth sub-fields. Method, body kind, and enabled flags pass through.
///
/// Without an active environment (or with an empty variable list) the
/// request is returned as an unchanged copy.
#[must_use]
pub fn resolve_request_variables(
    request: &HttpRequest,
    active_environment: Option<&Environment>,
) -> HttpRequest {
    let Some(environment) = active_environment else {
        return request.clone();
    };
    if environment.variables.is_empty() {
        return request.clone();
    }

    let variables = environment.variable_map();
    let mut resolved = request.clone();

    resolved.url = replace_variables(&resolved.url, &variables)
        .trim()
        .to_string();

    for pair in &mut resolved.query_params {
        pair.key = replace_variables(&pair.key, &variables);
        pair.value = replace_variables(&pair.value, &variables);
    }
    for pair in &mut resolved.headers {
        pair.key = replace_variables(&pair.key, &variables);
        pair.value = replace_variables(&pair.value, &variables);
    }

    resolved.body.content = replace_variables(&resolved.body.content, &variables);

    if let Some(basic) = resolved.auth.basic.as_mut() {
        basic.username = replace_variables(&basic.username, &variables);
        basic.password = replace_variables(&basic.password, &variables);
    }
    if let Some(bearer) = resolved.auth.bearer.as_mut() {
        bearer.token = replace_variables(&bearer.token, &variables);
    }
    if let Some(api_key) = resolved.auth.api_key.as_mut() {
        api_key.key = replace_variables(&api_key.key, &variables);
        api_key.value = replace_variables(&api_key.value, &variables);
    }

    resolved
}
