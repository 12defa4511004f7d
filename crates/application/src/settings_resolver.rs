//! Ancestor-chain settings resolution.
//!
//! Computes which collection settings are in effect at a node by merging
//! every ancestor's settings root-to-leaf; entries closer to the leaf win
//! ties.

use std::collections::HashMap;

use quiver_domain::{CollectionSettings, CollectionTree, KeyValuePair};

/// Ordered collection ids from the root down to the immediate parent of
/// `node_id`, excluding the node itself. `None` when the node is unknown.
#[must_use]
pub fn ancestor_path(tree: &CollectionTree, node_id: &str) -> Option<Vec<String>> {
    tree.ancestor_path(node_id)
}

/// Id of the collection directly containing `node_id`. `None` when the
/// node is unknown or sits at the root.
#[must_use]
pub fn find_parent_collection_id(tree: &CollectionTree, node_id: &str) -> Option<String> {
    tree.parent_id(node_id).map(str::to_string)
}

/// Full root-to-parent collection chain for `node_id`; alias kept for
/// callers that want the whole chain rather than just the parent.
#[must_use]
pub fn find_collection_path(tree: &CollectionTree, node_id: &str) -> Option<Vec<String>> {
    ancestor_path(tree, node_id)
}

/// Merges settings layers where later entries are closer to the leaf and
/// win ties.
///
/// - `base_url`: the last non-blank value wins outright; earlier values are
///   discarded, never concatenated. Blank values (cleared overrides) leave
///   the inherited value standing.
/// - `auth`: the last layer with a configured (non-`none`) auth wins
///   wholesale. Layers without auth, and layers whose auth type is `none`,
///   never displace an adopted auth.
/// - `headers`: case-insensitive merge by header name. A later pair with a
///   known name replaces the earlier pair entirely (value and enabled
///   flag); unshadowed earlier pairs are retained. Output order is
///   first-encounter order.
///
/// `git_remote` and `last_synced_at` describe one collection's sync binding
/// and are not inherited.
#[must_use]
pub fn merge_settings<'a, I>(layers: I) -> CollectionSettings
where
    I: IntoIterator<Item = &'a CollectionSettings>,
{
    let mut merged = CollectionSettings::default();
    let mut headers: Vec<KeyValuePair> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut any_headers = false;

    for layer in layers {
        if let Some(url) = &layer.base_url
            && !url.trim().is_empty()
        {
            merged.base_url = Some(url.clone());
        }

        if let Some(auth) = &layer.auth
            && auth.is_configured()
        {
            merged.auth = Some(auth.clone());
        }

        if let Some(layer_headers) = &layer.headers {
            any_headers = true;
            for pair in layer_headers {
                let key = pair.key.to_lowercase();
                match index.get(&key) {
                    Some(&slot) => headers[slot] = pair.clone(),
                    None => {
                        index.insert(key, headers.len());
                        headers.push(pair.clone());
                    }
                }
            }
        }
    }

    if any_headers {
        merged.headers = Some(headers);
    }
    merged
}

/// Effective settings visible at `node_id`: every ancestor collection's
/// settings merged root-to-parent, followed by the node's own settings when
/// it is itself a collection. `None` when the node is unknown.
#[must_use]
pub fn resolve_collection_settings(
    tree: &CollectionTree,
    node_id: &str,
) -> Option<CollectionSettings> {
    let path = tree.ancestor_path(node_id)?;
    let mut layers: Vec<&CollectionSettings> =
        path.iter().filter_map(|id| tree.settings(id)).collect();
    if let Some(own) = tree.settings(node_id) {
        layers.push(own);
    }
    Some(merge_settings(layers))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use quiver_domain::{AuthConfig, AuthType, CollectionsConfig, HttpMethod, HttpRequest};

    fn settings_with_base_url(url: &str) -> CollectionSettings {
        CollectionSettings {
            base_url: Some(url.to_string()),
            ..CollectionSettings::default()
        }
    }

    #[test]
    fn test_merge_base_url_later_wins() {
        let a = settings_with_base_url("https://a");
        let b = settings_with_base_url("https://b");

        let merged = merge_settings([&a, &b]);
        assert_eq!(merged.base_url.as_deref(), Some("https://b"));
    }

    #[test]
    fn test_merge_base_url_blank_does_not_clear() {
        let a = settings_with_base_url("https://a");
        let cleared = settings_with_base_url("   ");

        let merged = merge_settings([&a, &cleared]);
        assert_eq!(merged.base_url.as_deref(), Some("https://a"));
    }

    #[test]
    fn test_merge_auth_later_configured_wins() {
        let a = CollectionSettings {
            auth: Some(AuthConfig::basic("user", "pass")),
            ..CollectionSettings::default()
        };
        let b = CollectionSettings {
            auth: Some(AuthConfig::bearer("token")),
            ..CollectionSettings::default()
        };

        let merged = merge_settings([&a, &b]);
        assert_eq!(merged.auth.unwrap().auth_type, AuthType::Bearer);
    }

    #[test]
    fn test_merge_auth_none_type_never_displaces() {
        let configured = CollectionSettings {
            auth: Some(AuthConfig::bearer("token")),
            ..CollectionSettings::default()
        };
        let weak = CollectionSettings {
            auth: Some(AuthConfig::none()),
            ..CollectionSettings::default()
        };
        let absent = CollectionSettings::default();

        let merged = merge_settings([&configured, &weak, &absent]);
        assert_eq!(merged.auth.unwrap().auth_type, AuthType::Bearer);

        // A none-typed auth is treated like an absent one: it is never
        // adopted on its own either.
        let merged = merge_settings([&weak]);
        assert!(merged.auth.is_none());
    }

    #[test]
    fn test_merge_headers_case_insensitive_replacement() {
        let a = CollectionSettings {
            headers: Some(vec![
                KeyValuePair::new("X-Trace", "1"),
                KeyValuePair::new("Accept", "application/json"),
            ]),
            ..CollectionSettings::default()
        };
        let b = CollectionSettings {
            headers: Some(vec![
                KeyValuePair::disabled("x-trace", "2"),
                KeyValuePair::new("X-Client", "quiver"),
            ]),
            ..CollectionSettings::default()
        };

        let merged = merge_settings([&a, &b]);
        let headers = merged.headers.unwrap();
        assert_eq!(headers.len(), 3);
        // Pre-existing keys keep their slot; the replacement carries both
        // the new value and the new enabled flag.
        assert_eq!(headers[0].key, "x-trace");
        assert_eq!(headers[0].value, "2");
        assert!(!headers[0].enabled);
        assert_eq!(headers[1].key, "Accept");
        assert_eq!(headers[2].key, "X-Client");
    }

    #[test]
    fn test_merge_empty_input() {
        let layers: [&CollectionSettings; 0] = [];
        let merged = merge_settings(layers);
        assert!(merged.base_url.is_none());
        assert!(merged.auth.is_none());
        assert!(merged.headers.is_none());
        assert!(merged.git_remote.is_none());
    }

    #[test]
    fn test_merge_does_not_inherit_sync_metadata() {
        let a = CollectionSettings {
            git_remote: Some("git@example.com:team/apis.git".to_string()),
            last_synced_at: Some(Utc::now()),
            ..CollectionSettings::default()
        };

        let merged = merge_settings([&a]);
        assert!(merged.git_remote.is_none());
        assert!(merged.last_synced_at.is_none());
    }

    /// Builds A > B > Leaf where A and B carry settings, then resolves at
    /// the leaf: `base_url` comes from B, header `X` from the leaf layer.
    #[test]
    fn test_resolve_collection_settings_precedence() {
        let mut tree = CollectionTree::from_config(CollectionsConfig::default());
        let now = Utc::now();
        let a = tree.create_collection("A", None, now).unwrap();
        let b = tree.create_collection("B", Some(&a), now).unwrap();
        let leaf = tree.create_collection("Leaf", Some(&b), now).unwrap();

        tree_set_settings(&mut tree, &a, settings_with_base_url("https://a"));
        tree_set_settings(
            &mut tree,
            &b,
            CollectionSettings {
                base_url: Some("https://b".to_string()),
                headers: Some(vec![KeyValuePair::new("X", "1")]),
                ..CollectionSettings::default()
            },
        );
        tree_set_settings(
            &mut tree,
            &leaf,
            CollectionSettings {
                headers: Some(vec![KeyValuePair::new("X", "2")]),
                ..CollectionSettings::default()
            },
        );

        let resolved = resolve_collection_settings(&tree, &leaf).unwrap();
        assert_eq!(resolved.base_url.as_deref(), Some("https://b"));
        let headers = resolved.headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].value, "2");
    }

    #[test]
    fn test_resolve_for_request_excludes_nothing_above() {
        let mut tree = CollectionTree::from_config(CollectionsConfig::default());
        let now = Utc::now();
        let api = tree.create_collection("API", None, now).unwrap();
        tree_set_settings(&mut tree, &api, settings_with_base_url("https://api.test"));
        let request = tree
            .save_request(
                "Ping",
                HttpRequest::new(HttpMethod::Get, "/ping"),
                Some(&api),
                None,
                now,
            )
            .unwrap();

        let resolved = resolve_collection_settings(&tree, &request).unwrap();
        assert_eq!(resolved.base_url.as_deref(), Some("https://api.test"));
    }

    #[test]
    fn test_resolve_unknown_node() {
        let tree = CollectionTree::from_config(CollectionsConfig::default());
        assert!(resolve_collection_settings(&tree, "missing").is_none());
    }

    #[test]
    fn test_parent_projections() {
        let mut tree = CollectionTree::from_config(CollectionsConfig::default());
        let now = Utc::now();
        let a = tree.create_collection("A", None, now).unwrap();
        let b = tree.create_collection("B", Some(&a), now).unwrap();
        let c = tree.create_collection("C", Some(&b), now).unwrap();

        assert_eq!(find_parent_collection_id(&tree, &c), Some(b.clone()));
        assert_eq!(find_parent_collection_id(&tree, &a), None);
        assert_eq!(
            find_collection_path(&tree, &c).unwrap(),
            vec![a.clone(), b.clone()]
        );
    }

    fn tree_set_settings(tree: &mut CollectionTree, id: &str, settings: CollectionSettings) {
        tree.set_settings(id, Some(settings), Utc::now()).unwrap();
    }
}
