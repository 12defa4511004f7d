//! The node table and its conversions to and from the persisted shape.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::collection::{Collection, CollectionNode, CollectionSettings, RequestNode};
use crate::config::CollectionsConfig;
use crate::request::HttpRequest;

/// Payload distinguishing the two node kinds.
#[derive(Debug, Clone)]
pub(crate) enum NodePayload {
    /// A collection with optional shared settings.
    Collection {
        /// Shared settings, when present.
        settings: Option<CollectionSettings>,
    },
    /// A saved request.
    Request {
        /// The request definition.
        request: HttpRequest,
    },
}

/// One entry of the node table.
#[derive(Debug, Clone)]
pub(crate) struct ArenaNode {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
    /// Owning collection id; `None` for root-level nodes.
    pub(crate) parent: Option<String>,
    /// Ordered child ids; always empty for requests.
    pub(crate) children: Vec<String>,
    pub(crate) payload: NodePayload,
}

/// The collection forest as a flat, id-keyed node table.
///
/// Built from a [`CollectionsConfig`] snapshot, mutated in memory, and
/// lowered back for the whole-document write. Input documents are assumed
/// valid by construction (unique ids, acyclic); mutations preserve both
/// invariants and validate before committing, so no partially-applied
/// mutation is ever observable.
#[derive(Debug, Clone)]
pub struct CollectionTree {
    pub(crate) nodes: HashMap<String, ArenaNode>,
    pub(crate) roots: Vec<String>,
    pub(crate) version: String,
}

impl CollectionTree {
    /// Builds the node table from a persisted document.
    #[must_use]
    pub fn from_config(config: CollectionsConfig) -> Self {
        let CollectionsConfig {
            version,
            collections,
        } = config;

        let mut tree = Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            version,
        };

        let mut pending: Vec<(CollectionNode, Option<String>)> = Vec::new();
        for node in collections {
            tree.roots.push(node.id().to_string());
            pending.push((node, None));
        }

        while let Some((node, parent)) = pending.pop() {
            match node {
                CollectionNode::Collection(collection) => {
                    let Collection {
                        id,
                        name,
                        created_at,
                        updated_at,
                        children,
                        settings,
                    } = collection;

                    let child_ids = children.iter().map(|c| c.id().to_string()).collect();
                    for child in children {
                        pending.push((child, Some(id.clone())));
                    }

                    tree.nodes.insert(
                        id.clone(),
                        ArenaNode {
                            id,
                            name,
                            created_at,
                            updated_at,
                            parent,
                            children: child_ids,
                            payload: NodePayload::Collection { settings },
                        },
                    );
                }
                CollectionNode::Request(request_node) => {
                    let RequestNode {
                        id,
                        name,
                        created_at,
                        updated_at,
                        request,
                    } = request_node;

                    tree.nodes.insert(
                        id.clone(),
                        ArenaNode {
                            id,
                            name,
                            created_at,
                            updated_at,
                            parent,
                            children: Vec::new(),
                            payload: NodePayload::Request { request },
                        },
                    );
                }
            }
        }

        tree
    }

    /// Lowers the node table back into the persisted nested shape,
    /// preserving child order.
    #[must_use]
    pub fn into_config(mut self) -> CollectionsConfig {
        let roots = std::mem::take(&mut self.roots);
        let collections = roots
            .iter()
            .filter_map(|id| Self::lower(&mut self.nodes, id))
            .collect();

        CollectionsConfig {
            version: self.version,
            collections,
        }
    }

    fn lower(nodes: &mut HashMap<String, ArenaNode>, id: &str) -> Option<CollectionNode> {
        let ArenaNode {
            id,
            name,
            created_at,
            updated_at,
            parent: _,
            children,
            payload,
        } = nodes.remove(id)?;

        Some(match payload {
            NodePayload::Collection { settings } => {
                let children = children
                    .into_iter()
                    .filter_map(|child| Self::lower(nodes, &child))
                    .collect();
                CollectionNode::Collection(Collection {
                    id,
                    name,
                    created_at,
                    updated_at,
                    children,
                    settings,
                })
            }
            NodePayload::Request { request } => CollectionNode::Request(RequestNode {
                id,
                name,
                created_at,
                updated_at,
                request,
            }),
        })
    }

    /// Number of nodes in the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true when the forest has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true when a node with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns true when the id names a collection node.
    #[must_use]
    pub fn is_collection(&self, id: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| matches!(n.payload, NodePayload::Collection { .. }))
    }

    /// Name of a node.
    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(|n| n.name.as_str())
    }

    /// Last-modification timestamp of a node.
    #[must_use]
    pub fn updated_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.nodes.get(id).map(|n| n.updated_at)
    }

    /// Id of a node's owning collection; `None` for unknown ids and for
    /// root-level nodes.
    #[must_use]
    pub fn parent_id(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.parent.as_deref())
    }

    /// Root-level node ids, in display order.
    #[must_use]
    pub fn root_ids(&self) -> &[String] {
        &self.roots
    }

    /// Ordered child ids of a collection.
    #[must_use]
    pub fn child_ids(&self, id: &str) -> Option<&[String]> {
        self.nodes.get(id).map(|n| n.children.as_slice())
    }

    /// Settings of a collection node, when it has any.
    #[must_use]
    pub fn settings(&self, id: &str) -> Option<&CollectionSettings> {
        match &self.nodes.get(id)?.payload {
            NodePayload::Collection { settings } => settings.as_ref(),
            NodePayload::Request { .. } => None,
        }
    }

    /// Request definition of a request node.
    #[must_use]
    pub fn request(&self, id: &str) -> Option<&HttpRequest> {
        match &self.nodes.get(id)?.payload {
            NodePayload::Request { request } => Some(request),
            NodePayload::Collection { .. } => None,
        }
    }

    /// Ordered ancestor collection ids from the root down to the immediate
    /// parent, excluding the node itself. Empty for root-level nodes,
    /// `None` for unknown ids.
    #[must_use]
    pub fn ancestor_path(&self, id: &str) -> Option<Vec<String>> {
        let node = self.nodes.get(id)?;
        let mut path = Vec::new();
        let mut cursor = node.parent.as_deref();
        while let Some(current) = cursor {
            path.push(current.to_string());
            cursor = self.nodes.get(current).and_then(|n| n.parent.as_deref());
        }
        path.reverse();
        Some(path)
    }
}
