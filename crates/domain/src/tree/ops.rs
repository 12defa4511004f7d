//! Tree mutations.
//!
//! Every operation validates its preconditions (existence, node kind,
//! sibling-name uniqueness, acyclicity) before touching any structure.

use chrono::{DateTime, Utc};

use super::arena::{ArenaNode, CollectionTree, NodePayload};
use crate::collection::CollectionSettings;
use crate::error::{TreeError, TreeResult};
use crate::id::generate_id;
use crate::request::HttpRequest;

impl CollectionTree {
    /// Creates an empty collection under `parent_id` (or at the root) and
    /// returns its id.
    ///
    /// # Errors
    ///
    /// `NotFound` when `parent_id` does not exist, `InvalidStructure` when
    /// it names a request, `DuplicateName` on a sibling name collision.
    pub fn create_collection(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> TreeResult<String> {
        if let Some(parent) = parent_id {
            self.ensure_collection(parent)?;
        }
        self.ensure_unique_name(parent_id, name, None)?;

        let id = generate_id();
        self.nodes.insert(
            id.clone(),
            ArenaNode {
                id: id.clone(),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
                parent: parent_id.map(str::to_string),
                children: Vec::new(),
                payload: NodePayload::Collection { settings: None },
            },
        );
        self.attach(parent_id, id.clone());
        Ok(id)
    }

    /// Creates or updates a request node and returns its id.
    ///
    /// With `existing_id`, the node's name, request, and timestamp are
    /// updated in place; when `parent_id` differs from its current parent
    /// the node is detached and re-attached in the same pass. Without
    /// `existing_id` a new node is created under `parent_id` (or the root).
    /// Sibling-name uniqueness is validated against the destination parent,
    /// excluding the node's own prior slot.
    ///
    /// # Errors
    ///
    /// `NotFound` when `parent_id` or `existing_id` does not exist,
    /// `InvalidStructure` when `parent_id` names a request or `existing_id`
    /// names a collection, `DuplicateName` on a destination name collision.
    pub fn save_request(
        &mut self,
        name: &str,
        request: HttpRequest,
        parent_id: Option<&str>,
        existing_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> TreeResult<String> {
        if let Some(parent) = parent_id {
            self.ensure_collection(parent)?;
        }

        let Some(id) = existing_id else {
            self.ensure_unique_name(parent_id, name, None)?;
            let id = generate_id();
            self.nodes.insert(
                id.clone(),
                ArenaNode {
                    id: id.clone(),
                    name: name.to_string(),
                    created_at: now,
                    updated_at: now,
                    parent: parent_id.map(str::to_string),
                    children: Vec::new(),
                    payload: NodePayload::Request { request },
                },
            );
            self.attach(parent_id, id.clone());
            return Ok(id);
        };

        let existing = self
            .nodes
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        if matches!(existing.payload, NodePayload::Collection { .. }) {
            return Err(TreeError::InvalidStructure(format!(
                "node {id} is a collection, not a request"
            )));
        }
        let current_parent = existing.parent.clone();

        self.ensure_unique_name(parent_id, name, Some(id))?;

        if current_parent.as_deref() != parent_id {
            self.detach(current_parent.as_deref(), id);
            self.attach(parent_id, id.to_string());
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.name = name.to_string();
            node.parent = parent_id.map(str::to_string);
            node.payload = NodePayload::Request { request };
            node.updated_at = now;
        }
        Ok(id.to_string())
    }

    /// Replaces a collection's settings.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist, `InvalidStructure` when it
    /// names a request.
    pub fn set_settings(
        &mut self,
        id: &str,
        settings: Option<CollectionSettings>,
        now: DateTime<Utc>,
    ) -> TreeResult<()> {
        self.ensure_collection(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.payload = NodePayload::Collection { settings };
            node.updated_at = now;
        }
        Ok(())
    }

    /// Removes a node and, for collections, its entire subtree.
    /// Returns whether a node was found.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let Some(parent) = self.nodes.get(id).map(|n| n.parent.clone()) else {
            return false;
        };
        self.detach(parent.as_deref(), id);

        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
        }
        true
    }

    /// Renames a node in place.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist, `DuplicateName` when a
    /// sibling (other than the node itself) already uses the name.
    pub fn rename_node(&mut self, id: &str, new_name: &str, now: DateTime<Utc>) -> TreeResult<()> {
        let parent = self
            .nodes
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?
            .parent
            .clone();
        self.ensure_unique_name(parent.as_deref(), new_name, Some(id))?;

        if let Some(node) = self.nodes.get_mut(id) {
            node.name = new_name.to_string();
            node.updated_at = now;
        }
        Ok(())
    }

    /// Moves a node under `new_parent_id` (or to the root).
    ///
    /// Bumps `updated_at` on the moved node and on both touched parent
    /// collections.
    ///
    /// # Errors
    ///
    /// `NotFound` when the node or destination does not exist,
    /// `InvalidStructure` when the destination is a request, `CyclicMove`
    /// when the destination is the node itself or one of its descendants,
    /// `DuplicateName` on a destination name collision.
    pub fn move_node(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> TreeResult<()> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        let old_parent = node.parent.clone();
        let name = node.name.clone();

        if let Some(dest) = new_parent_id {
            self.ensure_collection(dest)?;
            // The destination must not be the node or live inside its
            // subtree; walking the destination's parent links covers both.
            let mut cursor = Some(dest);
            while let Some(current) = cursor {
                if current == id {
                    return Err(TreeError::CyclicMove(id.to_string()));
                }
                cursor = self.nodes.get(current).and_then(|n| n.parent.as_deref());
            }
        }

        self.ensure_unique_name(new_parent_id, &name, Some(id))?;

        self.detach(old_parent.as_deref(), id);
        self.attach(new_parent_id, id.to_string());
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = new_parent_id.map(str::to_string);
            node.updated_at = now;
        }
        self.touch(old_parent.as_deref(), now);
        self.touch(new_parent_id, now);
        Ok(())
    }

    fn sibling_ids(&self, parent: Option<&str>) -> &[String] {
        match parent {
            Some(id) => self.nodes.get(id).map_or(&[][..], |n| &n.children),
            None => &self.roots,
        }
    }

    fn ensure_unique_name(
        &self,
        parent: Option<&str>,
        name: &str,
        exclude: Option<&str>,
    ) -> TreeResult<()> {
        let clash = self.sibling_ids(parent).iter().any(|sibling| {
            exclude != Some(sibling.as_str())
                && self.nodes.get(sibling).is_some_and(|n| n.name == name)
        });
        if clash {
            Err(TreeError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }

    fn ensure_collection(&self, id: &str) -> TreeResult<()> {
        let node = self
            .nodes
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.to_string()))?;
        match node.payload {
            NodePayload::Collection { .. } => Ok(()),
            NodePayload::Request { .. } => Err(TreeError::InvalidStructure(format!(
                "node {id} is a request, not a collection"
            ))),
        }
    }

    fn attach(&mut self, parent: Option<&str>, id: String) {
        match parent {
            Some(parent_id) => {
                if let Some(node) = self.nodes.get_mut(parent_id) {
                    node.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
    }

    fn detach(&mut self, parent: Option<&str>, id: &str) {
        match parent {
            Some(parent_id) => {
                if let Some(node) = self.nodes.get_mut(parent_id) {
                    node.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
    }

    fn touch(&mut self, id: Option<&str>, now: DateTime<Utc>) {
        if let Some(node) = id.and_then(|id| self.nodes.get_mut(id)) {
            node.updated_at = now;
        }
    }
}
