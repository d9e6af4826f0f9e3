//! # Domain Model: Nodes and the Forest
//!
//! A [`Node`] is one folder. A [`Forest`] is the ordered list of root nodes and
//! is the unit that gets persisted, snapshotted, exported and imported.
//!
//! ## Wire Format
//!
//! The forest serializes as a bare JSON array; each node as
//!
//! ```text
//! {"id": "...", "name": "...", "children": [...], "collapsed": false, "reviewed": false}
//! ```
//!
//! Documents written by older clients may omit fields or carry `null`s. Reading
//! is lenient (missing or null fields take their defaults) and
//! [`Forest::ensure_structure`] then backfills ids, so every node that reaches
//! the editor has a unique, non-empty id.
//!
//! ## Ordering
//!
//! `children` order is semantic: it is the sibling order shown to the user and
//! the line order of the exported scripts. Only moves reorder nodes.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Name given to nodes created without one, and to stored nodes missing a name.
pub const DEFAULT_NODE_NAME: &str = "New folder";

/// Generates a fresh opaque node id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_node_name() -> String {
    DEFAULT_NODE_NAME.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_node_name))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default = "default_node_name", deserialize_with = "nullable_name")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Node>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collapsed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviewed: bool,
}

impl Node {
    /// A fresh leaf: new id, both flags off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            children: Vec::new(),
            collapsed: false,
            reviewed: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes below this one (children, grandchildren, ...).
    pub fn count_descendants(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.count_descendants())
            .sum()
    }

    /// True if `id` is this node or any node of its subtree.
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|c| c.contains(id))
    }
}

/// The whole editable structure: an ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    pub roots: Vec<Node>,
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes in the whole forest.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|n| 1 + n.count_descendants()).sum()
    }

    /// Compact structural serialization used for undo/redo snapshots.
    pub fn to_snapshot(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_snapshot(snapshot: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(snapshot)?)
    }

    /// Pretty JSON, the form stored documents and raw exports take.
    pub fn to_pretty_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Backfills missing ids and re-ids later duplicates (first in pre-order
    /// keeps its id). Returns how many nodes received a new id.
    pub fn ensure_structure(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut assigned = 0;
        for root in &mut self.roots {
            ensure_node(root, &mut seen, &mut assigned);
        }
        assigned
    }

    /// Pre-order iterator over every node.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots.iter().rev().collect(),
        }
    }
}

fn ensure_node(node: &mut Node, seen: &mut HashSet<String>, assigned: &mut usize) {
    if node.id.is_empty() || seen.contains(&node.id) {
        node.id = new_id();
        *assigned += 1;
    }
    seen.insert(node.id.clone());
    for child in &mut node.children {
        ensure_node(child, seen, assigned);
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
