//! # Node Addressing
//!
//! Nodes are addressed by id, but mutations work on *positions*. A [`NodePath`]
//! is the chain of child indexes from the forest down to a node:
//!
//! ```text
//! Forest                     path
//! ├── Docs                   [0]
//! │   ├── 2023               [0, 0]
//! │   └── 2024               [0, 1]
//! └── Media                  [1]
//! ```
//!
//! Step `k` of a path is an index into the *containing sequence* addressed by
//! the first `k` steps: the forest roots for `k = 0`, otherwise the children of
//! that ancestor. Paths are recomputed from ids on every operation, never
//! cached, because a snapshot restore replaces every node.
//!
//! ## Tie-break
//!
//! Ids are unique by construction. Should a document carry duplicates anyway,
//! [`resolve`] returns the first match of a pre-order walk.

use crate::error::{ArborError, Result};
use crate::model::{Forest, Node};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(steps: Vec<usize>) -> Self {
        debug_assert!(!steps.is_empty(), "a node path has at least one step");
        Self(steps)
    }

    pub fn steps(&self) -> &[usize] {
        &self.0
    }

    /// Steps of the containing sequence (empty for roots).
    pub fn parent(&self) -> &[usize] {
        &self.0[..self.0.len() - 1]
    }

    /// Index within the containing sequence.
    pub fn index(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// 1 for roots, 2 for their children, and so on.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| (i + 1).to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Resolves an id to its path. Fails with [`ArborError::NotFound`].
pub fn resolve(forest: &Forest, id: &str) -> Result<NodePath> {
    let mut trail = Vec::new();
    if find_in(&forest.roots, id, &mut trail) {
        Ok(NodePath(trail))
    } else {
        Err(ArborError::NotFound(id.to_string()))
    }
}

fn find_in(seq: &[Node], id: &str, trail: &mut Vec<usize>) -> bool {
    for (i, node) in seq.iter().enumerate() {
        trail.push(i);
        if node.id == id || find_in(&node.children, id, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// The sequence addressed by `steps`: forest roots for `[]`, else a node's children.
pub fn sequence<'a>(forest: &'a Forest, steps: &[usize]) -> Option<&'a Vec<Node>> {
    let mut seq = &forest.roots;
    for &i in steps {
        seq = &seq.get(i)?.children;
    }
    Some(seq)
}

pub fn sequence_mut<'a>(forest: &'a mut Forest, steps: &[usize]) -> Option<&'a mut Vec<Node>> {
    let mut seq = &mut forest.roots;
    for &i in steps {
        seq = &mut seq.get_mut(i)?.children;
    }
    Some(seq)
}

pub fn node_at<'a>(forest: &'a Forest, path: &NodePath) -> Option<&'a Node> {
    sequence(forest, path.parent())?.get(path.index())
}

pub fn node_at_mut<'a>(forest: &'a mut Forest, path: &NodePath) -> Option<&'a mut Node> {
    sequence_mut(forest, path.parent())?.get_mut(path.index())
}

/// Looks up a node by id.
pub fn find<'a>(forest: &'a Forest, id: &str) -> Result<&'a Node> {
    let path = resolve(forest, id)?;
    node_at(forest, &path).ok_or_else(|| ArborError::NotFound(id.to_string()))
}

pub fn find_mut<'a>(forest: &'a mut Forest, id: &str) -> Result<&'a mut Node> {
    let path = resolve(forest, id)?;
    node_at_mut(forest, &path).ok_or_else(|| ArborError::NotFound(id.to_string()))
}

/// Detaches the node at `path` (with its subtree).
pub fn take(forest: &mut Forest, path: &NodePath) -> Option<Node> {
    let seq = sequence_mut(forest, path.parent())?;
    if path.index() < seq.len() {
        Some(seq.remove(path.index()))
    } else {
        None
    }
}

/// Nodes whose name contains `fragment` (case-insensitive), in pre-order.
pub fn find_by_name<'a>(forest: &'a Forest, fragment: &str) -> Vec<&'a Node> {
    let needle = fragment.to_lowercase();
    forest
        .iter()
        .filter(|n| n.name.to_lowercase().contains(&needle))
        .collect()
}
