//! # Filtering and Highlighting
//!
//! A filter is a case-insensitive substring. Visibility follows the ancestor
//! rule: a node is shown when its own name matches **or** any descendant's
//! does, so a match is never orphaned from the folders that contain it.
//!
//! ```text
//! filter "bet"
//! Alpha        shown (ancestor of a match)
//! └── Beta     shown (match)
//! Omega        hidden
//! ```
//!
//! [`project`] recomputes the whole view on every call; there is no index.
//! Highlighting splits a name into [`MatchSegment`]s and never touches the
//! nodes themselves.

use crate::model::{Forest, Node};
use crate::path::NodePath;
use serde::Serialize;

/// A piece of a node name, either plain text or a filter match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// A node as the filtered view shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleNode {
    pub id: String,
    pub name: String,
    #[serde(skip)]
    pub path: NodePath,
    pub segments: Vec<MatchSegment>,
    pub is_match: bool,
    pub collapsed: bool,
    pub reviewed: bool,
    /// Direct children in the underlying forest, visible or not.
    pub child_count: usize,
    pub children: Vec<VisibleNode>,
}

impl VisibleNode {
    pub fn depth(&self) -> usize {
        self.path.depth() - 1
    }
}

/// Byte ranges of non-overlapping case-insensitive occurrences of `filter`.
///
/// Matching runs on the lowercased name. Lowercasing may change byte lengths,
/// and `İ` even becomes two chars, so every lowered byte remembers the
/// original char it came from and ranges are mapped back onto `name`.
fn match_ranges(name: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut lowered = String::with_capacity(name.len());
    let mut origin = Vec::with_capacity(name.len());
    for (start, c) in name.char_indices() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.extend(std::iter::repeat(start).take(lc.len_utf8()));
        }
    }
    let char_end = |start: usize| {
        name[start..]
            .chars()
            .next()
            .map_or(start, |c| start + c.len_utf8())
    };

    let mut ranges = Vec::new();
    let mut last_end = 0;
    for (at, hit) in lowered.match_indices(needle.as_str()) {
        let start = origin[at];
        let end = char_end(origin[at + hit.len() - 1]);
        if start < last_end {
            continue;
        }
        ranges.push((start, end));
        last_end = end;
    }
    ranges
}

pub fn name_matches(name: &str, filter: &str) -> bool {
    filter.is_empty() || !match_ranges(name, filter).is_empty()
}

/// Ancestor-inclusion visibility.
pub fn is_visible(node: &Node, filter: &str) -> bool {
    name_matches(&node.name, filter) || node.children.iter().any(|c| is_visible(c, filter))
}

/// Splits `name` around the filter matches, preserving the original casing.
pub fn highlight(name: &str, filter: &str) -> Vec<MatchSegment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for (start, end) in match_ranges(name, filter) {
        if start > last {
            segments.push(MatchSegment::Plain(name[last..start].to_string()));
        }
        segments.push(MatchSegment::Match(name[start..end].to_string()));
        last = end;
    }
    if last < name.len() {
        segments.push(MatchSegment::Plain(name[last..].to_string()));
    }
    segments
}

/// Projects the forest through `filter`. An empty filter shows everything.
pub fn project(forest: &Forest, filter: &str) -> Vec<VisibleNode> {
    project_seq(&forest.roots, filter, &[])
}

fn project_seq(seq: &[Node], filter: &str, parent: &[usize]) -> Vec<VisibleNode> {
    seq.iter()
        .enumerate()
        .filter(|(_, n)| is_visible(n, filter))
        .map(|(i, n)| {
            let mut steps = parent.to_vec();
            steps.push(i);
            let children = project_seq(&n.children, filter, &steps);
            VisibleNode {
                id: n.id.clone(),
                name: n.name.clone(),
                path: NodePath::new(steps),
                segments: highlight(&n.name, filter),
                is_match: !filter.is_empty() && name_matches(&n.name, filter),
                collapsed: n.collapsed,
                reviewed: n.reviewed,
                child_count: n.children.len(),
                children,
            }
        })
        .collect()
}

/// Total nodes in a projection.
pub fn count_visible(nodes: &[VisibleNode]) -> usize {
    nodes.iter().map(|n| 1 + count_visible(&n.children)).sum()
}
