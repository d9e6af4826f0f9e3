//! Drag-and-drop relocation.
//!
//! A move detaches the source subtree and reinserts it relative to a target:
//!
//! - `Before`: into the target's sequence, just before the target
//! - `After`: into the target's sequence, just after the target
//! - `Into`: as the target's last child
//!
//! The target must be neither the source nor anywhere inside it. That check
//! happens before anything is detached, so a rejected move leaves the forest
//! untouched.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::path;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DropKind {
    Before,
    After,
    Into,
}

impl fmt::Display for DropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropKind::Before => write!(f, "before"),
            DropKind::After => write!(f, "after"),
            DropKind::Into => write!(f, "into"),
        }
    }
}

pub fn run(
    forest: &mut Forest,
    source_id: &str,
    target_id: &str,
    kind: DropKind,
) -> Result<CmdResult> {
    let source_path = path::resolve(forest, source_id)?;
    // Resolve the target up front so an unknown target fails before any change.
    path::resolve(forest, target_id)?;

    if source_id == target_id {
        return Err(ArborError::InvalidMove(
            "Cannot move a folder relative to itself".to_string(),
        ));
    }
    let source = path::node_at(forest, &source_path)
        .ok_or_else(|| ArborError::NotFound(source_id.to_string()))?;
    if source.contains(target_id) {
        return Err(ArborError::InvalidMove(format!(
            "Cannot move \"{}\" into its own subfolder",
            source.name
        )));
    }

    let before = forest.clone();
    let node = path::take(forest, &source_path)
        .ok_or_else(|| ArborError::NotFound(source_id.to_string()))?;
    let name = node.name.clone();
    let id = node.id.clone();

    // Indexes may have shifted after detaching the source.
    let target_path = match path::resolve(forest, target_id) {
        Ok(p) => p,
        Err(e) => {
            *forest = before;
            return Err(e);
        }
    };

    let target_name = match kind {
        DropKind::Into => {
            let target = path::node_at_mut(forest, &target_path)
                .ok_or_else(|| ArborError::NotFound(target_id.to_string()))?;
            target.children.push(node);
            target.name.clone()
        }
        DropKind::Before | DropKind::After => {
            let seq = path::sequence_mut(forest, target_path.parent())
                .ok_or_else(|| ArborError::NotFound(target_id.to_string()))?;
            let target_name = seq[target_path.index()].name.clone();
            let at = match kind {
                DropKind::Before => target_path.index(),
                _ => target_path.index() + 1,
            };
            seq.insert(at, node);
            target_name
        }
    };

    if *forest == before {
        return Ok(CmdResult::unchanged(CmdMessage::info(format!(
            "\"{}\" is already there",
            name
        ))));
    }

    Ok(CmdResult::changed()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Moved \"{}\" {} \"{}\"",
            name, kind, target_name
        ))))
}
