use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Forest;
use crate::path;

/// Flips the node's `collapsed` flag.
pub fn toggle_collapsed(forest: &mut Forest, id: &str) -> Result<CmdResult> {
    let node = path::find_mut(forest, id)?;
    node.collapsed = !node.collapsed;
    let verb = if node.collapsed { "Collapsed" } else { "Expanded" };
    Ok(CmdResult::changed()
        .with_affected(node.id.clone())
        .with_message(CmdMessage::info(format!("{} \"{}\"", verb, node.name))))
}

/// Sets the `reviewed` flag, or flips it when `value` is `None`.
pub fn set_reviewed(forest: &mut Forest, id: &str, value: Option<bool>) -> Result<CmdResult> {
    let node = path::find_mut(forest, id)?;
    let next = value.unwrap_or(!node.reviewed);
    if node.reviewed == next {
        return Ok(CmdResult::unchanged(CmdMessage::info(format!(
            "\"{}\" is already {}",
            node.name,
            if next { "reviewed" } else { "not reviewed" }
        ))));
    }
    node.reviewed = next;
    let verb = if next {
        "Marked as reviewed"
    } else {
        "Cleared review mark on"
    };
    Ok(CmdResult::changed()
        .with_affected(node.id.clone())
        .with_message(CmdMessage::success(format!("{} \"{}\"", verb, node.name))))
}

/// Sets `collapsed` on every root. Nested nodes keep their own state.
pub fn collapse_all(forest: &mut Forest, collapsed: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for root in forest.roots.iter_mut().filter(|r| r.collapsed != collapsed) {
        root.collapsed = collapsed;
        result.affected_ids.push(root.id.clone());
    }
    result.changed = !result.affected_ids.is_empty();
    let verb = if collapsed { "Collapsed" } else { "Expanded" };
    result.add_message(CmdMessage::info(format!(
        "{} {} top-level folder(s)",
        verb,
        result.affected_ids.len()
    )));
    Ok(result)
}
