use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::path;

/// Sets the node's name to the trimmed `input`.
///
/// Names that are empty after trimming are rejected and leave the node as it
/// was: an unnamed folder cannot be exported as a path segment.
pub fn run(forest: &mut Forest, id: &str, input: &str) -> Result<CmdResult> {
    let new_name = input.trim();
    if new_name.is_empty() {
        return Err(ArborError::Validation(
            "Folder name cannot be empty".to_string(),
        ));
    }

    let node = path::find_mut(forest, id)?;
    if node.name == new_name {
        return Ok(CmdResult::unchanged(CmdMessage::info(format!(
            "\"{}\" already has that name",
            new_name
        ))));
    }

    let old = std::mem::replace(&mut node.name, new_name.to_string());
    Ok(CmdResult::changed()
        .with_affected(node.id.clone())
        .with_message(CmdMessage::success(format!(
            "Renamed \"{}\" to \"{}\"",
            old, new_name
        ))))
}
