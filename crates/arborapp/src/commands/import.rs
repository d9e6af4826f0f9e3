use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::store::parse_document;

/// Parses and validates a user-supplied document.
///
/// The top level must be a JSON array of nodes. Missing fields are backfilled
/// and duplicate ids re-assigned, so the result satisfies every forest
/// invariant.
pub fn parse(text: &str) -> Result<Forest> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ArborError::ImportParse(e.to_string()))?;
    if !value.is_array() {
        return Err(ArborError::ImportParse(
            "expected a JSON array of folders".to_string(),
        ));
    }
    let mut forest = parse_document(text).map_err(|e| ArborError::ImportParse(e.to_string()))?;
    forest.ensure_structure();
    Ok(forest)
}

/// Replaces `forest` with the imported document. On a parse failure the
/// current forest is left untouched.
pub fn run(forest: &mut Forest, text: &str) -> Result<CmdResult> {
    let imported = parse(text)?;
    let count = imported.node_count();
    *forest = imported;
    Ok(CmdResult::changed().with_message(CmdMessage::success(format!(
        "Imported {} folder(s)",
        count
    ))))
}
