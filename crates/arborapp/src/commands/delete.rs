use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::path;

/// What a delete would remove. Used by UIs to ask for confirmation before
/// calling [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePreview {
    pub id: String,
    pub name: String,
    /// Direct children.
    pub child_count: usize,
    /// Every node below the target.
    pub descendant_count: usize,
}

impl DeletePreview {
    pub fn is_leaf(&self) -> bool {
        self.descendant_count == 0
    }

    /// The question to put to the user. Leaves get the short form.
    pub fn confirmation_message(&self) -> String {
        if self.is_leaf() {
            format!("Delete folder \"{}\"?", self.name)
        } else {
            format!(
                "Folder \"{}\" has {} direct subfolder(s) and {} descendant(s) in total. Delete?",
                self.name, self.child_count, self.descendant_count
            )
        }
    }
}

pub fn preview(forest: &Forest, id: &str) -> Result<DeletePreview> {
    let node = path::find(forest, id)?;
    Ok(DeletePreview {
        id: node.id.clone(),
        name: node.name.clone(),
        child_count: node.children.len(),
        descendant_count: node.count_descendants(),
    })
}

/// Removes the node and its whole subtree.
///
/// **Important**: this does NOT ask for confirmation. Call [`preview`] first.
pub fn run(forest: &mut Forest, id: &str) -> Result<CmdResult> {
    let target = path::resolve(forest, id)?;
    let removed =
        path::take(forest, &target).ok_or_else(|| ArborError::NotFound(id.to_string()))?;

    let total = 1 + removed.count_descendants();
    let message = if total == 1 {
        format!("Deleted \"{}\"", removed.name)
    } else {
        format!("Deleted \"{}\" and {} subfolder(s)", removed.name, total - 1)
    };
    Ok(CmdResult::changed()
        .with_affected(removed.id)
        .with_message(CmdMessage::success(message)))
}
