use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Forest, Node};
use crate::path;

/// Appends a new node named `name` to `parent`'s children, or to the forest
/// roots when `parent` is `None`.
pub fn run(forest: &mut Forest, parent: Option<&str>, name: &str) -> Result<CmdResult> {
    let node = Node::new(name.trim());
    let id = node.id.clone();

    match parent {
        Some(parent_id) => {
            let target = path::find_mut(forest, parent_id)?;
            let message = format!("Added \"{}\" inside \"{}\"", node.name, target.name);
            target.children.push(node);
            Ok(CmdResult::changed()
                .with_affected(id)
                .with_message(CmdMessage::success(message)))
        }
        None => {
            let message = format!("Added root \"{}\"", node.name);
            forest.roots.push(node);
            Ok(CmdResult::changed()
                .with_affected(id)
                .with_message(CmdMessage::success(message)))
        }
    }
}
