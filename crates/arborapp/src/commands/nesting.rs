use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::path;

/// Makes the node the last child of its previous sibling.
/// A first child (or first root) has nowhere to go and is left alone.
pub fn indent(forest: &mut Forest, id: &str) -> Result<CmdResult> {
    let node_path = path::resolve(forest, id)?;
    let index = node_path.index();
    if index == 0 {
        return Ok(CmdResult::unchanged(CmdMessage::info(
            "Already the first folder at this level; nothing to indent under",
        )));
    }

    let seq = path::sequence_mut(forest, node_path.parent())
        .ok_or_else(|| ArborError::NotFound(id.to_string()))?;
    let node = seq.remove(index);
    let name = node.name.clone();
    let new_parent = &mut seq[index - 1];
    new_parent.children.push(node);

    Ok(CmdResult::changed()
        .with_affected(id)
        .with_message(CmdMessage::success(format!(
            "Indented \"{}\" under \"{}\"",
            name, new_parent.name
        ))))
}

/// Moves the node to just after its former parent. Roots stay where they are.
pub fn outdent(forest: &mut Forest, id: &str) -> Result<CmdResult> {
    let node_path = path::resolve(forest, id)?;
    if node_path.is_root() {
        return Ok(CmdResult::unchanged(CmdMessage::info(
            "Already at the top level",
        )));
    }

    let parent_steps = node_path.parent().to_vec();
    let (parent_index, grand_steps) = parent_steps
        .split_last()
        .ok_or_else(|| ArborError::NotFound(id.to_string()))?;

    let node =
        path::take(forest, &node_path).ok_or_else(|| ArborError::NotFound(id.to_string()))?;
    let name = node.name.clone();
    let grand = path::sequence_mut(forest, grand_steps)
        .ok_or_else(|| ArborError::NotFound(id.to_string()))?;
    grand.insert(parent_index + 1, node);

    Ok(CmdResult::changed()
        .with_affected(id)
        .with_message(CmdMessage::success(format!("Outdented \"{}\"", name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ids, sample_forest};

    #[test]
    fn indent_first_child_is_noop() {
        let mut forest = sample_forest();
        let res = indent(&mut forest, "y23").unwrap();
        assert!(!res.changed);
        assert_eq!(forest, sample_forest());
    }

    #[test]
    fn indent_first_root_is_noop() {
        let mut forest = sample_forest();
        assert!(!indent(&mut forest, "docs").unwrap().changed);
    }

    #[test]
    fn indent_appends_to_previous_sibling() {
        let mut forest = sample_forest();
        let res = indent(&mut forest, "drafts").unwrap();
        assert!(res.changed);
        let docs = &forest.roots[0];
        assert_eq!(ids(&docs.children), vec!["y23", "y24"]);
        assert_eq!(ids(&docs.children[1].children), vec!["q1", "drafts"]);
    }

    #[test]
    fn indent_root_under_previous_root() {
        let mut forest = sample_forest();
        indent(&mut forest, "media").unwrap();
        assert_eq!(ids(&forest.roots), vec!["docs"]);
        assert_eq!(
            ids(&forest.roots[0].children),
            vec!["y23", "y24", "drafts", "media"]
        );
    }

    #[test]
    fn outdent_root_is_noop() {
        let mut forest = sample_forest();
        let res = outdent(&mut forest, "media").unwrap();
        assert!(!res.changed);
        assert_eq!(forest, sample_forest());
    }

    #[test]
    fn outdent_lands_right_after_former_parent() {
        let mut forest = sample_forest();
        outdent(&mut forest, "q1").unwrap();
        assert_eq!(ids(&forest.roots[0].children), vec!["y23", "y24", "q1", "drafts"]);
        assert!(forest.roots[0].children[1].children.is_empty());

        outdent(&mut forest, "y23").unwrap();
        assert_eq!(ids(&forest.roots), vec!["docs", "y23", "media"]);
    }

    #[test]
    fn indent_then_outdent_restores_position() {
        let mut forest = sample_forest();
        indent(&mut forest, "drafts").unwrap();
        outdent(&mut forest, "drafts").unwrap();
        assert_eq!(forest, sample_forest());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut forest = sample_forest();
        assert!(matches!(indent(&mut forest, "x"), Err(ArborError::NotFound(_))));
        assert!(matches!(outdent(&mut forest, "x"), Err(ArborError::NotFound(_))));
    }
}
