use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter;
use crate::model::Forest;

/// Projects the forest through `filter_text` for display.
pub fn run(forest: &Forest, filter_text: &str) -> Result<CmdResult> {
    let nodes = filter::project(forest, filter_text.trim());
    let mut result = CmdResult::default();

    if forest.is_empty() {
        result.add_message(CmdMessage::info(
            "The structure is empty. Add a folder to get started.",
        ));
    } else if nodes.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No folders match \"{}\"",
            filter_text.trim()
        )));
    }

    Ok(result.with_listed_nodes(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_forest;

    #[test]
    fn unfiltered_view_lists_all_roots() {
        let res = run(&sample_forest(), "").unwrap();
        assert!(!res.changed);
        assert_eq!(res.listed_nodes.len(), 2);
        assert_eq!(filter::count_visible(&res.listed_nodes), 7);
        assert!(res.messages.is_empty());
    }

    #[test]
    fn filter_keeps_ancestors_of_matches() {
        let res = run(&sample_forest(), " q1 ").unwrap();
        assert_eq!(filter::count_visible(&res.listed_nodes), 3);
        let docs = &res.listed_nodes[0];
        assert_eq!(docs.id, "docs");
        assert_eq!(docs.children[0].id, "y24");
        assert!(docs.children[0].children[0].is_match);
    }

    #[test]
    fn no_matches_reports_message() {
        let res = run(&sample_forest(), "zzz").unwrap();
        assert!(res.listed_nodes.is_empty());
        assert_eq!(res.messages.len(), 1);
    }

    #[test]
    fn empty_forest_reports_message() {
        let res = run(&Forest::default(), "").unwrap();
        assert!(res.listed_nodes.is_empty());
        assert!(res.messages[0].content.contains("empty"));
    }
}
