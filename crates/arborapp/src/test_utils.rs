use crate::model::{Forest, Node};

/// A small forest with stable ids, shared by command tests:
///
/// ```text
/// Docs    (docs)
/// ├── 2023    (y23)
/// ├── 2024    (y24)
/// │   └── Q1  (q1)
/// └── Drafts  (drafts)
/// Media   (media)
/// └── Photos  (photos)
/// ```
pub fn sample_forest() -> Forest {
    Forest::new(vec![
        Node::new("Docs").with_id("docs").with_children(vec![
            Node::new("2023").with_id("y23"),
            Node::new("2024")
                .with_id("y24")
                .with_children(vec![Node::new("Q1").with_id("q1")]),
            Node::new("Drafts").with_id("drafts"),
        ]),
        Node::new("Media")
            .with_id("media")
            .with_children(vec![Node::new("Photos").with_id("photos")]),
    ])
}

/// Ids of a sequence, in order.
pub fn ids(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}
