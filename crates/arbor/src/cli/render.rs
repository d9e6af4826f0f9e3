use super::styles;
use arborapp::api::{CmdMessage, MessageLevel};
use arborapp::filter::{MatchSegment, VisibleNode};
use colored::Colorize;

pub const REVIEWED_MARKER: &str = "✓";
const EXPANDED_MARKER: &str = "▾";
const COLLAPSED_MARKER: &str = "▸";
const INDENT: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(error: &dyn std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", error).red());
}

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct TreeOptions {
    pub show_ids: bool,
    /// While filtering, collapsed folders still show their matching
    /// descendants.
    pub filtering: bool,
}

pub(super) fn print_tree(nodes: &[VisibleNode], options: TreeOptions) {
    for line in render_tree(nodes, options) {
        println!("{}", line);
    }
}

pub(super) fn render_tree(nodes: &[VisibleNode], options: TreeOptions) -> Vec<String> {
    let mut lines = Vec::new();
    for node in nodes {
        render_node(node, options, &mut lines);
    }
    lines
}

fn render_node(node: &VisibleNode, options: TreeOptions, out: &mut Vec<String>) {
    let folded = node.collapsed && node.child_count > 0 && !options.filtering;

    let marker = if node.child_count == 0 {
        " "
    } else if folded {
        COLLAPSED_MARKER
    } else {
        EXPANDED_MARKER
    };

    let name_style = if node.reviewed {
        styles::reviewed()
    } else {
        styles::name()
    };
    let name: String = node
        .segments
        .iter()
        .map(|segment| match segment {
            MatchSegment::Plain(text) => name_style.apply_to(text).to_string(),
            MatchSegment::Match(text) => styles::matched().apply_to(text).to_string(),
        })
        .collect();

    let mut line = format!(
        "{}{} {} {}",
        INDENT.repeat(node.depth()),
        styles::marker().apply_to(marker),
        styles::position().apply_to(node.path.to_string()),
        name
    );
    if node.reviewed {
        line.push_str(&format!(" {}", styles::reviewed().apply_to(REVIEWED_MARKER)));
    }
    if folded {
        line.push_str(&format!(
            " {}",
            styles::muted().apply_to(format!("(+{})", node.child_count))
        ));
    }
    if options.show_ids {
        line.push_str(&format!(" {}", styles::muted().apply_to(format!("[{}]", node.id))));
    }
    out.push(line);

    if !folded {
        for child in &node.children {
            render_node(child, options, out);
        }
    }
}

pub(super) fn print_structures(names: &[String], current: &str) {
    for name in names {
        if name == current {
            println!("* {}", styles::current().apply_to(name));
        } else {
            println!("  {}", name);
        }
    }
}
