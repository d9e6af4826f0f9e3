//! # Script Export
//!
//! Two deterministic renderings of the forest as directory-creation scripts.
//! Both walk the forest in pre-order and emit one line per node, roots
//! included; a node's path is its parent's path joined with its own name.
//!
//! | Format    | Line                | Separator | Line ending | File                 |
//! |-----------|---------------------|-----------|-------------|----------------------|
//! | `Unix`    | `mkdir -p "<path>"` | `/`       | `\n`        | `crear_carpetas.sh`  |
//! | `Windows` | `mkdir "<path>"`    | `\`       | `\r\n`      | `crear_carpetas.bat` |
//!
//! Lines are joined, not terminated: there is no trailing line ending.
//! Names are written verbatim; tooling consuming these scripts relies on the
//! exact order and separators.

use crate::model::{Forest, Node};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFormat {
    Unix,
    Windows,
}

impl ScriptFormat {
    pub fn separator(self) -> char {
        match self {
            ScriptFormat::Unix => '/',
            ScriptFormat::Windows => '\\',
        }
    }

    pub fn line_ending(self) -> &'static str {
        match self {
            ScriptFormat::Unix => "\n",
            ScriptFormat::Windows => "\r\n",
        }
    }

    pub fn command(self) -> &'static str {
        match self {
            ScriptFormat::Unix => "mkdir -p",
            ScriptFormat::Windows => "mkdir",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ScriptFormat::Unix => "crear_carpetas.sh",
            ScriptFormat::Windows => "crear_carpetas.bat",
        }
    }
}

impl fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptFormat::Unix => write!(f, "sh"),
            ScriptFormat::Windows => write!(f, "bat"),
        }
    }
}

impl FromStr for ScriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sh" | "unix" | "linux" => Ok(ScriptFormat::Unix),
            "bat" | "windows" | "win" => Ok(ScriptFormat::Windows),
            other => Err(format!("Unknown script format: {}", other)),
        }
    }
}

/// Full path of every node, pre-order.
pub fn folder_paths(forest: &Forest, separator: char) -> Vec<String> {
    let mut paths = Vec::with_capacity(forest.node_count());
    for root in &forest.roots {
        walk(root, None, separator, &mut paths);
    }
    paths
}

fn walk(node: &Node, parent: Option<&str>, separator: char, out: &mut Vec<String>) {
    let current = match parent {
        Some(p) => format!("{}{}{}", p, separator, node.name),
        None => node.name.clone(),
    };
    out.push(current.clone());
    for child in &node.children {
        walk(child, Some(&current), separator, out);
    }
}

/// Renders the script body for `format`.
pub fn render_script(forest: &Forest, format: ScriptFormat) -> String {
    folder_paths(forest, format.separator())
        .into_iter()
        .map(|p| format!("{} \"{}\"", format.command(), p))
        .collect::<Vec<_>>()
        .join(format.line_ending())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Forest {
        Forest::new(vec![Node::new("Docs").with_children(vec![Node::new("2024")])])
    }

    #[test]
    fn unix_script_matches_expected_text() {
        assert_eq!(
            render_script(&docs(), ScriptFormat::Unix),
            "mkdir -p \"Docs\"\nmkdir -p \"Docs/2024\""
        );
    }

    #[test]
    fn windows_script_matches_expected_text() {
        assert_eq!(
            render_script(&docs(), ScriptFormat::Windows),
            "mkdir \"Docs\"\r\nmkdir \"Docs\\2024\""
        );
    }

    #[test]
    fn pre_order_over_several_roots() {
        let forest = Forest::new(vec![
            Node::new("A").with_children(vec![
                Node::new("B").with_children(vec![Node::new("C")]),
                Node::new("D"),
            ]),
            Node::new("E"),
        ]);
        assert_eq!(
            folder_paths(&forest, '/'),
            vec!["A", "A/B", "A/B/C", "A/D", "E"]
        );
    }

    #[test]
    fn empty_forest_renders_empty_script() {
        assert_eq!(render_script(&Forest::default(), ScriptFormat::Unix), "");
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("sh".parse::<ScriptFormat>().unwrap(), ScriptFormat::Unix);
        assert_eq!("BAT".parse::<ScriptFormat>().unwrap(), ScriptFormat::Windows);
        assert!("zip".parse::<ScriptFormat>().is_err());
        assert_eq!(ScriptFormat::Unix.file_name(), "crear_carpetas.sh");
    }
}
