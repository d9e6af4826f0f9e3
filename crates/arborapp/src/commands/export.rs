use crate::commands::{CmdMessage, CmdResult, ExportArtifact};
use crate::error::Result;
use crate::export::{render_script, ScriptFormat};
use crate::model::Forest;
use crate::store;
use std::fmt;
use std::str::FromStr;

/// What to export the forest as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Script(ScriptFormat),
    /// The raw document, pretty-printed, named after the structure.
    Json,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Script(format) => write!(f, "{}", format),
            ExportKind::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("json") {
            return Ok(ExportKind::Json);
        }
        s.parse::<ScriptFormat>()
            .map(ExportKind::Script)
            .map_err(|_| format!("Unknown export format: {} (expected sh, bat or json)", s))
    }
}

/// Renders the forest. Scripts of an empty forest would create nothing, so
/// they are refused with a warning and no artifact.
pub fn run(forest: &Forest, kind: ExportKind, structure: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let artifact = match kind {
        ExportKind::Script(format) => {
            if forest.is_empty() {
                result.add_message(CmdMessage::warning(
                    "There is no folder structure to export",
                ));
                return Ok(result);
            }
            ExportArtifact {
                file_name: format.file_name().to_string(),
                content: render_script(forest, format),
            }
        }
        ExportKind::Json => ExportArtifact {
            file_name: store::normalize_name(structure)
                .unwrap_or_else(|_| store::DEFAULT_STRUCTURE.to_string()),
            content: forest.to_pretty_json()?,
        },
    };

    result.add_message(CmdMessage::success(format!(
        "Exported {} folder(s) as {}",
        forest.node_count(),
        artifact.file_name
    )));
    Ok(result.with_artifact(artifact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Node;
    use crate::test_utils::sample_forest;

    #[test]
    fn unix_export_produces_named_script() {
        let forest = Forest::new(vec![
            Node::new("Docs").with_children(vec![Node::new("2024")])
        ]);
        let res = run(&forest, ExportKind::Script(ScriptFormat::Unix), "x").unwrap();
        let artifact = res.artifact.unwrap();
        assert_eq!(artifact.file_name, "crear_carpetas.sh");
        assert_eq!(artifact.content, "mkdir -p \"Docs\"\nmkdir -p \"Docs/2024\"");
    }

    #[test]
    fn windows_export_uses_crlf() {
        let res = run(
            &sample_forest(),
            ExportKind::Script(ScriptFormat::Windows),
            "x",
        )
        .unwrap();
        let artifact = res.artifact.unwrap();
        assert_eq!(artifact.file_name, "crear_carpetas.bat");
        assert_eq!(artifact.content.lines().count(), 7);
        assert!(artifact.content.contains("mkdir \"Docs\\2024\\Q1\"\r\n"));
    }

    #[test]
    fn empty_forest_script_is_refused() {
        let res = run(&Forest::default(), ExportKind::Script(ScriptFormat::Unix), "x").unwrap();
        assert!(res.artifact.is_none());
        assert_eq!(res.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn json_export_is_named_after_structure() {
        let forest = sample_forest();
        let res = run(&forest, ExportKind::Json, "plan").unwrap();
        let artifact = res.artifact.unwrap();
        assert_eq!(artifact.file_name, "plan.json");
        let back: Forest = serde_json::from_str(&artifact.content).unwrap();
        assert_eq!(back, forest);
    }

    #[test]
    fn parses_export_kinds() {
        assert_eq!("JSON".parse::<ExportKind>().unwrap(), ExportKind::Json);
        assert_eq!(
            "sh".parse::<ExportKind>().unwrap(),
            ExportKind::Script(ScriptFormat::Unix)
        );
        assert!("zip".parse::<ExportKind>().is_err());
    }
}
