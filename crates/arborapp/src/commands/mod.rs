//! # Command Layer
//!
//! This module contains the **core business logic** of arbor. Each operation
//! lives in its own submodule as a plain function over a [`Forest`] (or over a
//! storage backend, for structure management).
//!
//! ## Contract
//!
//! Every command is **atomic**: it validates everything it needs (ids exist,
//! no cycles, position rules) before touching the forest, so an `Err` always
//! means "nothing changed". A successful call reports whether it actually
//! changed the forest through [`CmdResult::changed`]; no-ops such as indenting
//! a first child return `Ok` with `changed == false`.
//!
//! Commands do not know about history or persistence. The
//! [`crate::session::Session`] wraps them: snapshot, run, and on `changed`
//! record the snapshot and save.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** besides the store handed to them: no stdout, no prompts.
//! - **Confirmation**: destructive commands expose a `preview` the UI shows
//!   before calling `run`.
//!
//! ## Command Modules
//!
//! - [`add`]: Add a root or a child node
//! - [`delete`]: Remove a subtree (with confirmation preview)
//! - [`rename`]: Rename a node
//! - [`move_node`]: Drag-and-drop relocation (`before`, `after`, `into`)
//! - [`nesting`]: Indent / outdent
//! - [`toggle`]: Collapsed / reviewed flags
//! - [`view`]: Filtered projection of the forest
//! - [`export`]: Shell/batch scripts and raw JSON
//! - [`import`]: Parse and validate a JSON document
//! - [`structures`]: Named structure management on a backend

use crate::filter::VisibleNode;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod export;
pub mod import;
pub mod move_node;
pub mod nesting;
pub mod rename;
pub mod structures;
pub mod toggle;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A rendered file ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Whether the forest was modified.
    pub changed: bool,
    /// Ids of the nodes the command created or modified.
    pub affected_ids: Vec<String>,
    pub listed_nodes: Vec<VisibleNode>,
    pub structures: Vec<String>,
    pub artifact: Option<ExportArtifact>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Default::default()
        }
    }

    pub fn unchanged(message: CmdMessage) -> Self {
        Self {
            messages: vec![message],
            ..Default::default()
        }
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, id: impl Into<String>) -> Self {
        self.affected_ids.push(id.into());
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listed_nodes(mut self, nodes: Vec<VisibleNode>) -> Self {
        self.listed_nodes = nodes;
        self
    }

    pub fn with_structures(mut self, names: Vec<String>) -> Self {
        self.structures = names;
        self
    }

    pub fn with_artifact(mut self, artifact: ExportArtifact) -> Self {
        self.artifact = Some(artifact);
        self
    }
}
