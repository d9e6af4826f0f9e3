//! # API Facade
//!
//! The API layer is a **thin facade** over the [`Session`]. It is the single
//! entry point UI clients use, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the session, which runs the command and handles
//!   history and persistence
//! - **Normalizes inputs**: turns user-typed node references into ids
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O operations**: no stdout, stderr, or prompts
//!
//! ## Node References
//!
//! Wherever a node is expected, users may type:
//!
//! 1. **An id**: exact match, always wins.
//! 2. **A position**: the dotted 1-based path shown by `show` (`2`, `1.3.1`).
//! 3. **A name fragment**: case-insensitive substring; must match exactly
//!    one node.
//!
//! A reference that matches nothing is [`ArborError::NotFound`]; a fragment
//! that matches several nodes is an [`ArborError::Api`] error listing them.
//!
//! ## Generic Over StorageBackend
//!
//! `ArborApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `ArborApi<FsBackend>` or `ArborApi<HttpBackend>`
//! - Testing: `ArborApi<MemBackend>`

use crate::commands::delete::DeletePreview;
use crate::commands::export::ExportKind;
use crate::commands::move_node::DropKind;
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::path::{self, NodePath};
use crate::session::Session;
use crate::store::StorageBackend;

/// The main API facade for arbor operations.
pub struct ArborApi<B: StorageBackend> {
    session: Session<B>,
}

impl<B: StorageBackend> ArborApi<B> {
    pub fn new(session: Session<B>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session<B> {
        &self.session
    }

    pub fn forest(&self) -> &Forest {
        self.session.forest()
    }

    pub fn structure(&self) -> &str {
        self.session.structure()
    }

    /// Resolves a user-typed reference to a node id.
    pub fn resolve_ref(&self, reference: &str) -> Result<String> {
        resolve_ref(self.session.forest(), reference)
    }

    pub fn show(&mut self, filter: Option<&str>) -> Result<CmdResult> {
        if let Some(text) = filter {
            self.session.set_filter(text);
        }
        self.session.view()
    }

    pub fn set_filter(&mut self, text: &str) {
        self.session.set_filter(text);
    }

    pub fn add(&mut self, parent: Option<&str>, name: Option<&str>) -> Result<CmdResult> {
        let parent_id = parent.map(|p| self.resolve_ref(p)).transpose()?;
        self.session.add(parent_id.as_deref(), name)
    }

    pub fn delete_preview(&self, node: &str) -> Result<DeletePreview> {
        let id = self.resolve_ref(node)?;
        self.session.delete_preview(&id)
    }

    pub fn delete(&mut self, node: &str) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.delete(&id)
    }

    pub fn rename(&mut self, node: &str, name: Option<&str>) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.rename(&id, name)
    }

    pub fn move_node(&mut self, node: &str, target: &str, kind: DropKind) -> Result<CmdResult> {
        let source = self.resolve_ref(node)?;
        let target = self.resolve_ref(target)?;
        self.session.move_node(&source, &target, kind)
    }

    pub fn indent(&mut self, node: &str) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.indent(&id)
    }

    pub fn outdent(&mut self, node: &str) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.outdent(&id)
    }

    pub fn toggle_collapsed(&mut self, node: &str) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.toggle_collapsed(&id)
    }

    pub fn set_reviewed(&mut self, node: &str, value: Option<bool>) -> Result<CmdResult> {
        let id = self.resolve_ref(node)?;
        self.session.set_reviewed(&id, value)
    }

    pub fn collapse_all(&mut self, collapsed: bool) -> Result<CmdResult> {
        self.session.collapse_all(collapsed)
    }

    pub fn undo(&mut self) -> Result<CmdResult> {
        self.session.undo()
    }

    pub fn redo(&mut self) -> Result<CmdResult> {
        self.session.redo()
    }

    pub fn export(&self, kind: ExportKind) -> Result<CmdResult> {
        self.session.export(kind)
    }

    /// Imports into the live structure (`name == None`) or as a new one.
    pub fn import(&mut self, text: &str, name: Option<&str>) -> Result<CmdResult> {
        match name {
            Some(name) => self.session.import_as(name, text),
            None => self.session.import(text),
        }
    }

    pub fn list_structures(&self) -> Result<CmdResult> {
        self.session.list_structures()
    }

    pub fn open_structure(&mut self, name: &str) -> Result<CmdResult> {
        self.session.switch_structure(name)
    }

    pub fn create_structure(&mut self, name: &str) -> Result<CmdResult> {
        self.session.create_structure(name)
    }

    pub fn delete_structure(&mut self, name: &str) -> Result<CmdResult> {
        self.session.delete_structure(name)
    }
}

fn resolve_ref(forest: &Forest, reference: &str) -> Result<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ArborError::Api("Empty node reference".to_string()));
    }

    // 1. Exact id
    if path::resolve(forest, reference).is_ok() {
        return Ok(reference.to_string());
    }

    // 2. Dotted position
    if let Some(position) = parse_position(reference) {
        if let Some(node) = path::node_at(forest, &position) {
            return Ok(node.id.clone());
        }
    }

    // 3. Unique name fragment
    let hits = path::find_by_name(forest, reference);
    match hits.as_slice() {
        [] => Err(ArborError::NotFound(reference.to_string())),
        [node] => Ok(node.id.clone()),
        many => {
            let names: Vec<String> = many
                .iter()
                .take(5)
                .map(|n| format!("\"{}\"", n.name))
                .collect();
            Err(ArborError::Api(format!(
                "\"{}\" matches {} folders ({}{}); use a position or id",
                reference,
                many.len(),
                names.join(", "),
                if many.len() > 5 { ", ..." } else { "" }
            )))
        }
    }
}

/// Parses `"1.3.1"` into a zero-based path. Returns `None` for anything else.
fn parse_position(s: &str) -> Option<NodePath> {
    let mut steps = Vec::new();
    for part in s.split('.') {
        let n: usize = part.parse().ok()?;
        steps.push(n.checked_sub(1)?);
    }
    if steps.is_empty() {
        None
    } else {
        Some(NodePath::new(steps))
    }
}

pub use crate::commands::{CmdMessage, CmdResult, ExportArtifact, MessageLevel};
