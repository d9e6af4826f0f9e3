//! # Editing Session
//!
//! A [`Session`] is everything one editor holds while it works on a
//! structure: the live forest, the active filter, undo/redo history and the
//! backend the structure is saved to.
//!
//! ## Mutation Pipeline
//!
//! Every mutating call goes through the same steps:
//!
//! ```text
//! snapshot ─▶ command ─▶ changed? ─yes─▶ push snapshot ─▶ save
//!                            │
//!                            no ─▶ done (no history entry, no save)
//! ```
//!
//! Commands are atomic, so an `Err` from the command means the forest, the
//! history and the stored document are all untouched.
//!
//! ## Save Failures
//!
//! Persistence is fire-and-forget relative to the in-memory state. A failed
//! save is logged, reported as a warning message on the result, and does
//! **not** roll the mutation back. The next successful save writes the whole
//! forest again, so nothing is lost once the backend recovers.

use crate::commands::{self, CmdMessage, CmdResult};
use crate::commands::delete::DeletePreview;
use crate::commands::export::ExportKind;
use crate::commands::move_node::DropKind;
use crate::error::Result;
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::model::{Forest, DEFAULT_NODE_NAME};
use crate::store::{self, StorageBackend, DEFAULT_STRUCTURE};
use tracing::{debug, info, warn};

pub struct Session<B: StorageBackend> {
    backend: B,
    structure: String,
    forest: Forest,
    filter: String,
    history: History,
    default_name: String,
}

impl<B: StorageBackend> Session<B> {
    /// Loads `structure` from the backend. A structure that was never saved
    /// opens as an empty forest.
    pub fn open(backend: B, structure: &str) -> Result<Self> {
        let structure = store::normalize_name(structure)?;
        let forest = store::load_forest(&backend, &structure)?;
        info!(
            structure = %structure,
            nodes = forest.node_count(),
            location = %backend.location(),
            "opened structure"
        );
        Ok(Self {
            backend,
            structure,
            forest,
            filter: String::new(),
            history: History::new(DEFAULT_HISTORY_LIMIT),
            default_name: DEFAULT_NODE_NAME.to_string(),
        })
    }

    /// Opens the default structure (`estructura.json`).
    pub fn open_default(backend: B) -> Result<Self> {
        Self::open(backend, DEFAULT_STRUCTURE)
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = History::new(limit);
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        if !name.trim().is_empty() {
            self.default_name = name.trim().to_string();
        }
        self
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn structure(&self) -> &str {
        &self.structure
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Structural mutations ---

    /// Adds a root (`parent == None`) or a child. Blank names get the
    /// session's default name.
    pub fn add(&mut self, parent: Option<&str>, name: Option<&str>) -> Result<CmdResult> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.default_name.clone(),
        };
        self.apply("add", |forest| commands::add::run(forest, parent, &name))
    }

    pub fn delete_preview(&self, id: &str) -> Result<DeletePreview> {
        commands::delete::preview(&self.forest, id)
    }

    /// Deletes without asking. Show [`Session::delete_preview`] first.
    pub fn delete(&mut self, id: &str) -> Result<CmdResult> {
        self.apply("delete", |forest| commands::delete::run(forest, id))
    }

    /// Renames a node. `None` is a cancelled edit: nothing changes and no
    /// history entry is recorded.
    pub fn rename(&mut self, id: &str, name: Option<&str>) -> Result<CmdResult> {
        match name {
            Some(name) => self.apply("rename", |forest| commands::rename::run(forest, id, name)),
            None => {
                crate::path::resolve(&self.forest, id)?;
                Ok(CmdResult::unchanged(CmdMessage::info("Rename cancelled")))
            }
        }
    }

    pub fn move_node(&mut self, source: &str, target: &str, kind: DropKind) -> Result<CmdResult> {
        self.apply("move", |forest| {
            commands::move_node::run(forest, source, target, kind)
        })
    }

    pub fn indent(&mut self, id: &str) -> Result<CmdResult> {
        self.apply("indent", |forest| commands::nesting::indent(forest, id))
    }

    pub fn outdent(&mut self, id: &str) -> Result<CmdResult> {
        self.apply("outdent", |forest| commands::nesting::outdent(forest, id))
    }

    pub fn toggle_collapsed(&mut self, id: &str) -> Result<CmdResult> {
        self.apply("toggle_collapsed", |forest| {
            commands::toggle::toggle_collapsed(forest, id)
        })
    }

    /// `None` flips the flag.
    pub fn set_reviewed(&mut self, id: &str, value: Option<bool>) -> Result<CmdResult> {
        self.apply("set_reviewed", |forest| {
            commands::toggle::set_reviewed(forest, id, value)
        })
    }

    pub fn collapse_all(&mut self, collapsed: bool) -> Result<CmdResult> {
        self.apply("collapse_all", |forest| {
            commands::toggle::collapse_all(forest, collapsed)
        })
    }

    /// Replaces the current structure's forest with an imported document.
    /// Undoable like any other mutation.
    pub fn import(&mut self, text: &str) -> Result<CmdResult> {
        self.apply("import", |forest| commands::import::run(forest, text))
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<CmdResult> {
        match self.history.undo(&self.forest)? {
            None => Ok(CmdResult::unchanged(CmdMessage::info("Nothing to undo"))),
            Some(previous) => {
                self.forest = previous;
                debug!(
                    undo = self.history.undo_depth(),
                    redo = self.history.redo_depth(),
                    "undo"
                );
                let mut result = CmdResult::changed().with_message(CmdMessage::info("Undone"));
                self.persist(&mut result);
                Ok(result)
            }
        }
    }

    pub fn redo(&mut self) -> Result<CmdResult> {
        match self.history.redo(&self.forest)? {
            None => Ok(CmdResult::unchanged(CmdMessage::info("Nothing to redo"))),
            Some(next) => {
                self.forest = next;
                debug!(
                    undo = self.history.undo_depth(),
                    redo = self.history.redo_depth(),
                    "redo"
                );
                let mut result = CmdResult::changed().with_message(CmdMessage::info("Redone"));
                self.persist(&mut result);
                Ok(result)
            }
        }
    }

    // --- View ---

    /// Sets the filter used by [`Session::view`]. Never touches the forest.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_string();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn view(&self) -> Result<CmdResult> {
        commands::view::run(&self.forest, &self.filter)
    }

    pub fn export(&self, kind: ExportKind) -> Result<CmdResult> {
        commands::export::run(&self.forest, kind, &self.structure)
    }

    // --- Named structures ---

    pub fn list_structures(&self) -> Result<CmdResult> {
        commands::structures::list(&self.backend)
    }

    /// Makes `name` the live structure. History and filter start over.
    pub fn switch_structure(&mut self, name: &str) -> Result<CmdResult> {
        let name = store::normalize_name(name)?;
        let forest = store::load_forest(&self.backend, &name)?;
        info!(from = %self.structure, to = %name, "switched structure");
        self.replace(name.clone(), forest);
        Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Opened structure \"{}\"",
            name
        ))))
    }

    /// Stores a new empty structure and switches to it.
    pub fn create_structure(&mut self, name: &str) -> Result<CmdResult> {
        let mut result = commands::structures::create(&self.backend, name)?;
        if let Some(created) = result.structures.first().cloned() {
            self.replace(created, Forest::default());
        }
        result.structures = self.backend.list()?;
        Ok(result)
    }

    /// Removes a stored structure. Deleting the live one switches to the first
    /// remaining structure, or to an empty default structure when none is left.
    /// The replacement is loaded before anything is removed, so an unreadable
    /// replacement fails the call with every document still in place.
    pub fn delete_structure(&mut self, name: &str) -> Result<CmdResult> {
        let name = store::normalize_name(name)?;
        if name != self.structure {
            return commands::structures::delete(&self.backend, &name);
        }

        let next = match self.backend.list()?.into_iter().find(|n| *n != name) {
            Some(first) => {
                let forest = store::load_forest(&self.backend, &first)?;
                Some((first, forest))
            }
            None => None,
        };

        let mut result = commands::structures::delete(&self.backend, &name)?;
        match next {
            Some((first, forest)) => {
                result.add_message(CmdMessage::info(format!("Opened structure \"{}\"", first)));
                self.replace(first, forest);
            }
            None => {
                self.replace(DEFAULT_STRUCTURE.to_string(), Forest::default());
            }
        }
        info!(deleted = %name, now = %self.structure, "deleted live structure");
        Ok(result)
    }

    /// Imports a document as a new (or replaced) named structure and switches
    /// to it. The document is validated before anything is written.
    pub fn import_as(&mut self, name: &str, text: &str) -> Result<CmdResult> {
        let forest = commands::import::parse(text)?;
        let name = store::normalize_name(name)?;
        let count = forest.node_count();
        self.replace(name.clone(), forest);

        let mut result = CmdResult::changed().with_message(CmdMessage::success(format!(
            "Imported {} folder(s) into \"{}\"",
            count, name
        )));
        self.persist(&mut result);
        Ok(result)
    }

    fn replace(&mut self, structure: String, forest: Forest) {
        self.structure = structure;
        self.forest = forest;
        self.history.clear();
        self.filter.clear();
    }

    /// Runs a command with snapshot, history and save around it.
    fn apply<F>(&mut self, op: &str, command: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut Forest) -> Result<CmdResult>,
    {
        let snapshot = self.forest.to_snapshot()?;
        let mut result = command(&mut self.forest)?;
        if !result.changed {
            debug!(op, "no change");
            return Ok(result);
        }

        self.history.push_snapshot(snapshot);
        debug!(
            op,
            affected = ?result.affected_ids,
            undo = self.history.undo_depth(),
            "applied"
        );
        self.persist(&mut result);
        Ok(result)
    }

    fn persist(&self, result: &mut CmdResult) {
        if let Err(e) = store::save_forest(&self.backend, &self.structure, &self.forest) {
            warn!(
                structure = %self.structure,
                error = %e,
                "save failed, keeping in-memory state"
            );
            result.add_message(CmdMessage::warning(format!("Changes were not saved: {}", e)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::sample_forest;

    fn session() -> Session<MemBackend> {
        let backend = MemBackend::new();
        store::save_forest(&backend, DEFAULT_STRUCTURE, &sample_forest()).unwrap();
        Session::open_default(backend).unwrap()
    }

    fn stored(session: &Session<MemBackend>) -> Forest {
        store::load_forest(session.backend(), session.structure()).unwrap()
    }

    #[test]
    fn open_missing_structure_is_empty() {
        let session = Session::open(MemBackend::new(), "new").unwrap();
        assert!(session.forest().is_empty());
        assert_eq!(session.structure(), "new.json");
    }

    #[test]
    fn mutation_persists_and_is_undoable() {
        let mut session = session();
        let before = session.forest().to_snapshot().unwrap();

        session.rename("y24", Some("Year 2024")).unwrap();
        let after = session.forest().to_snapshot().unwrap();
        assert_eq!(stored(&session).to_snapshot().unwrap(), after);

        session.undo().unwrap();
        assert_eq!(session.forest().to_snapshot().unwrap(), before);
        assert_eq!(stored(&session).to_snapshot().unwrap(), before);

        session.redo().unwrap();
        assert_eq!(session.forest().to_snapshot().unwrap(), after);
    }

    #[test]
    fn noop_records_no_history() {
        let mut session = session();
        session.indent("y23").unwrap();
        session.outdent("docs").unwrap();
        assert!(!session.history().can_undo());
    }

    #[test]
    fn failed_command_records_no_history() {
        let mut session = session();
        assert!(session.move_node("docs", "q1", DropKind::Into).is_err());
        assert!(!session.history().can_undo());
        assert_eq!(session.forest(), &sample_forest());
    }

    #[test]
    fn add_uses_default_name() {
        let mut session = session().with_default_name("Nueva carpeta");
        let res = session.add(None, None).unwrap();
        let id = &res.affected_ids[0];
        assert_eq!(crate::path::find(session.forest(), id).unwrap().name, "Nueva carpeta");

        let res = session.add(Some("docs"), Some("   ")).unwrap();
        let id = &res.affected_ids[0];
        assert_eq!(crate::path::find(session.forest(), id).unwrap().name, "Nueva carpeta");
    }

    #[test]
    fn rename_cancel_changes_nothing() {
        let mut session = session();
        let res = session.rename("docs", None).unwrap();
        assert!(!res.changed);
        assert!(!session.history().can_undo());
        assert!(session.rename("ghost", None).is_err());
    }

    #[test]
    fn review_and_collapse_are_undoable() {
        let mut session = session();
        session.set_reviewed("q1", None).unwrap();
        session.toggle_collapsed("docs").unwrap();
        assert_eq!(session.history().undo_depth(), 2);
        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.forest(), &sample_forest());
    }

    #[test]
    fn save_failure_keeps_mutation() {
        let mut session = session();
        session.backend().set_simulate_write_error(true);

        let res = session.delete("media").unwrap();

        assert!(res.changed);
        assert!(session.forest().roots.iter().all(|r| r.id != "media"));
        assert!(res
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
        session.backend().set_simulate_write_error(false);
        assert_eq!(stored(&session), sample_forest());
    }

    #[test]
    fn history_is_bounded() {
        let mut session = session().with_history_limit(3);
        for i in 0..5 {
            session.rename("docs", Some(&format!("Docs {}", i))).unwrap();
        }
        assert_eq!(session.history().undo_depth(), 3);
    }

    #[test]
    fn filter_does_not_touch_forest() {
        let mut session = session();
        session.set_filter("  photo ");
        assert_eq!(session.filter(), "photo");
        let view = session.view().unwrap();
        assert_eq!(view.listed_nodes.len(), 1);
        assert_eq!(session.forest(), &sample_forest());
        assert!(!session.history().can_undo());
    }

    #[test]
    fn switch_structure_resets_history_and_filter() {
        let mut session = session();
        session.rename("docs", Some("Papers")).unwrap();
        session.set_filter("pap");

        session.switch_structure("other").unwrap();

        assert_eq!(session.structure(), "other.json");
        assert!(session.forest().is_empty());
        assert!(!session.history().can_undo());
        assert_eq!(session.filter(), "");
    }

    #[test]
    fn create_structure_switches_to_it() {
        let mut session = session();
        let res = session.create_structure("plan").unwrap();
        assert_eq!(session.structure(), "plan.json");
        assert!(session.forest().is_empty());
        assert_eq!(res.structures, vec!["estructura.json", "plan.json"]);
    }

    #[test]
    fn deleting_live_structure_opens_first_remaining() {
        let mut session = session();
        session.create_structure("plan").unwrap();
        session.delete_structure("plan").unwrap();
        assert_eq!(session.structure(), "estructura.json");
        assert_eq!(session.forest(), &sample_forest());

        session.delete_structure("estructura").unwrap();
        assert_eq!(session.structure(), DEFAULT_STRUCTURE);
        assert!(session.forest().is_empty());
        assert!(session.backend().list().unwrap().is_empty());
    }

    #[test]
    fn unreadable_replacement_keeps_live_structure() {
        let backend = MemBackend::new();
        backend.write("a.json", "[]").unwrap();
        backend.write("b.json", "{corrupt").unwrap();
        let mut session = Session::open(backend, "a").unwrap();

        assert!(session.delete_structure("a").is_err());
        assert_eq!(session.structure(), "a.json");
        assert_eq!(
            session.backend().list().unwrap(),
            vec!["a.json", "b.json"]
        );
        assert_eq!(session.backend().document("a.json").as_deref(), Some("[]"));
    }

    #[test]
    fn deleting_other_structure_keeps_live_one() {
        let mut session = session();
        store::save_forest(session.backend(), "other.json", &Forest::default()).unwrap();
        session.delete_structure("other").unwrap();
        assert_eq!(session.structure(), "estructura.json");
        assert_eq!(session.forest(), &sample_forest());
    }

    #[test]
    fn import_as_saves_under_new_name() {
        let mut session = session();
        session
            .import_as("imported", r#"[{"name": "Only"}]"#)
            .unwrap();
        assert_eq!(session.structure(), "imported.json");
        assert_eq!(stored(&session).roots[0].name, "Only");
        assert!(!session.history().can_undo());
    }

    #[test]
    fn bad_import_changes_nothing() {
        let mut session = session();
        assert!(session.import("not json").is_err());
        assert!(session.import_as("x", "not json").is_err());
        assert_eq!(session.structure(), "estructura.json");
        assert_eq!(session.forest(), &sample_forest());
        assert!(session.backend().document("x.json").is_none());
    }

    #[test]
    fn import_into_current_is_undoable() {
        let mut session = session();
        session.import(r#"[{"name": "Only"}]"#).unwrap();
        assert_eq!(session.forest().roots.len(), 1);
        session.undo().unwrap();
        assert_eq!(session.forest(), &sample_forest());
    }
}
