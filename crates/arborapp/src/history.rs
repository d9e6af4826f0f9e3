//! # Undo / Redo
//!
//! History is kept as whole-forest snapshots (compact JSON), not as deltas.
//! Restoring a snapshot cannot leave a half-applied inverse operation behind,
//! at the cost of memory proportional to `tree size × depth`.
//!
//! ## Contract
//!
//! - [`History::push_state`] is called by every mutation *before* it changes
//!   the forest. It records the pre-mutation forest and clears the redo stack
//!   (linear history, no branches). [`History::push_snapshot`] is the same for
//!   a snapshot taken earlier, which lets the session skip no-op commands.
//! - The undo stack is bounded; once full, the oldest snapshot is dropped.
//! - [`History::undo`] / [`History::redo`] take the *current* forest, park it
//!   on the opposite stack and return the forest to restore, or `None` when
//!   there is nothing to do.

use crate::error::Result;
use crate::model::Forest;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<String>,
    redo: Vec<String>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Records `forest` as the state to return to, and drops the redo branch.
    pub fn push_state(&mut self, forest: &Forest) -> Result<()> {
        self.push_snapshot(forest.to_snapshot()?);
        Ok(())
    }

    /// Records an already serialized state. See [`Forest::to_snapshot`].
    pub fn push_snapshot(&mut self, snapshot: String) {
        self.undo.push_back(snapshot);
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    pub fn undo(&mut self, current: &Forest) -> Result<Option<Forest>> {
        let Some(previous) = self.undo.back() else {
            return Ok(None);
        };
        let restored = Forest::from_snapshot(previous)?;
        self.redo.push(current.to_snapshot()?);
        self.undo.pop_back();
        Ok(Some(restored))
    }

    pub fn redo(&mut self, current: &Forest) -> Result<Option<Forest>> {
        let Some(next) = self.redo.last() else {
            return Ok(None);
        };
        let restored = Forest::from_snapshot(next)?;
        self.undo.push_back(current.to_snapshot()?);
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.pop();
        Ok(Some(restored))
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
