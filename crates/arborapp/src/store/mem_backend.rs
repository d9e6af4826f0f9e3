use super::backend::StorageBackend;
use crate::error::{ArborError, Result};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` since sessions are single-threaded, which lets the trait
/// keep `&self` on every method.
#[derive(Default)]
pub struct MemBackend {
    documents: RefCell<BTreeMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Raw text of a stored document, for assertions.
    pub fn document(&self, name: &str) -> Option<String> {
        self.documents.borrow().get(name).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.documents.borrow().get(name).cloned())
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ArborError::Storage("Simulated write error".to_string()));
        }
        self.documents
            .borrow_mut()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(ArborError::Storage("Simulated write error".to_string()));
        }
        self.documents.borrow_mut().remove(name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.documents.borrow().keys().cloned().collect())
    }

    fn location(&self) -> String {
        "memory://".to_string()
    }
}
