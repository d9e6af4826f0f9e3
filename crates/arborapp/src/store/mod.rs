//! # Storage Layer
//!
//! A structure is one named JSON document holding a whole [`Forest`]. The
//! editor never stores nodes individually: every save replaces the document.
//!
//! ## Backends
//!
//! [`StorageBackend`] is the raw document I/O; it knows nothing about nodes.
//!
//! - [`fs_backend::FsBackend`]: a directory of `*.json` files (atomic writes).
//! - [`http_backend::HttpBackend`]: the `/tree` + `/list` HTTP protocol served
//!   by `arbor serve` (or any compatible server).
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Naming
//!
//! Structure names are file names: a single path component made of letters,
//! digits, `-`, `_` and `.`, always ending in `.json`. [`normalize_name`]
//! appends the extension when it is missing and rejects anything else, so a
//! name can never escape the data directory.
//!
//! ## Missing Documents
//!
//! Loading a structure that was never saved yields an empty forest. A document
//! that exists but does not parse is an error: silently replacing it with an
//! empty forest would overwrite the user's data on the next save.
//!
//! ## Storage Layout
//!
//! ```text
//! .arbor/
//! ├── arbor.toml              # Project configuration
//! └── estructuras/
//!     ├── estructura.json     # Default structure
//!     └── {name}.json
//! ```

use crate::error::{ArborError, Result};
use crate::model::Forest;
use tracing::debug;

pub mod backend;
pub mod fs_backend;
pub mod http_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

/// Structure used when none is named.
pub const DEFAULT_STRUCTURE: &str = "estructura.json";

const EXTENSION: &str = ".json";

/// Validates a structure name and appends `.json` when missing.
pub fn normalize_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ArborError::Validation(
            "Structure name cannot be empty".to_string(),
        ));
    }
    if name.starts_with('.') {
        return Err(ArborError::Validation(format!(
            "Invalid structure name \"{}\": cannot start with a dot",
            name
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(ArborError::Validation(format!(
            "Invalid structure name \"{}\": character '{}' is not allowed",
            name, bad
        )));
    }

    if name.to_lowercase().ends_with(EXTENSION) {
        Ok(name.to_string())
    } else {
        Ok(format!("{}{}", name, EXTENSION))
    }
}

/// Reads and parses a structure. Missing documents read as an empty forest.
///
/// The returned forest has passed [`Forest::ensure_structure`].
pub fn load_forest<B: StorageBackend>(backend: &B, name: &str) -> Result<Forest> {
    let name = normalize_name(name)?;
    let Some(text) = backend.read(&name)? else {
        debug!(structure = %name, "structure not found, starting empty");
        return Ok(Forest::default());
    };
    let mut forest = parse_document(&text).map_err(|e| {
        ArborError::Storage(format!("Structure \"{}\" is not a valid document: {}", name, e))
    })?;
    let backfilled = forest.ensure_structure();
    if backfilled > 0 {
        debug!(structure = %name, backfilled, "assigned ids to stored nodes");
    }
    Ok(forest)
}

/// Serializes and writes a structure (pretty JSON).
pub fn save_forest<B: StorageBackend>(backend: &B, name: &str, forest: &Forest) -> Result<()> {
    let name = normalize_name(name)?;
    backend.write(&name, &forest.to_pretty_json()?)
}

/// Parses a stored or imported document. Blank text counts as an empty forest.
pub(crate) fn parse_document(text: &str) -> std::result::Result<Forest, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(Forest::default());
    }
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::test_utils::sample_forest;

    #[test]
    fn normalize_appends_extension() {
        assert_eq!(normalize_name("plan").unwrap(), "plan.json");
        assert_eq!(normalize_name(" plan.json ").unwrap(), "plan.json");
        assert_eq!(normalize_name("v1.2-final_b").unwrap(), "v1.2-final_b.json");
    }

    #[test]
    fn normalize_rejects_path_components() {
        for bad in ["", "  ", "../etc", "a/b", "a\\b", ".hidden", "with space"] {
            assert!(
                matches!(normalize_name(bad), Err(ArborError::Validation(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn missing_structure_loads_empty() {
        let backend = MemBackend::new();
        assert!(load_forest(&backend, "nothing").unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let backend = MemBackend::new();
        save_forest(&backend, "plan", &sample_forest()).unwrap();
        assert_eq!(load_forest(&backend, "plan.json").unwrap(), sample_forest());
    }

    #[test]
    fn load_backfills_missing_ids() {
        let backend = MemBackend::new();
        backend
            .write("old.json", r#"[{"name":"Docs","children":[{"name":"2024"}]}]"#)
            .unwrap();
        let forest = load_forest(&backend, "old").unwrap();
        assert_eq!(forest.node_count(), 2);
        assert!(forest.iter().all(|n| !n.id.is_empty()));
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let backend = MemBackend::new();
        backend.write("bad.json", "{not json").unwrap();
        assert!(matches!(
            load_forest(&backend, "bad"),
            Err(ArborError::Storage(_))
        ));
    }
}
