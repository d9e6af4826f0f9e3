use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ArborError, Result};
use crate::model::Forest;
use crate::store::{self, StorageBackend};

/// Lists stored structures.
pub fn list<B: StorageBackend>(backend: &B) -> Result<CmdResult> {
    let names = backend.list()?;
    let mut result = CmdResult::default();
    if names.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No structures stored in {}",
            backend.location()
        )));
    }
    Ok(result.with_structures(names))
}

/// Stores an empty forest under a new name. Existing structures are never
/// overwritten.
pub fn create<B: StorageBackend>(backend: &B, raw_name: &str) -> Result<CmdResult> {
    let name = store::normalize_name(raw_name)?;
    if backend.list()?.contains(&name) {
        return Err(ArborError::Validation(format!(
            "Structure \"{}\" already exists",
            name
        )));
    }
    store::save_forest(backend, &name, &Forest::default())?;
    Ok(CmdResult::default()
        .with_structures(vec![name.clone()])
        .with_message(CmdMessage::success(format!("Created structure \"{}\"", name))))
}

/// Removes a stored structure. `structures` on the result holds what remains.
pub fn delete<B: StorageBackend>(backend: &B, raw_name: &str) -> Result<CmdResult> {
    let name = store::normalize_name(raw_name)?;
    backend.remove(&name)?;
    let remaining = backend.list()?;
    Ok(CmdResult::default()
        .with_structures(remaining)
        .with_message(CmdMessage::success(format!("Deleted structure \"{}\"", name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn create_list_delete() {
        let backend = MemBackend::new();
        create(&backend, "beta").unwrap();
        create(&backend, "alpha.json").unwrap();

        let res = list(&backend).unwrap();
        assert_eq!(res.structures, vec!["alpha.json", "beta.json"]);
        assert_eq!(backend.document("beta.json").unwrap(), "[]");

        let res = delete(&backend, "alpha").unwrap();
        assert_eq!(res.structures, vec!["beta.json"]);
    }

    #[test]
    fn create_refuses_existing_name() {
        let backend = MemBackend::new();
        create(&backend, "plan").unwrap();
        assert!(matches!(
            create(&backend, "plan.json"),
            Err(ArborError::Validation(_))
        ));
    }

    #[test]
    fn delete_missing_structure_succeeds() {
        let backend = MemBackend::new();
        assert!(delete(&backend, "ghost").unwrap().structures.is_empty());
    }

    #[test]
    fn empty_listing_has_message() {
        let res = list(&MemBackend::new()).unwrap();
        assert!(res.structures.is_empty());
        assert_eq!(res.messages.len(), 1);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let backend = MemBackend::new();
        assert!(create(&backend, "../x").is_err());
        assert!(backend.list().unwrap().is_empty());
    }
}
