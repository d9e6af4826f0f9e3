use crate::error::Result;

/// Raw I/O for named structure documents.
///
/// Names reaching a backend have already gone through
/// [`super::normalize_name`]. Implementations deal in document text only;
/// parsing happens in [`super::load_forest`].
pub trait StorageBackend {
    /// Read a document.
    /// Returns Ok(None) if it does not exist; Err only on actual I/O failures.
    fn read(&self, name: &str) -> Result<Option<String>>;

    /// Replace a document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, name: &str, content: &str) -> Result<()>;

    /// Delete a document. Deleting a missing document succeeds.
    fn remove(&self, name: &str) -> Result<()>;

    /// Names of all stored documents, sorted.
    fn list(&self) -> Result<Vec<String>>;

    /// Where documents live, for messages ("./.arbor/estructuras", a URL, ...).
    fn location(&self) -> String;
}
