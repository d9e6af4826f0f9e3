use arborapp::model::{Forest, Node};
use arborapp::store::fs_backend::FsBackend;
use arborapp::store::{load_forest, save_forest, StorageBackend};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("estructuras"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_document_io() {
    let (_dir, backend) = setup();

    // 1. Missing
    assert_eq!(backend.read("plan.json").unwrap(), None);

    // 2. Write (creates the directory)
    backend.write("plan.json", "[]").unwrap();
    assert_eq!(backend.read("plan.json").unwrap(), Some("[]".to_string()));

    // 3. Delete, twice
    backend.remove("plan.json").unwrap();
    backend.remove("plan.json").unwrap();
    assert_eq!(backend.read("plan.json").unwrap(), None);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();
    backend.write("plan.json", "[1]").unwrap();
    backend.write("plan.json", "[2]").unwrap();

    let on_disk = fs::read_to_string(backend.root().join("plan.json")).unwrap();
    assert_eq!(on_disk, "[2]");

    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_lists_only_json_sorted() {
    let (_dir, backend) = setup();
    backend.write("zeta.json", "[]").unwrap();
    backend.write("alpha.json", "[]").unwrap();
    fs::write(backend.root().join("notes.txt"), "x").unwrap();
    fs::create_dir(backend.root().join("sub.json")).unwrap();

    assert_eq!(backend.list().unwrap(), vec!["alpha.json", "zeta.json"]);
}

#[test]
fn test_fs_backend_list_without_directory() {
    let (_dir, backend) = setup();
    assert!(backend.list().unwrap().is_empty());
}

#[test]
fn test_forest_round_trip_through_disk() {
    let (_dir, backend) = setup();
    let forest = Forest::new(vec![Node::new("Docs")
        .with_id("docs")
        .with_children(vec![Node::new("2024").with_id("y24")])]);

    save_forest(&backend, "estructura", &forest).unwrap();

    let text = fs::read_to_string(backend.root().join("estructura.json")).unwrap();
    assert!(text.contains("\"name\": \"Docs\""), "stored pretty: {}", text);
    assert_eq!(load_forest(&backend, "estructura.json").unwrap(), forest);
}

#[test]
fn test_legacy_document_is_backfilled_on_load() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(
        backend.root().join("legacy.json"),
        r#"[{"name": "Docs", "children": [{"name": "Q1", "reviewed": true}]}]"#,
    )
    .unwrap();

    let forest = load_forest(&backend, "legacy").unwrap();
    let docs = &forest.roots[0];
    assert!(!docs.id.is_empty());
    assert!(!docs.collapsed);
    assert!(docs.children[0].reviewed);
    assert_ne!(docs.id, docs.children[0].id);
}
