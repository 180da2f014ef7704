use libcat_core::{Book, BookStatus, JsonFileStore, RecordStore, StoreError};
use std::fs;

fn sample_books() -> Vec<Book> {
    let mut issued = Book::new("id-2", "Emma", "Jane Austen", "1815");
    issued.status = BookStatus::Issued;
    vec![Book::new("id-1", "Dune", "Frank Herbert", "1965"), issued]
}

#[test]
fn missing_file_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_then_load_preserves_fields_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("library.json"));
    let books = sample_books();

    store.save(&books).unwrap();
    assert_eq!(store.load().unwrap(), books);
}

#[test]
fn save_overwrites_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("library.json"));

    store.save(&sample_books()).unwrap();
    store.save(&sample_books()[..1]).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "id-1");
}

#[test]
fn saved_document_is_a_pretty_json_array_of_string_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    JsonFileStore::new(&path).save(&sample_books()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n    {\n        \"id\": \"id-1\","));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["status"], "issued");
    for item in items {
        let object = item.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for key in ["id", "title", "author", "year", "status"] {
            assert!(object[key].is_string(), "{key} should be a string");
        }
    }
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("library.json");
    let store = JsonFileStore::new(&path);

    store.save(&sample_books()).unwrap();
    assert!(path.exists());
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("library.json"));

    store.save(&sample_books()).unwrap();
    store.save(&[]).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["library.json".to_string()]);
}

#[test]
fn reads_documents_written_by_other_tools() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(
        &path,
        r#"[{"id": "9c1f", "title": "Dune", "author": "Herbert", "year": "1965", "status": "issued"}]"#,
    )
    .unwrap();

    let books = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "9c1f");
    assert_eq!(books[0].status, BookStatus::Issued);
}

#[test]
fn malformed_documents_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let store = JsonFileStore::new(&path);

    let cases = [
        "",
        "   \n",
        "{not json",
        r#"{"id": "a"}"#,
        r#"[{"id": "a", "title": "t", "author": "a", "year": "1", "status": "lost"}]"#,
        r#"[{"id": "a", "title": "t", "author": "a", "status": "issued"}]"#,
        r#"[{"id": "a", "title": "t", "author": "a", "year": 1999, "status": "issued"}]"#,
    ];

    for case in cases {
        fs::write(&path, case).unwrap();
        let err = store.load().unwrap_err();
        assert!(
            matches!(err, StoreError::Parse { .. }),
            "expected parse error for {case:?}, got {err}"
        );
    }
}

#[test]
fn unreadable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Io { action: "read", .. }));
}
