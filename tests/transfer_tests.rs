use std::fs;

use contact_book::error::ContactError;
use contact_book::model::*;
use contact_book::ops::contact_ops;
use contact_book::store::ContactStore;
use contact_book::transfer::*;
use tempfile::TempDir;

fn setup() -> (TempDir, ContactStore) {
    let dir = TempDir::new().unwrap();
    let store = ContactStore::open(dir.path().join("contacts.json"));
    (dir, store)
}

fn seed(store: &mut ContactStore) {
    for (name, phone, email) in [
        ("Ada", "5551234567", "ada@example.com"),
        ("Grace", "", "grace@navy.mil"),
        ("Linus", "+358401234567", ""),
    ] {
        contact_ops::add_contact(
            store,
            NewContact {
                name: name.into(),
                phone: phone.into(),
                email: email.into(),
                ..NewContact::default()
            },
        )
        .unwrap();
    }
}

/// Records with ids blanked, sorted by name, for id-insensitive comparison.
fn without_ids(store: &ContactStore) -> Vec<Contact> {
    let mut records: Vec<Contact> = store
        .contacts()
        .values()
        .cloned()
        .map(|mut c| {
            c.id.clear();
            c
        })
        .collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));
    records
}

// ==========================================================================
// EXPORT TESTS
// ==========================================================================

#[test]
fn export_writes_json_array() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let out = dir.path().join("export.json");

    let exported = export_contacts(&store, &out).unwrap();
    assert_eq!(exported, 3);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[0]["name"], "Ada");
}

#[test]
fn export_does_not_touch_store() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let before = store.contacts().clone();
    let saved_before = fs::read_to_string(store.path()).unwrap();

    export_contacts(&store, &dir.path().join("export.json")).unwrap();

    assert_eq!(store.contacts(), &before);
    assert_eq!(fs::read_to_string(store.path()).unwrap(), saved_before);
}

#[test]
fn export_empty_store_writes_empty_array() {
    let (dir, store) = setup();
    let out = dir.path().join("export.json");
    assert_eq!(export_contacts(&store, &out).unwrap(), 0);
    assert_eq!(fs::read_to_string(&out).unwrap(), "[]");
}

#[test]
fn export_rejects_blank_path() {
    let (_dir, store) = setup();
    let result = export_contacts(&store, std::path::Path::new(""));
    assert!(matches!(result, Err(ContactError::BlankField { .. })));
}

// ==========================================================================
// IMPORT TESTS
// ==========================================================================

#[test]
fn export_then_import_into_empty_store_round_trips() {
    let (dir, mut source) = setup();
    seed(&mut source);
    let out = dir.path().join("export.json");
    export_contacts(&source, &out).unwrap();

    let mut target = ContactStore::open(dir.path().join("other.json"));
    let imported = import_contacts(&mut target, &out).unwrap();

    assert_eq!(imported, 3);
    assert_eq!(without_ids(&target), without_ids(&source));
}

#[test]
fn import_reassigns_ids_around_existing_contacts() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let input = dir.path().join("in.json");
    fs::write(
        &input,
        r#"[{"id": "1", "name": "Margaret"}, {"id": "2", "name": "Katherine"}]"#,
    )
    .unwrap();

    let imported = import_contacts(&mut store, &input).unwrap();

    assert_eq!(imported, 2);
    assert_eq!(store.len(), 5);
    assert_eq!(store.get("1").unwrap().name, "Ada");
    assert_eq!(store.get("4").unwrap().name, "Margaret");
    assert_eq!(store.get("5").unwrap().name, "Katherine");
    assert_eq!(store.get("5").unwrap().id, "5");
}

#[test]
fn import_discards_numeric_ids() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let input = dir.path().join("in.json");
    fs::write(&input, r#"[{"id": 1, "name": "Margaret"}, {"id": 2, "name": "Katherine"}]"#).unwrap();

    assert_eq!(import_contacts(&mut store, &input).unwrap(), 2);
    assert_eq!(store.get("1").unwrap().name, "Ada");
    assert_eq!(store.get("4").unwrap().name, "Margaret");
    assert_eq!(store.get("5").unwrap().name, "Katherine");
}

#[test]
fn import_accepts_object_of_partial_records() {
    let (dir, mut store) = setup();
    let input = dir.path().join("in.json");
    fs::write(
        &input,
        r#"{"a": {"name": "Ada", "email": "ada@example.com"}, "b": {"name": "Grace", "notes": null}}"#,
    )
    .unwrap();

    assert_eq!(import_contacts(&mut store, &input).unwrap(), 2);
    let ada = store.get("1").unwrap();
    assert_eq!(ada.name, "Ada");
    assert_eq!(ada.email, "ada@example.com");
    assert_eq!(ada.phone, "");
    assert_eq!(store.get("2").unwrap().notes, "");
}

#[test]
fn import_persists_once_after_insertions() {
    let (dir, mut store) = setup();
    let input = dir.path().join("in.json");
    fs::write(&input, r#"[{"name": "Ada"}, {"name": "Grace"}]"#).unwrap();

    import_contacts(&mut store, &input).unwrap();

    let reopened = ContactStore::open(store.path());
    assert_eq!(reopened.len(), 2);
}

#[test]
fn import_rejects_unsupported_shape_without_changes() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let before = store.contacts().clone();
    let input = dir.path().join("in.json");
    fs::write(&input, r#""just a string""#).unwrap();

    let result = import_contacts(&mut store, &input);
    assert!(matches!(result, Err(ContactError::UnsupportedFormat(_))));
    assert_eq!(store.contacts(), &before);
}

#[test]
fn import_rejects_file_with_non_record_element() {
    let (dir, mut store) = setup();
    let input = dir.path().join("in.json");
    fs::write(&input, r#"[{"name": "Ada"}, 17]"#).unwrap();

    let result = import_contacts(&mut store, &input);
    assert!(matches!(result, Err(ContactError::InvalidRecord { .. })));
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn import_missing_file_fails() {
    let (dir, mut store) = setup();
    let result = import_contacts(&mut store, &dir.path().join("missing.json"));
    assert!(matches!(result, Err(ContactError::FileNotFound(_))));
}

#[test]
fn import_malformed_json_fails() {
    let (dir, mut store) = setup();
    let input = dir.path().join("in.json");
    fs::write(&input, "[{").unwrap();

    let result = import_contacts(&mut store, &input);
    assert!(matches!(result, Err(ContactError::Json(_))));
    assert!(store.is_empty());
}

#[test]
fn import_rejects_record_without_name() {
    let (dir, mut store) = setup();
    seed(&mut store);
    let before = store.contacts().clone();
    let input = dir.path().join("in.json");
    fs::write(&input, r#"[{"name": "Margaret"}, {"email": "kj@nasa.gov"}]"#).unwrap();

    let result = import_contacts(&mut store, &input);
    assert!(matches!(result, Err(ContactError::InvalidRecord { ref index, .. }) if index == "1"));
    assert_eq!(store.contacts(), &before);
}

#[test]
fn import_failed_save_leaves_store_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut store = ContactStore::open(dir.path().join("nodir").join("contacts.json"));
    let input = dir.path().join("in.json");
    fs::write(&input, r#"[{"name": "Ada"}, {"name": "Grace"}]"#).unwrap();

    let result = import_contacts(&mut store, &input);
    assert!(matches!(result, Err(ContactError::Io(_))));
    assert!(store.is_empty());
}
