use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::{ContactError, ContactResult};
use crate::model::Contact;
use crate::store::file::json_kind;
use crate::store::{insert_with_new_id, write_json_atomic, ContactStore};

/// Merges contacts from a JSON file into the store.
///
/// The file may hold an object (values are records) or an array of records.
/// Every record gets a fresh id; whatever id it carried is discarded. The
/// whole file is parsed before anything is inserted, and the merged map only
/// replaces the store once it has been saved, so any error leaves the store
/// unchanged. Records without a name are rejected. Returns the number of
/// contacts imported.
pub fn import_contacts(store: &mut ContactStore, path: &Path) -> ContactResult<usize> {
    if !path.exists() {
        return Err(ContactError::FileNotFound(path.to_path_buf()));
    }

    let json_str = std::fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&json_str)?;
    let records = parse_records(json)?;

    let imported = records.len();
    store.apply(|contacts| {
        for contact in records {
            insert_with_new_id(contacts, contact);
        }
    })?;

    info!(path = %path.display(), imported = imported, "imported contacts");
    Ok(imported)
}

/// Writes every contact, in id order, to `path` as a JSON array.
/// The store is not modified. Returns the number of contacts exported.
pub fn export_contacts(store: &ContactStore, path: &Path) -> ContactResult<usize> {
    if path.as_os_str().is_empty() {
        return Err(ContactError::BlankField {
            field: "export path".into(),
        });
    }

    let contacts: Vec<&Contact> = store.contacts().values().collect();
    write_json_atomic(path, &contacts)?;

    info!(path = %path.display(), exported = contacts.len(), "exported contacts");
    Ok(contacts.len())
}

fn parse_records(json: Value) -> ContactResult<Vec<Contact>> {
    match json {
        Value::Object(entries) => entries
            .into_iter()
            .map(|(key, value)| parse_record(key, value))
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, value)| parse_record(index.to_string(), value))
            .collect(),
        other => Err(ContactError::UnsupportedFormat(json_kind(&other).into())),
    }
}

fn parse_record(index: String, mut value: Value) -> ContactResult<Contact> {
    // Structs also deserialize from arrays; only objects are records here.
    if !value.is_object() {
        let reason = format!("expected an object, found {}", json_kind(&value));
        return Err(invalid_record(index, reason));
    }
    // Foreign ids are discarded whatever their type.
    if let Some(fields) = value.as_object_mut() {
        fields.remove("id");
    }

    let contact: Contact = serde_json::from_value(value)
        .map_err(|source| ContactError::InvalidRecord {
            index: index.clone(),
            source,
        })?;
    if contact.name.trim().is_empty() {
        return Err(invalid_record(index, "name cannot be blank".to_string()));
    }
    Ok(contact)
}

fn invalid_record(index: String, reason: String) -> ContactError {
    ContactError::InvalidRecord {
        index,
        source: serde::de::Error::custom(reason),
    }
}
