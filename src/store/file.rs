use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ContactError, ContactResult};
use crate::model::Contact;

use super::ContactMap;

/// Loads the contacts file at `path`.
///
/// Never fails: a missing file is an empty book, and an unreadable or
/// malformed file is logged and treated as empty. A legacy file holding a
/// JSON array is converted to the id-keyed map.
pub fn load_contacts(path: &Path) -> ContactMap {
    if !path.exists() {
        debug!(path = %path.display(), "no contacts file yet");
        return ContactMap::new();
    }

    match read_contacts(path) {
        Ok(map) => map,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "contacts file corrupted or unreadable, starting fresh"
            );
            ContactMap::new()
        }
    }
}

fn read_contacts(path: &Path) -> ContactResult<ContactMap> {
    let text = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&text)?;

    match json {
        Value::Object(entries) => Ok(contacts_from_object(entries)),
        Value::Array(items) => {
            warn!(path = %path.display(), records = items.len(), "converting legacy list-format contacts file");
            Ok(contacts_from_legacy_list(items))
        }
        other => Err(ContactError::UnsupportedFormat(json_kind(&other).into())),
    }
}

fn contacts_from_object(entries: serde_json::Map<String, Value>) -> ContactMap {
    let mut map = ContactMap::new();
    for (key, value) in entries {
        match serde_json::from_value::<Contact>(value) {
            Ok(mut contact) => {
                // The key is authoritative.
                contact.id = key.clone();
                map.insert(key, contact);
            }
            Err(e) => warn!(id = %key, error = %e, "skipping malformed contact record"),
        }
    }
    map
}

/// Keys each element by its embedded id, falling back to its position.
/// Later duplicates replace earlier ones.
fn contacts_from_legacy_list(items: Vec<Value>) -> ContactMap {
    let mut map = ContactMap::new();
    for (index, value) in items.into_iter().enumerate() {
        match serde_json::from_value::<Contact>(value) {
            Ok(mut contact) => {
                let key = if contact.id.trim().is_empty() {
                    index.to_string()
                } else {
                    contact.id.trim().to_string()
                };
                contact.id = key.clone();
                map.insert(key, contact);
            }
            Err(e) => warn!(index = index, error = %e, "skipping malformed legacy contact record"),
        }
    }
    map
}

/// Writes the whole map to `path` via a temp file and rename.
pub fn save_contacts(path: &Path, contacts: &ContactMap) -> ContactResult<()> {
    write_json_atomic(path, contacts)?;
    debug!(path = %path.display(), contacts = contacts.len(), "saved contacts");
    Ok(())
}

/// Serializes `value` with 2-space indentation into `<path>.tmp`, syncs it,
/// and renames it over `path`. A crash mid-write leaves `path` untouched.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> ContactResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = temp_path(path);

    let result = write_then_rename(&tmp_path, path, json.as_bytes());
    if result.is_err() && tmp_path.exists() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), error = %e, "could not remove temp file");
        }
    }
    result
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> ContactResult<()> {
    let mut file = File::create(tmp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Human-readable name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
