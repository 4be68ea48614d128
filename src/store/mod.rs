pub mod file;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ContactResult;
use crate::model::Contact;

pub use file::{load_contacts, save_contacts, write_json_atomic};

/// Contact id → record, as persisted.
pub type ContactMap = BTreeMap<String, Contact>;

/// Returns the smallest positive integer, as a string, not already used as a key.
pub fn generate_id(contacts: &ContactMap) -> String {
    let mut candidate: u64 = 1;
    while contacts.contains_key(&candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

/// Gives `contact` a fresh id (overwriting any it carries), inserts it, and
/// returns the id.
pub fn insert_with_new_id(contacts: &mut ContactMap, mut contact: Contact) -> String {
    let id = generate_id(contacts);
    contact.id = id.clone();
    contacts.insert(id.clone(), contact);
    id
}

/// The in-memory contact book bound to its data file.
///
/// Loaded once with [`ContactStore::open`]. Mutations that must reach disk go
/// through [`ContactStore::apply`], which only commits in memory once the
/// save succeeded.
#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
    contacts: ContactMap,
}

impl ContactStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let contacts = load_contacts(&path);
        debug!(path = %path.display(), contacts = contacts.len(), "opened contact store");
        Self { path, contacts }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contacts(&self) -> &ContactMap {
        &self.contacts
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.contacts.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Assigns a fresh id (overwriting any id the record carries) and inserts it.
    /// Returns the new id.
    pub fn insert_new(&mut self, contact: Contact) -> String {
        insert_with_new_id(&mut self.contacts, contact)
    }

    pub fn remove(&mut self, id: &str) -> Option<Contact> {
        self.contacts.remove(id)
    }

    pub fn save(&self) -> ContactResult<()> {
        save_contacts(&self.path, &self.contacts)
    }

    /// Runs `change` on a copy of the map and persists the copy. The store is
    /// replaced only if the save succeeds; on error it is left as it was.
    pub fn apply<T>(&mut self, change: impl FnOnce(&mut ContactMap) -> T) -> ContactResult<T> {
        let mut next = self.contacts.clone();
        let out = change(&mut next);
        save_contacts(&self.path, &next)?;
        self.contacts = next;
        Ok(out)
    }
}
