use crate::error::{ContactError, ContactResult};
use crate::model::{Contact, ContactField, ContactUpdate, NewContact, UpdateOutcome};
use crate::store::{insert_with_new_id, ContactStore};
use crate::validation::{self, trim_optional};

/// Validates and inserts a new contact, then persists the store. If the save
/// fails the store is left without the new contact.
///
/// An invalid non-empty phone or email is an error and nothing is inserted;
/// callers that want to drop a bad field must clear it first.
pub fn add_contact(store: &mut ContactStore, new: NewContact) -> ContactResult<Contact> {
    let name = validation::non_blank(&new.name, "name")?;
    let phone = validation::optional_phone(&new.phone)?;
    let email = validation::optional_email(&new.email)?;

    let mut contact = Contact::create(name);
    contact.phone = phone;
    contact.email = email;
    contact.address = new.address.trim().to_string();
    contact.notes = new.notes.trim().to_string();

    store.apply(|contacts| {
        let id = insert_with_new_id(contacts, contact);
        contacts[&id].clone()
    })
}

/// All contacts ordered by lowercased name, then by numeric id.
pub fn list_contacts(store: &ContactStore) -> Vec<&Contact> {
    let mut contacts: Vec<&Contact> = store.contacts().values().collect();
    contacts.sort_by(|a, b| {
        a.sort_key()
            .cmp(&b.sort_key())
            .then_with(|| id_order(&a.id).cmp(&id_order(&b.id)))
    });
    contacts
}

pub fn find_contact<'a>(store: &'a ContactStore, id: &str) -> ContactResult<&'a Contact> {
    get_contact(store, id.trim())
}

/// Case-insensitive substring search over name, phone and email.
pub fn search_contacts<'a>(store: &'a ContactStore, term: &str) -> ContactResult<Vec<&'a Contact>> {
    let term = term.trim();
    if term.is_empty() {
        return Err(ContactError::EmptySearch);
    }
    Ok(list_contacts(store)
        .into_iter()
        .filter(|c| c.matches(term))
        .collect())
}

/// Applies every non-blank field of `update` and persists once.
///
/// An invalid phone or email keeps the old value and is reported in
/// [`UpdateOutcome::rejected`]; the other fields are still applied.
pub fn update_contact(
    store: &mut ContactStore,
    id: &str,
    update: ContactUpdate,
) -> ContactResult<UpdateOutcome> {
    let id = id.trim();
    let mut contact = get_contact(store, id)?.clone();
    let mut rejected = Vec::new();

    if let Some(name) = trim_optional(update.name.as_deref()) {
        contact.name = name;
    }
    if let Some(phone) = trim_optional(update.phone.as_deref()) {
        if validation::validate_phone(&phone) {
            contact.phone = phone;
        } else {
            rejected.push(ContactField::Phone);
        }
    }
    if let Some(email) = trim_optional(update.email.as_deref()) {
        if validation::validate_email(&email) {
            contact.email = email;
        } else {
            rejected.push(ContactField::Email);
        }
    }
    if let Some(address) = trim_optional(update.address.as_deref()) {
        contact.address = address;
    }
    if let Some(notes) = trim_optional(update.notes.as_deref()) {
        contact.notes = notes;
    }

    store.apply(|contacts| contacts.insert(contact.id.clone(), contact.clone()))?;
    Ok(UpdateOutcome { contact, rejected })
}

/// Removes a contact and persists. A missing id or a failed save leaves the
/// store untouched.
pub fn delete_contact(store: &mut ContactStore, id: &str) -> ContactResult<Contact> {
    let id = id.trim();
    let removed = get_contact(store, id)?.clone();
    store.apply(|contacts| contacts.remove(id))?;
    Ok(removed)
}

fn get_contact<'a>(store: &'a ContactStore, id: &str) -> ContactResult<&'a Contact> {
    store
        .get(id)
        .ok_or_else(|| ContactError::NotFound { id: id.to_string() })
}

// Numeric ids sort numerically; anything else after them, lexically.
fn id_order(id: &str) -> (u64, &str) {
    (id.parse().unwrap_or(u64::MAX), id)
}
