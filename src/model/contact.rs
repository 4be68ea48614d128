use serde::{Deserialize, Deserializer, Serialize};

/// A single entry in the contact book.
///
/// Optional fields are plain strings; an empty string means "not set". Missing
/// fields and JSON `null` both deserialize to the empty string so that
/// hand-edited or partial files load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

impl Contact {
    /// A contact with only a name. The id is assigned when it enters a store.
    pub fn create(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Case-insensitive substring match over name, phone and email.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        let haystack = format!(
            "{} {} {}",
            self.name.to_lowercase(),
            self.phone,
            self.email.to_lowercase()
        );
        haystack.contains(&term)
    }

    /// Key used for listing: lowercased name.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// User input for a new contact. Fields are taken verbatim and trimmed by the
/// add operation.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl NewContact {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Field changes for an existing contact. `None` or a blank value keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Fields that can be rejected during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
    Email,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Phone => "phone",
            ContactField::Email => "email",
        }
    }
}

/// Result of an update: the contact as saved plus any fields whose new value
/// was rejected and left unchanged.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub contact: Contact,
    pub rejected: Vec<ContactField>,
}

// Older files and other tools write numeric ids; keep them as strings.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
