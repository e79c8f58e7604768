//! Community, category and contact records.
//!
//! # Responsibility
//! - Mirror the dataset JSON shape (`camelCase` wire fields).
//! - Provide small read-only projections used by views (labels, full names).
//!
//! # Invariants
//! - `login_code` is unique across the dataset (checked at load time).
//! - Contact ids are exposed as strings even when the dataset stores numbers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

/// Role value that marks a contact as a category leader.
pub const LEADER_ROLE: &str = "Vadovas";

static GROUP_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+grupė$").expect("valid group suffix regex"));

/// Root of the bundled dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub communities: Vec<Community>,
}

/// Tenant unit with its own access code and contact categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    /// Shared plaintext access code; not a per-user credential.
    pub login_code: String,
    /// Opaque logo reference, passed through to the view layer.
    pub logo_path: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Community {
    /// Finds one category by exact id.
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    /// Total number of contacts across all categories.
    pub fn contact_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.contacts.len())
            .sum()
    }
}

/// Named grouping of contacts within a community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    /// Full name, including the optional ` grupė` suffix.
    pub name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Category {
    /// Short label for badges and tabs.
    ///
    /// Strips the trailing ` grupė` qualifier (`Elnių grupė` -> `Elnių`);
    /// names without the suffix are returned unchanged.
    pub fn label(&self) -> &str {
        match GROUP_SUFFIX_RE.find(&self.name) {
            Some(suffix) if suffix.start() > 0 => &self.name[..suffix.start()],
            _ => &self.name,
        }
    }
}

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Serialized as a string; numeric dataset ids are converted on load.
    #[serde(deserialize_with = "deserialize_contact_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-text role; [`LEADER_ROLE`] affects ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// External social-profile link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Contact {
    /// Creates a contact with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: None,
            role: None,
            facebook: None,
            secondary_role: None,
            tags: Vec::new(),
        }
    }

    /// `first last`, as shown on cards and used as the sort key.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether this contact carries the leader role.
    pub fn is_leader(&self) -> bool {
        self.role.as_deref() == Some(LEADER_ROLE)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireContactId {
    Text(String),
    Number(i64),
}

fn deserialize_contact_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match WireContactId::deserialize(deserializer)? {
        WireContactId::Text(value) => value,
        WireContactId::Number(value) => value.to_string(),
    })
}
