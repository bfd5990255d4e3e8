//! Core record types for cardfile.
//!
//! A [`Company`] owns zero or more [`Card`]s. Companies are created implicitly
//! the first time a card names them and are never updated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Identifier assigned by the storage layer.
    pub id: i64,
    /// Unique company name.
    pub name: String,
}

/// A stored business card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Identifier assigned by the storage layer.
    pub id: i64,
    /// The owning company.
    pub company_id: i64,
    /// Name of the person on the card.
    pub person_name: String,
    /// Job title.
    pub role: String,
    /// Present in the schema, never written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// When the card was registered.
    pub registered_at: DateTime<Utc>,
}

/// Editable card fields, as extracted from OCR text and confirmed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    /// Company name.
    pub company: String,
    /// Person name.
    pub person_name: String,
    /// Job title.
    pub role: String,
}

impl CardFields {
    /// Fields with every value set to `placeholder`.
    #[must_use]
    pub fn placeholder(placeholder: &str) -> Self {
        Self {
            company: placeholder.to_string(),
            person_name: placeholder.to_string(),
            role: placeholder.to_string(),
        }
    }

    /// Replace each field for which an override is given.
    #[must_use]
    pub fn with_overrides(
        mut self,
        company: Option<String>,
        person_name: Option<String>,
        role: Option<String>,
    ) -> Self {
        if let Some(company) = company {
            self.company = company;
        }
        if let Some(person_name) = person_name {
            self.person_name = person_name;
        }
        if let Some(role) = role {
            self.role = role;
        }
        self
    }
}

/// One row of the card listing: a card joined with its company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRow {
    /// Card identifier.
    pub card_id: i64,
    /// Name of the owning company.
    pub company: String,
    /// Person name.
    pub person_name: String,
    /// Job title.
    pub role: String,
    /// When the card was registered.
    pub registered_at: DateTime<Utc>,
}

/// Outcome of registering a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Identifier of the new card.
    pub card_id: i64,
    /// Identifier of the (possibly pre-existing) company.
    pub company_id: i64,
    /// Whether the company row was created by this registration.
    pub company_created: bool,
}
