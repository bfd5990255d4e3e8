//! Mapping raw OCR text to card fields.
//!
//! The rule is positional: the first non-blank line is the company, the
//! second is the person. Nothing else is inferred.

use serde::{Deserialize, Serialize};

use crate::card::CardFields;

/// Placeholder used for fields the text does not supply ("unknown").
pub const DEFAULT_PLACEHOLDER: &str = "不明";

/// Extracted fields together with the OCR text they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Fields to prefill the confirmation form with.
    pub fields: CardFields,
    /// Unmodified OCR output.
    pub raw_text: String,
}

impl Extraction {
    /// Extract fields from `raw_text`, keeping the text alongside.
    #[must_use]
    pub fn from_text(raw_text: String, placeholder: &str) -> Self {
        let fields = extract_fields(&raw_text, placeholder);
        Self { fields, raw_text }
    }
}

/// Extract card fields from raw multi-line text.
///
/// Lines are trimmed and blank lines dropped. Line 1 becomes the company and
/// line 2 the person name; every field not filled, and always the role, is
/// left as `placeholder`.
#[must_use]
pub fn extract_fields(text: &str, placeholder: &str) -> CardFields {
    let mut lines = text.split('\n').map(str::trim).filter(|l| !l.is_empty());
    let mut fields = CardFields::placeholder(placeholder);

    if let Some(company) = lines.next() {
        fields.company = company.to_string();
    }
    if let Some(person_name) = lines.next() {
        fields.person_name = person_name.to_string();
    }

    fields
}
