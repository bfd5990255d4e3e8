//! Filtering the card listing by company.

use std::collections::HashSet;
use std::fmt;

use crate::card::CardRow;

/// Label of the "every company" choice.
pub const ALL_LABEL: &str = "all";

/// Which cards to show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CompanyFilter {
    /// Every card.
    #[default]
    All,
    /// Only cards whose company name equals this exactly.
    Company(String),
}

impl From<Option<String>> for CompanyFilter {
    /// `None` and the [`ALL_LABEL`] choice both select every card.
    fn from(company: Option<String>) -> Self {
        match company {
            Some(name) if name != ALL_LABEL => Self::Company(name),
            _ => Self::All,
        }
    }
}

impl fmt::Display for CompanyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_LABEL}"),
            Self::Company(name) => write!(f, "{name}"),
        }
    }
}

impl CompanyFilter {
    /// Whether `row` passes this filter.
    #[must_use]
    pub fn matches(&self, row: &CardRow) -> bool {
        match self {
            Self::All => true,
            Self::Company(name) => row.company == *name,
        }
    }

    /// Keep the rows that pass, in their original order.
    #[must_use]
    pub fn apply(&self, rows: &[CardRow]) -> Vec<CardRow> {
        rows.iter().filter(|row| self.matches(row)).cloned().collect()
    }
}

/// Distinct company names in order of first appearance in `rows`.
#[must_use]
pub fn company_choices(rows: &[CardRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(row.company.as_str()))
        .map(|row| row.company.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    fn row(card_id: i64, company: &str, person_name: &str) -> CardRow {
        CardRow {
            card_id,
            company: company.to_string(),
            person_name: person_name.to_string(),
            role: "不明".to_string(),
            registered_at: Utc::now(),
        }
    }

    fn rows() -> Vec<CardRow> {
        vec![
            row(2, "Acme", "Jane"),
            row(3, "Acme", "John"),
            row(1, "Globex", "Hank"),
        ]
    }

    #[test]
    fn test_all_returns_every_row() {
        assert_eq!(CompanyFilter::All.apply(&rows()), rows());
    }

    #[test]
    fn test_company_returns_exact_subset() {
        let filtered = CompanyFilter::Company("Acme".to_string()).apply(&rows());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.company == "Acme"));
    }

    #[test]
    fn test_company_match_is_exact() {
        let filtered = CompanyFilter::Company("acme".to_string()).apply(&rows());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CompanyFilter::from(None), CompanyFilter::All);
        assert_eq!(
            CompanyFilter::from(Some("Acme".to_string())),
            CompanyFilter::Company("Acme".to_string())
        );
    }

    #[test]
    fn test_all_label_selects_every_row() {
        let filter = CompanyFilter::from(Some(ALL_LABEL.to_string()));
        assert_eq!(filter, CompanyFilter::All);
        assert_eq!(filter.apply(&rows()).len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(CompanyFilter::All.to_string(), "all");
        assert_eq!(CompanyFilter::Company("Acme".to_string()).to_string(), "Acme");
    }

    #[test]
    fn test_company_choices_unique_in_order() {
        assert_eq!(company_choices(&rows()), vec!["Acme", "Globex"]);
        assert!(company_choices(&[]).is_empty());
    }
}
