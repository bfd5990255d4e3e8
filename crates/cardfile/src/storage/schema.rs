//! `SQLite` schema definitions for cardfile.

/// SQL statement to create the companies table.
pub const CREATE_COMPANIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)
";

/// SQL statement to create the cards table.
pub const CREATE_CARDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS cards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company_id INTEGER NOT NULL REFERENCES companies(id),
    person_name TEXT NOT NULL,
    role TEXT NOT NULL,
    email TEXT,
    registered_at TEXT NOT NULL
)
";

/// SQL statement to create an index on `company_id` for the join.
pub const CREATE_COMPANY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_cards_company ON cards(company_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_COMPANIES_TABLE,
    CREATE_CARDS_TABLE,
    CREATE_COMPANY_INDEX,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_companies_name_is_unique() {
        assert!(CREATE_COMPANIES_TABLE.contains("name TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_cards_reference_companies() {
        assert!(CREATE_CARDS_TABLE.contains("REFERENCES companies(id)"));
        assert!(CREATE_CARDS_TABLE.contains("email TEXT,"));
    }

    #[test]
    fn test_companies_created_before_cards() {
        let companies = SCHEMA_STATEMENTS
            .iter()
            .position(|s| *s == CREATE_COMPANIES_TABLE);
        let cards = SCHEMA_STATEMENTS
            .iter()
            .position(|s| *s == CREATE_CARDS_TABLE);
        assert!(companies < cards);
    }
}
