//! Storage layer for cardfile.
//!
//! This module provides `SQLite`-based persistent storage for companies and
//! the business cards that reference them.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::card::{Card, CardFields, CardRow, Company, Registration};
use crate::error::{Error, Result};

const MEMORY_PATH: &str = ":memory:";

/// Storage engine for companies and cards.
///
/// Holds the single connection used for the lifetime of the process.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!("Journal mode: {journal_mode}");
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::bootstrap(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(MEMORY_PATH),
            source,
        })?;

        Self::bootstrap(&conn)?;

        Ok(Self {
            path: PathBuf::from(MEMORY_PATH),
            conn,
        })
    }

    fn bootstrap(conn: &Connection) -> Result<()> {
        conn.pragma_update(None, "foreign_keys", true)?;
        migrations::initialize_schema(conn)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a company if absent and return its id.
    ///
    /// The boolean is `true` when this call created the row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn upsert_company(&self, name: &str) -> Result<(i64, bool)> {
        upsert_company(&self.conn, name)
    }

    /// Register a card: upsert its company by name, then insert the card.
    ///
    /// Both statements run in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails; nothing is written
    /// in that case.
    pub fn register(&self, fields: &CardFields) -> Result<Registration> {
        let tx = self.conn.unchecked_transaction()?;

        let (company_id, company_created) = upsert_company(&tx, &fields.company)?;
        tx.execute(
            r"
            INSERT INTO cards (company_id, person_name, role, registered_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                company_id,
                fields.person_name,
                fields.role,
                Utc::now().to_rfc3339(),
            ],
        )?;
        let card_id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            card_id,
            company_id,
            company_created,
            "Registered card for {}",
            fields.company
        );
        Ok(Registration {
            card_id,
            company_id,
            company_created,
        })
    }

    /// Get a card by its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_card(&self, id: i64) -> Result<Option<Card>> {
        let card = self
            .conn
            .query_row(
                r"
                SELECT id, company_id, person_name, role, email, registered_at
                FROM cards WHERE id = ?1
                ",
                [id],
                Self::row_to_card,
            )
            .optional()?;
        Ok(card)
    }

    /// Look up a company by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_company(&self, name: &str) -> Result<Option<Company>> {
        let company = self
            .conn
            .query_row(
                "SELECT id, name FROM companies WHERE name = ?1",
                [name],
                |row| {
                    Ok(Company {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(company)
    }

    /// All companies, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn companies(&self) -> Result<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM companies ORDER BY name")?;

        let companies = stmt
            .query_map([], |row| {
                Ok(Company {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(companies)
    }

    /// Every card joined with its company name, ordered by company name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_cards(&self) -> Result<Vec<CardRow>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT p.id, c.name, p.person_name, p.role, p.registered_at
            FROM cards p
            JOIN companies c ON p.company_id = c.id
            ORDER BY c.name, p.id
            ",
        )?;

        let rows = stmt
            .query_map([], Self::row_to_card_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Count stored companies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_companies(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count stored cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count_cards(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let db_size_bytes = if self.path.as_os_str() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            companies: self.count_companies()?,
            cards: self.count_cards()?,
            db_size_bytes,
        })
    }

    fn row_to_card(row: &rusqlite::Row) -> rusqlite::Result<Card> {
        let registered_at: String = row.get(5)?;
        Ok(Card {
            id: row.get(0)?,
            company_id: row.get(1)?,
            person_name: row.get(2)?,
            role: row.get(3)?,
            email: row.get(4)?,
            registered_at: parse_timestamp(&registered_at),
        })
    }

    fn row_to_card_row(row: &rusqlite::Row) -> rusqlite::Result<CardRow> {
        let registered_at: String = row.get(4)?;
        Ok(CardRow {
            card_id: row.get(0)?,
            company: row.get(1)?,
            person_name: row.get(2)?,
            role: row.get(3)?,
            registered_at: parse_timestamp(&registered_at),
        })
    }
}

/// `INSERT OR IGNORE` the company, then look up its canonical id.
fn upsert_company(conn: &Connection, name: &str) -> Result<(i64, bool)> {
    let inserted = conn.execute("INSERT OR IGNORE INTO companies (name) VALUES (?1)", [name])?;
    let id: i64 = conn.query_row(
        "SELECT id FROM companies WHERE name = ?1",
        [name],
        |row| row.get(0),
    )?;

    if inserted > 0 {
        debug!("Created company {id} ({name})");
    }
    Ok((id, inserted > 0))
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            warn!("Unreadable timestamp '{value}' ({e}); using the Unix epoch");
            DateTime::<Utc>::UNIX_EPOCH
        }
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of companies.
    pub companies: i64,
    /// Number of cards.
    pub cards: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
