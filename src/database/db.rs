//! SQLite storage for the deck
//!
//! The deck is kept as one JSON document in a key/value `app_state` table,
//! so every save replaces the whole list in a single statement.

use super::{DeckBackend, Result};
use crate::models::Card;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Row key the deck is stored under.
pub const CARDS_KEY: &str = "cards";

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, handy for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        init_database(&conn)?;
        Ok(Self { conn })
    }
}

/// Creates the key/value table used for the deck.
pub fn init_database(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

impl DeckBackend for SqliteBackend {
    fn read_cards(&self) -> Result<Option<Vec<Card>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![CARDS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write_cards(&self, cards: &[Card]) -> Result<()> {
        let json = serde_json::to_string(cards)?;

        self.conn.execute(
            "INSERT INTO app_state (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![CARDS_KEY, json],
        )?;

        Ok(())
    }

    fn describe(&self) -> String {
        match self.conn.path() {
            Some(path) if !path.is_empty() => format!("sqlite {}", path),
            _ => "sqlite (in memory)".to_string(),
        }
    }
}
