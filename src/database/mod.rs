//! Persistence for the deck
//!
//! A [`DeckBackend`] knows how to read and write the full card list in one
//! place. [`DeckStore`] sits on top of a backend, keeps the edit-screen copy
//! of the deck and turns storage failures into log lines instead of errors.

pub mod db;
pub mod deck_store;
pub mod json_file;

use crate::models::Card;
use thiserror::Error;

pub use db::SqliteBackend;
pub use deck_store::DeckStore;
pub use json_file::JsonFileBackend;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable home of the deck. Reads and writes always cover the whole list.
pub trait DeckBackend {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn read_cards(&self) -> Result<Option<Vec<Card>>>;

    /// Replaces the stored deck. A failed write must leave the previous deck
    /// intact.
    fn write_cards(&self, cards: &[Card]) -> Result<()>;

    /// Short label for log lines.
    fn describe(&self) -> String;
}
