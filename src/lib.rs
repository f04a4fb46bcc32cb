pub mod config;
pub mod database;
pub mod export;
pub mod models;

pub use config::Config;
pub use database::DeckStore;
pub use models::{Card, Deck, SessionController, SessionState};
