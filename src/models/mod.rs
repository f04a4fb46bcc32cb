pub mod card;
pub mod deck;
pub mod session_controller;
pub mod ticker;

pub use card::{Card, ValidationError};
pub use deck::Deck;
pub use session_controller::{
    DEFAULT_SESSION_SECONDS, Judgment, ScenePhase, SessionController, SessionError, SessionEvent,
    SessionState,
};
pub use ticker::Ticker;
