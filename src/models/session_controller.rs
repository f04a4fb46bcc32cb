//! Timed review session.
//!
//! Cards are reviewed from the front of the queue. A correct answer retires
//! the card, a wrong one puts a fresh copy back at the front. The countdown
//! only runs while the session is active; once the queue is empty or the time
//! is up, judgments are refused until the next reset.

use super::Card;
use crate::database::DeckStore;
use thiserror::Error;
use uuid::Uuid;

/// Session length used when nothing else is configured.
pub const DEFAULT_SESSION_SECONDS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// Clock stopped, cards still accept judgments.
    Paused,
    /// No cards left.
    Exhausted,
    /// Countdown reached zero with cards left.
    TimedOut,
}

impl SessionState {
    pub fn accepts_judgments(self) -> bool {
        matches!(self, SessionState::Running | SessionState::Paused)
    }
}

/// App lifecycle as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    Active,
    Inactive,
    Background,
}

/// Everything that drives the session from outside, besides judgments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second has elapsed.
    Tick,
    Lifecycle(ScenePhase),
}

/// Judgment that was not applied. Both cases are benign.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("card {0} is not in the session")]
    CardNotFound(Uuid),

    #[error("session is closed ({0:?})")]
    Closed(SessionState),
}

/// What a judgment did to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Judgment {
    Retired,
    /// The card went back to the front under a new id.
    Requeued(Card),
}

pub struct SessionController {
    cards: Vec<Card>,
    time_remaining: u32,
    is_active: bool,
    budget: u32,
}

impl SessionController {
    /// Creates an idle session with the given countdown length in seconds.
    /// Call [`SessionController::start`] to load cards.
    pub fn new(budget: u32) -> Self {
        Self {
            cards: Vec::new(),
            time_remaining: budget,
            is_active: false,
            budget,
        }
    }

    /// Loads a snapshot of the deck and restarts the countdown.
    pub fn start(&mut self, store: &DeckStore) {
        self.reset(store);
    }

    /// Same as [`SessionController::start`]; safe to call any number of times.
    pub fn reset(&mut self, store: &DeckStore) {
        self.restart_with(store.load());
    }

    /// Restarts the session on the given cards.
    pub fn restart_with(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.time_remaining = self.budget;
        // An empty deck never starts the clock.
        self.is_active = !self.cards.is_empty();
        log::info!(
            "Session started with {} cards and {}s on the clock",
            self.cards.len(),
            self.time_remaining
        );
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Tick => self.tick(),
            SessionEvent::Lifecycle(phase) => self.set_active(phase == ScenePhase::Active),
        }
    }

    /// Advances the countdown by one second unless the clock is stopped.
    pub fn tick(&mut self) {
        if !self.is_active {
            return;
        }
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
            if self.time_remaining == 0 {
                log::info!("Time is up with {} cards left", self.cards.len());
            }
        }
    }

    /// Starts or stops the clock. Starting is ignored when no cards are left.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active && !self.cards.is_empty();
    }

    /// Applies a correct/incorrect judgment to the card with `card_id`.
    pub fn judge(&mut self, card_id: Uuid, is_correct: bool) -> Result<Judgment, SessionError> {
        let state = self.state();
        if !state.accepts_judgments() {
            log::debug!("Ignoring judgment for {}: session is {:?}", card_id, state);
            return Err(SessionError::Closed(state));
        }

        let Some(index) = self.position_of(card_id) else {
            log::debug!("Ignoring judgment for {}: card already gone", card_id);
            return Err(SessionError::CardNotFound(card_id));
        };

        let card = self.cards.remove(index);
        let judgment = if is_correct {
            Judgment::Retired
        } else {
            let again = card.requeued();
            self.cards.insert(0, again.clone());
            Judgment::Requeued(again)
        };

        if self.cards.is_empty() {
            self.is_active = false;
            log::info!("All cards reviewed with {}s left", self.time_remaining);
        }

        Ok(judgment)
    }

    /// Zero-based position of a card, `None` once it has left the queue.
    pub fn position_of(&self, card_id: Uuid) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }

    /// Card to review next.
    pub fn front(&self) -> Option<&Card> {
        self.cards.first()
    }

    pub fn current_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_timer_active(&self) -> bool {
        self.is_active
    }

    pub fn state(&self) -> SessionState {
        if self.cards.is_empty() {
            SessionState::Exhausted
        } else if self.time_remaining == 0 {
            SessionState::TimedOut
        } else if self.is_active {
            SessionState::Running
        } else {
            SessionState::Paused
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SECONDS)
    }
}
