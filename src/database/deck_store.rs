//! Soft-failing deck persistence plus the edit-screen copy of the deck.

use super::DeckBackend;
use crate::models::{Card, Deck, ValidationError};
use std::collections::BTreeSet;

pub struct DeckStore {
    backend: Box<dyn DeckBackend>,
    deck: Deck,
}

impl DeckStore {
    /// Wraps a backend and reads the current deck from it.
    pub fn new(backend: Box<dyn DeckBackend>) -> Self {
        let mut store = Self {
            backend,
            deck: Deck::default(),
        };
        store.deck = Deck::new(store.load());
        store
    }

    /// Cards as last loaded or edited, in display order.
    pub fn cards(&self) -> &[Card] {
        &self.deck.cards
    }

    /// Reads the persisted deck. Missing or unreadable data gives an empty deck;
    /// repeated ids are replaced so every card can be told apart.
    pub fn load(&self) -> Vec<Card> {
        match self.backend.read_cards() {
            Ok(Some(cards)) => {
                let mut deck = Deck::new(cards);
                let renamed = deck.dedupe_ids();
                if renamed > 0 {
                    log::warn!(
                        "Deck in {} repeats card ids; gave {} cards new ids",
                        self.backend.describe(),
                        renamed
                    );
                }
                log::debug!(
                    "Loaded {} cards from {}",
                    deck.cards.len(),
                    self.backend.describe()
                );
                deck.cards
            }
            Ok(None) => {
                log::debug!("No deck saved in {} yet", self.backend.describe());
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load deck from {}: {}; starting empty",
                    self.backend.describe(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Re-reads the edit-screen copy from storage.
    pub fn reload(&mut self) {
        self.deck = Deck::new(self.load());
    }

    /// Replaces the deck and writes it out. The in-memory copy is updated even
    /// when the write fails; returns whether the write went through.
    pub fn save(&mut self, cards: Vec<Card>) -> bool {
        self.deck = Deck::new(cards);
        self.persist()
    }

    /// Validates and adds a card on top of the deck.
    pub fn add_card(&mut self, prompt: &str, answer: &str) -> Result<Card, ValidationError> {
        let card = Card::validated(prompt, answer)?;
        self.deck.insert_front(card.clone());
        self.persist();
        Ok(card)
    }

    /// Removes the cards at `positions` in one batch.
    pub fn remove_cards(&mut self, positions: &BTreeSet<usize>) -> usize {
        let removed = self.deck.remove_positions(positions);
        self.persist();
        removed
    }

    /// Adds imported cards on top of the deck. Returns how many were kept.
    pub fn import_cards(&mut self, cards: Vec<Card>) -> usize {
        let added = self.deck.merge_front(cards);
        if added > 0 {
            self.persist();
        }
        added
    }

    fn persist(&self) -> bool {
        match self.backend.write_cards(&self.deck.cards) {
            Ok(()) => {
                log::debug!(
                    "Saved {} cards to {}",
                    self.deck.cards.len(),
                    self.backend.describe()
                );
                true
            }
            Err(e) => {
                log::error!(
                    "Failed to save deck to {}: {}",
                    self.backend.describe(),
                    e
                );
                false
            }
        }
    }
}
