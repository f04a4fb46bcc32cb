//! Deck is the ordered list of cards the user maintains on the edit screen
use super::Card;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// New cards go on top of the deck.
    pub fn insert_front(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Removes every card whose position is in `positions`. Positions past the
    /// end are ignored. Returns how many cards were removed.
    pub fn remove_positions(&mut self, positions: &BTreeSet<usize>) -> usize {
        let before = self.cards.len();
        let mut index = 0;
        self.cards.retain(|_| {
            let keep = !positions.contains(&index);
            index += 1;
            keep
        });
        before - self.cards.len()
    }

    /// Gives a fresh id to every card whose id already appeared earlier in the
    /// deck. Returns how many cards were renamed.
    pub fn dedupe_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut renamed = 0;
        for card in &mut self.cards {
            if !seen.insert(card.id) {
                card.id = Uuid::new_v4();
                seen.insert(card.id);
                renamed += 1;
            }
        }
        renamed
    }

    /// Puts `incoming` on top of the deck, keeping their order. Cards with a
    /// blank prompt or answer are dropped and ids already in use get replaced.
    /// Returns how many cards were added.
    pub fn merge_front(&mut self, incoming: Vec<Card>) -> usize {
        let mut seen: HashSet<_> = self.cards.iter().map(|card| card.id).collect();

        let accepted: Vec<Card> = incoming
            .into_iter()
            .filter_map(|card| {
                let mut fresh = Card::validated(&card.prompt, &card.answer).ok()?;
                if !seen.contains(&card.id) {
                    fresh.id = card.id;
                }
                seen.insert(fresh.id);
                Some(fresh)
            })
            .collect();

        let added = accepted.len();
        self.cards.splice(0..0, accepted);
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_deck() -> Deck {
        Deck::new(vec![
            Card::new("hello", "cześć"),
            Card::new("goodbye", "do widzenia"),
            Card::new("please", "proszę"),
        ])
    }

    #[test]
    fn test_insert_front() {
        let mut deck = create_test_deck();
        let card = Card::new("thank you", "dziękuję");

        deck.insert_front(card.clone());

        assert_eq!(deck.cards.len(), 4);
        assert_eq!(deck.cards[0], card);
    }

    #[test]
    fn test_remove_multiple_positions() {
        let mut deck = create_test_deck();
        let kept = deck.cards[1].clone();

        let removed = deck.remove_positions(&BTreeSet::from([0, 2]));

        assert_eq!(removed, 2);
        assert_eq!(deck.cards, vec![kept]);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut deck = create_test_deck();

        let removed = deck.remove_positions(&BTreeSet::from([3, 10]));

        assert_eq!(removed, 0);
        assert_eq!(deck.cards.len(), 3);
    }

    #[test]
    fn test_merge_front_keeps_order_and_unique_ids() {
        let mut deck = create_test_deck();
        let duplicate = deck.cards[0].clone();
        let new_card = Card::new("yes", "tak");

        let added = deck.merge_front(vec![new_card.clone(), duplicate.clone()]);

        assert_eq!(added, 2);
        assert_eq!(deck.cards.len(), 5);
        assert_eq!(deck.cards[0], new_card);
        assert_eq!(deck.cards[1].prompt, duplicate.prompt);
        assert_ne!(deck.cards[1].id, duplicate.id);

        let ids: HashSet<_> = deck.cards.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), deck.cards.len());
    }

    #[test]
    fn test_dedupe_ids_renames_later_repeats() {
        let first = Card::new("2+2", "4");
        let mut repeat = Card::new("3+3", "6");
        repeat.id = first.id;
        let mut deck = Deck::new(vec![first.clone(), repeat.clone(), Card::new("4+4", "8")]);

        let renamed = deck.dedupe_ids();

        assert_eq!(renamed, 1);
        assert_eq!(deck.cards[0], first);
        assert_eq!(deck.cards[1].prompt, repeat.prompt);
        assert_ne!(deck.cards[1].id, first.id);
        let ids: HashSet<_> = deck.cards.iter().map(|card| card.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_dedupe_ids_leaves_unique_deck_alone() {
        let mut deck = create_test_deck();
        let before = deck.clone();

        assert_eq!(deck.dedupe_ids(), 0);
        assert_eq!(deck, before);
    }

    #[test]
    fn test_merge_front_skips_blank_cards() {
        let mut deck = Deck::default();

        let added = deck.merge_front(vec![Card::new(" ", "nothing"), Card::new("no", "nie")]);

        assert_eq!(added, 1);
        assert_eq!(deck.cards[0].prompt, "no");
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let deck = Deck::new(vec![Card::new("2+2", "4")]);
        let json = serde_json::to_value(&deck).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["prompt"], "2+2");
    }
}
