use crate::model::card::{Card, CardId};
use std::vec::Vec;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|c| c.id == card.id) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.contains_id(card.id)
    }

    pub fn contains_id(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn get(&self, id: CardId) -> Option<Card> {
        self.cards.iter().copied().find(|c| c.id == id)
    }

    /// Resolves ids to owned cards; `None` if any id is missing or repeated.
    pub fn select(&self, ids: &[CardId]) -> Option<Vec<Card>> {
        let mut selected: Vec<Card> = Vec::with_capacity(ids.len());
        for &id in ids {
            if selected.iter().any(|c| c.id == id) {
                return None;
            }
            selected.push(self.get(id)?);
        }
        Some(selected)
    }

    /// True when every card is owned and no identity repeats.
    pub fn holds_all(&self, cards: &[Card]) -> bool {
        cards.iter().enumerate().all(|(i, card)| {
            self.contains(*card) && !cards[..i].iter().any(|other| other.id == card.id)
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)));
    }
}
