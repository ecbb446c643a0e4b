use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identity of a physical card within one deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u16);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Builds a card with its standard-deck identity (suit-major, jokers last).
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        let id = match rank {
            Rank::SmallJoker => 52,
            Rank::BigJoker => 53,
            _ => (suit as u16) * 13 + (rank as u16 - Rank::Three as u16),
        };
        let suit = if rank.is_joker() { Suit::Joker } else { suit };
        Self {
            id: CardId(id),
            rank,
            suit,
        }
    }

    pub const fn joker(rank: Rank) -> Self {
        Self::new(rank, Suit::Joker)
    }

    /// Card with an identity assigned by an external dealer.
    pub const fn with_id(id: CardId, rank: Rank, suit: Suit) -> Self {
        Self { id, rank, suit }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Parses a compact code such as `"7S"`, `"10H"`, `"SJ"` or `"BJ"` into its standard card.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        match code.to_ascii_uppercase().as_str() {
            "SJ" => return Some(Card::joker(Rank::SmallJoker)),
            "BJ" => return Some(Card::joker(Rank::BigJoker)),
            _ => {}
        }
        let split = code.len().checked_sub(1)?;
        if !code.is_char_boundary(split) {
            return None;
        }
        let (rank, suit) = code.split_at(split);
        let suit = Suit::from_label(suit).filter(|suit| *suit != Suit::Joker)?;
        let rank = Rank::from_label(rank).filter(|rank| !rank.is_joker())?;
        Some(Card::new(rank, suit))
    }
}

/// Parses whitespace-separated card codes; `None` if any code is malformed.
pub fn parse_cards(codes: &str) -> Option<Vec<Card>> {
    codes.split_whitespace().map(Card::from_code).collect()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Card as handed over by the dealing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: u16,
    pub suit: String,
    pub rank: String,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardRecordError {
    #[error("unknown suit '{0}'")]
    UnknownSuit(String),
    #[error("unknown rank '{0}'")]
    UnknownRank(String),
    #[error("rank {rank} has value {expected}, record says {actual}")]
    ValueMismatch { rank: Rank, expected: u8, actual: u8 },
    #[error("suit {suit:?} cannot carry rank {rank}")]
    SuitMismatch { suit: Suit, rank: Rank },
}

impl TryFrom<CardRecord> for Card {
    type Error = CardRecordError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let suit =
            Suit::from_label(&record.suit).ok_or(CardRecordError::UnknownSuit(record.suit))?;
        let rank =
            Rank::from_label(&record.rank).ok_or(CardRecordError::UnknownRank(record.rank))?;
        if rank.value() != record.value {
            return Err(CardRecordError::ValueMismatch {
                rank,
                expected: rank.value(),
                actual: record.value,
            });
        }
        if rank.is_joker() != (suit == Suit::Joker) {
            return Err(CardRecordError::SuitMismatch { suit, rank });
        }
        Ok(Card::with_id(CardId(record.id), rank, suit))
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let suit = match card.suit {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
            Suit::Joker => "joker",
        };
        CardRecord {
            id: card.id.0,
            suit: suit.to_string(),
            rank: card.rank.to_string(),
            value: card.value(),
        }
    }
}
