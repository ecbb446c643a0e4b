use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
    Joker = 4,
}

impl Suit {
    /// Suits carrying the thirteen regular ranks.
    pub const STANDARD: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Hearts),
            3 => Some(Suit::Spades),
            4 => Some(Suit::Joker),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "c" | "clubs" => Some(Suit::Clubs),
            "d" | "diamonds" => Some(Suit::Diamonds),
            "h" | "hearts" => Some(Suit::Hearts),
            "s" | "spades" => Some(Suit::Spades),
            "joker" => Some(Suit::Joker),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
            Suit::Joker => "",
        };
        f.write_str(symbol)
    }
}
