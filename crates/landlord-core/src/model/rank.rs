use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    SmallJoker = 16,
    BigJoker = 17,
}

impl Rank {
    pub const ORDERED: [Rank; 15] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::SmallJoker,
        Rank::BigJoker,
    ];

    /// The thirteen ranks that appear once per suit.
    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            16 => Some(Rank::SmallJoker),
            17 => Some(Rank::BigJoker),
            _ => None,
        }
    }

    /// Parses the dealer's rank label ("3".."10", "J", "Q", "K", "A", "2", "SJ", "BJ").
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" | "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            "2" => Some(Rank::Two),
            "SJ" | "SMALL" => Some(Rank::SmallJoker),
            "BJ" | "BIG" => Some(Rank::BigJoker),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// Ranks allowed inside straights, pair runs and planes: "2" and jokers never chain.
    pub const fn chains(self) -> bool {
        (self as u8) <= (Rank::Ace as u8)
    }

    /// Next rank in chain order, `None` past the Ace.
    pub const fn successor(self) -> Option<Self> {
        if self.chains() && !matches!(self, Rank::Ace) {
            Rank::from_value(self as u8 + 1)
        } else {
            None
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "SJ",
            Rank::BigJoker => "BJ",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::Rank;

    #[test]
    fn value_orders_two_and_jokers_above_ace() {
        assert!(Rank::Two > Rank::Ace);
        assert!(Rank::SmallJoker > Rank::Two);
        assert!(Rank::BigJoker > Rank::SmallJoker);
        assert_eq!(Rank::Two.value(), 15);
    }

    #[test]
    fn from_value_maps() {
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(2), None);
        assert_eq!(Rank::from_value(18), None);
    }

    #[test]
    fn labels_roundtrip_through_display() {
        for rank in Rank::ORDERED {
            assert_eq!(Rank::from_label(&rank.to_string()), Some(rank));
        }
        assert_eq!(Rank::from_label("x"), None);
    }

    #[test]
    fn two_and_jokers_do_not_chain() {
        assert!(Rank::Ace.chains());
        assert!(!Rank::Two.chains());
        assert!(!Rank::BigJoker.chains());
        assert_eq!(Rank::King.successor(), Some(Rank::Ace));
        assert_eq!(Rank::Ace.successor(), None);
    }
}
