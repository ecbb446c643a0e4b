use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{NUM_PLAYERS, PlayerPosition};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

pub const DECK_SIZE: usize = 54;
pub const BONUS_CARDS: usize = 3;
pub const HAND_SIZE: usize = (DECK_SIZE - BONUS_CARDS) / NUM_PLAYERS;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Three dealt hands plus the landlord's face-down bonus cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Hand; NUM_PLAYERS],
    pub bonus: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::STANDARD.iter().copied() {
            for rank in Rank::SUITED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.push(Card::joker(Rank::SmallJoker));
        cards.push(Card::joker(Rank::BigJoker));
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Round-robin deal of the first 51 cards; the last three are held back.
    pub fn deal(&self) -> Deal {
        let split = self.cards.len().saturating_sub(BONUS_CARDS);
        let (dealt, bonus) = self.cards.split_at(split);
        let mut hands: [Vec<Card>; NUM_PLAYERS] = array::from_fn(|_| Vec::new());
        for (index, card) in dealt.iter().enumerate() {
            hands[index % NUM_PLAYERS].push(*card);
        }
        Deal {
            hands: hands.map(Hand::with_cards),
            bonus: bonus.to_vec(),
        }
    }
}

impl Deal {
    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }
}
