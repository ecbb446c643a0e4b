//! Combination taxonomy and the classifier that recognises it.
//!
//! `classify` is total: every slice of cards maps to exactly one
//! [`Combination`], with [`CombinationKind::Invalid`] for shapes the game does
//! not accept. Attachments are matched exactly. A shape with one card too many
//! or too few never falls back to a smaller valid kind.
//!
//! Attachment ranks are exclusive: a kicker never shares a rank with the core
//! of the combination, and kickers never share a rank with each other.

use crate::model::card::{Card, CardId};
use crate::model::rank::Rank;
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CombinationKind {
    Single,
    Pair,
    Triple,
    TripleWithSingle,
    TripleWithPair,
    Straight,
    StraightOfPairs,
    Plane,
    PlaneWithSingles,
    PlaneWithPairs,
    FourWithTwoSingles,
    FourWithTwoPairs,
    Bomb,
    Rocket,
    Invalid,
}

impl CombinationKind {
    pub const MIN_STRAIGHT: usize = 5;
    pub const MIN_PAIR_RUN: usize = 3;
    pub const MIN_PLANE: usize = 2;

    /// Kinds whose card count varies and must match exactly when compared.
    pub const fn is_variable_length(self) -> bool {
        matches!(
            self,
            CombinationKind::Straight
                | CombinationKind::StraightOfPairs
                | CombinationKind::Plane
                | CombinationKind::PlaneWithSingles
                | CombinationKind::PlaneWithPairs
        )
    }

    pub const fn is_plane(self) -> bool {
        matches!(
            self,
            CombinationKind::Plane
                | CombinationKind::PlaneWithSingles
                | CombinationKind::PlaneWithPairs
        )
    }

    /// Bombs and the rocket ignore the same-kind rule.
    pub const fn is_bomb(self) -> bool {
        matches!(self, CombinationKind::Bomb | CombinationKind::Rocket)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CombinationKind::Single => "single",
            CombinationKind::Pair => "pair",
            CombinationKind::Triple => "triple",
            CombinationKind::TripleWithSingle => "triple_with_single",
            CombinationKind::TripleWithPair => "triple_with_pair",
            CombinationKind::Straight => "straight",
            CombinationKind::StraightOfPairs => "straight_of_pairs",
            CombinationKind::Plane => "plane",
            CombinationKind::PlaneWithSingles => "plane_with_singles",
            CombinationKind::PlaneWithPairs => "plane_with_pairs",
            CombinationKind::FourWithTwoSingles => "four_with_two_singles",
            CombinationKind::FourWithTwoPairs => "four_with_two_pairs",
            CombinationKind::Bomb => "bomb",
            CombinationKind::Rocket => "rocket",
            CombinationKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for CombinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified set of cards. Only [`classify`] builds these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    kind: CombinationKind,
    power: u8,
    cards: Vec<Card>,
}

impl Combination {
    pub fn classify(cards: &[Card]) -> Self {
        classify(cards)
    }

    pub fn kind(&self) -> CombinationKind {
        self.kind
    }

    /// Rank value of the core (highest run rank, triple, or quad); 0 when invalid.
    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn power_rank(&self) -> Option<Rank> {
        Rank::from_value(self.power)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.kind != CombinationKind::Invalid
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    pub fn contains_id(&self, id: CardId) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }

    /// True when no physical card appears in both combinations.
    pub fn is_disjoint(&self, other: &Combination) -> bool {
        !self.cards.iter().any(|card| other.contains_id(card.id))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.power_rank() {
            Some(rank) => write!(f, "{}({rank})", self.kind)?,
            None => write!(f, "{}", self.kind)?,
        }
        f.write_str(" [")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

/// Classifies an unordered set of cards.
pub fn classify(cards: &[Card]) -> Combination {
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.suit.cmp(&b.suit)));
    match shape_of(&sorted) {
        Some((kind, power)) => Combination {
            kind,
            power: power.value(),
            cards: sorted,
        },
        None => Combination {
            kind: CombinationKind::Invalid,
            power: 0,
            cards: sorted,
        },
    }
}

/// Per-rank card counts, indexed by rank value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankCounts {
    counts: [u8; 18],
}

impl RankCounts {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 18];
        for card in cards {
            counts[card.rank.value() as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, rank: Rank) -> u8 {
        self.counts[rank.value() as usize]
    }

    /// Ranks holding exactly `count` cards, ascending.
    pub fn ranks_with(&self, count: u8) -> Vec<Rank> {
        Rank::ORDERED
            .iter()
            .copied()
            .filter(|rank| self.get(*rank) == count)
            .collect()
    }

    /// Ranks holding at least `count` cards, ascending.
    pub fn ranks_with_at_least(&self, count: u8) -> Vec<Rank> {
        Rank::ORDERED
            .iter()
            .copied()
            .filter(|rank| self.get(*rank) >= count)
            .collect()
    }
}

/// Ascending ranks that form an unbroken run inside the chainable range.
pub fn is_chain(ranks: &[Rank]) -> bool {
    !ranks.is_empty()
        && ranks.iter().all(|rank| rank.chains())
        && ranks
            .windows(2)
            .all(|pair| pair[0].successor() == Some(pair[1]))
}

fn shape_of(cards: &[Card]) -> Option<(CombinationKind, Rank)> {
    if cards.is_empty() || has_repeated_identity(cards) {
        return None;
    }

    let counts = RankCounts::from_cards(cards);
    let total = cards.len();

    if total == 2 && counts.get(Rank::SmallJoker) == 1 && counts.get(Rank::BigJoker) == 1 {
        return Some((CombinationKind::Rocket, Rank::BigJoker));
    }

    let quads = counts.ranks_with(4);
    if !quads.is_empty() {
        return four_shape(&counts, &quads, total);
    }

    let triples = counts.ranks_with(3);
    if !triples.is_empty() {
        return triple_shape(&counts, &triples, total);
    }

    let pairs = counts.ranks_with(2);
    let singles = counts.ranks_with(1);
    match (pairs.is_empty(), singles.is_empty()) {
        (true, false) => {
            let high = *singles.last()?;
            if total == 1 {
                Some((CombinationKind::Single, high))
            } else if total >= CombinationKind::MIN_STRAIGHT && is_chain(&singles) {
                Some((CombinationKind::Straight, high))
            } else {
                None
            }
        }
        (false, true) => {
            let high = *pairs.last()?;
            if pairs.len() == 1 {
                Some((CombinationKind::Pair, high))
            } else if pairs.len() >= CombinationKind::MIN_PAIR_RUN && is_chain(&pairs) {
                Some((CombinationKind::StraightOfPairs, high))
            } else {
                None
            }
        }
        _ => None,
    }
}

fn four_shape(
    counts: &RankCounts,
    quads: &[Rank],
    total: usize,
) -> Option<(CombinationKind, Rank)> {
    let [quad] = quads else {
        return None;
    };
    if !counts.ranks_with(3).is_empty() {
        return None;
    }
    let pairs = counts.ranks_with(2);
    let singles = counts.ranks_with(1);
    match total {
        4 => Some((CombinationKind::Bomb, *quad)),
        6 if singles.len() == 2 => Some((CombinationKind::FourWithTwoSingles, *quad)),
        8 if pairs.len() == 2 => Some((CombinationKind::FourWithTwoPairs, *quad)),
        _ => None,
    }
}

fn triple_shape(
    counts: &RankCounts,
    triples: &[Rank],
    total: usize,
) -> Option<(CombinationKind, Rank)> {
    let pairs = counts.ranks_with(2);
    let singles = counts.ranks_with(1);
    let high = *triples.last()?;

    if triples.len() == 1 {
        return match total {
            3 => Some((CombinationKind::Triple, high)),
            4 => Some((CombinationKind::TripleWithSingle, high)),
            5 if pairs.len() == 1 => Some((CombinationKind::TripleWithPair, high)),
            _ => None,
        };
    }

    if !is_chain(triples) {
        return None;
    }

    let wings = triples.len();
    if total == wings * 3 {
        Some((CombinationKind::Plane, high))
    } else if total == wings * 4 && singles.len() == wings && pairs.is_empty() {
        Some((CombinationKind::PlaneWithSingles, high))
    } else if total == wings * 5 && pairs.len() == wings && singles.is_empty() {
        Some((CombinationKind::PlaneWithPairs, high))
    } else {
        None
    }
}

fn has_repeated_identity(cards: &[Card]) -> bool {
    cards
        .iter()
        .enumerate()
        .any(|(i, card)| cards[i + 1..].iter().any(|other| other.id == card.id))
}
