use crate::model::combination::{Combination, CombinationKind};
use crate::model::rank::Rank;
use core::fmt;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StrengthTier {
    Weak,
    Moderate,
    Strong,
    Ultra,
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthTier::Weak => "weak",
            StrengthTier::Moderate => "moderate",
            StrengthTier::Strong => "strong",
            StrengthTier::Ultra => "ultra",
        };
        f.write_str(label)
    }
}

/// Lowest core rank reaching each tier for rank-scaled kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerLadder {
    pub ultra: Rank,
    pub strong: Rank,
    pub moderate: Rank,
}

impl PowerLadder {
    pub fn tier(&self, power: u8) -> StrengthTier {
        if power >= self.ultra.value() {
            StrengthTier::Ultra
        } else if power >= self.strong.value() {
            StrengthTier::Strong
        } else if power >= self.moderate.value() {
            StrengthTier::Moderate
        } else {
            StrengthTier::Weak
        }
    }
}

pub const SINGLE_LADDER: PowerLadder = PowerLadder {
    ultra: Rank::Two,
    strong: Rank::Ace,
    moderate: Rank::Queen,
};

pub const PAIR_LADDER: PowerLadder = PowerLadder {
    ultra: Rank::Two,
    strong: Rank::King,
    moderate: Rank::Ten,
};

pub const TRIPLE_LADDER: PowerLadder = PowerLadder {
    ultra: Rank::Two,
    strong: Rank::Queen,
    moderate: Rank::Eight,
};

/// Card count from which a run stops being easy to answer.
pub const LONG_STRAIGHT: usize = 7;
pub const LONG_PAIR_RUN: usize = 8;

pub fn tier_of(combination: &Combination) -> StrengthTier {
    match combination.kind() {
        CombinationKind::Bomb | CombinationKind::Rocket => StrengthTier::Ultra,
        CombinationKind::Plane
        | CombinationKind::PlaneWithSingles
        | CombinationKind::PlaneWithPairs
        | CombinationKind::FourWithTwoSingles
        | CombinationKind::FourWithTwoPairs => StrengthTier::Strong,
        CombinationKind::Straight if combination.len() >= LONG_STRAIGHT => StrengthTier::Moderate,
        CombinationKind::StraightOfPairs if combination.len() >= LONG_PAIR_RUN => {
            StrengthTier::Moderate
        }
        CombinationKind::Straight | CombinationKind::StraightOfPairs => StrengthTier::Weak,
        CombinationKind::Single => SINGLE_LADDER.tier(combination.power()),
        CombinationKind::Pair => PAIR_LADDER.tier(combination.power()),
        CombinationKind::Triple
        | CombinationKind::TripleWithSingle
        | CombinationKind::TripleWithPair => TRIPLE_LADDER.tier(combination.power()),
        CombinationKind::Invalid => StrengthTier::Weak,
    }
}
