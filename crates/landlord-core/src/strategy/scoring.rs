use crate::model::combination::{Combination, CombinationKind};
use crate::strategy::strength::StrengthTier;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePace {
    Endgame,
    Midgame,
    Opening,
}

/// Per-card multiplier applied while the hand holds at most `max_cards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingBucket {
    pub max_cards: usize,
    pub multiplier: i32,
    pub pace: GamePace,
}

/// Checked in order; the last bucket catches everything.
pub const REMAINING_BUCKETS: [RemainingBucket; 3] = [
    RemainingBucket {
        max_cards: 5,
        multiplier: 30,
        pace: GamePace::Endgame,
    },
    RemainingBucket {
        max_cards: 10,
        multiplier: 15,
        pace: GamePace::Midgame,
    },
    RemainingBucket {
        max_cards: usize::MAX,
        multiplier: 10,
        pace: GamePace::Opening,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthAdjustment {
    pub weak: i32,
    pub moderate: i32,
    pub strong: i32,
    pub ultra: i32,
}

impl StrengthAdjustment {
    pub const fn for_tier(&self, tier: StrengthTier) -> i32 {
        match tier {
            StrengthTier::Weak => self.weak,
            StrengthTier::Moderate => self.moderate,
            StrengthTier::Strong => self.strong,
            StrengthTier::Ultra => self.ultra,
        }
    }
}

/// Default posture: shed weak cards, hold strong ones back.
pub const PRESERVE_ADJUSTMENT: StrengthAdjustment = StrengthAdjustment {
    weak: 20,
    moderate: 0,
    strong: -25,
    ultra: -60,
};

/// Offensive posture: take control with strong cards, still reluctant to spend bombs.
pub const OFFENSIVE_ADJUSTMENT: StrengthAdjustment = StrengthAdjustment {
    weak: 0,
    moderate: 4,
    strong: 8,
    ultra: -10,
};

pub const OPENING_WEAK_SINGLE_BONUS: i32 = 12;
pub const GOING_OUT_BONUS: i32 = 500;

pub fn bucket_for(remaining: usize) -> RemainingBucket {
    REMAINING_BUCKETS
        .iter()
        .copied()
        .find(|bucket| remaining <= bucket.max_cards)
        .unwrap_or(REMAINING_BUCKETS[REMAINING_BUCKETS.len() - 1])
}

pub fn priority(
    combination: &Combination,
    tier: StrengthTier,
    remaining: usize,
    want_offensive: bool,
) -> i32 {
    let bucket = bucket_for(remaining);
    let cards = i32::try_from(combination.len()).unwrap_or(i32::MAX);
    let mut score = cards.saturating_mul(bucket.multiplier);

    let adjustment = if want_offensive {
        OFFENSIVE_ADJUSTMENT
    } else {
        PRESERVE_ADJUSTMENT
    };
    score += adjustment.for_tier(tier);

    if bucket.pace == GamePace::Opening
        && combination.kind() == CombinationKind::Single
        && tier == StrengthTier::Weak
    {
        score += OPENING_WEAK_SINGLE_BONUS;
    }

    if combination.len() == remaining {
        score += GOING_OUT_BONUS;
    }

    score
}
