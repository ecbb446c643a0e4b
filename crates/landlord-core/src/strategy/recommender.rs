use crate::model::combination::Combination;
use crate::model::hand::Hand;
use crate::strategy::potential::potential_combinations;
use crate::strategy::scoring::priority;
use crate::strategy::strength::{StrengthTier, tier_of};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub combination: Combination,
    pub tier: StrengthTier,
    pub priority: i32,
    pub offensive: bool,
    /// Strong combinations still available after this play.
    pub preserved: Vec<Combination>,
}

impl Recommendation {
    pub fn rationale(&self) -> String {
        let posture = if self.offensive {
            "offensive"
        } else {
            "defensive"
        };
        format!(
            "play {} ({} tier, priority {}, {posture}); keeps {} strong combination(s)",
            self.combination,
            self.tier,
            self.priority,
            self.preserved.len()
        )
    }
}

/// True when the hand is short enough to race for the finish.
pub fn offensive_posture(remaining: usize, is_landlord: bool) -> bool {
    remaining <= 5 || (is_landlord && remaining <= 10) || (!is_landlord && remaining <= 8)
}

/// Picks one of `legal`, or `None` when nothing legal is held by `hand`.
///
/// Highest priority wins; ties go to the weaker tier, then the lower power,
/// then the earlier entry of `legal`.
pub fn recommend(
    hand: &Hand,
    legal: &[Combination],
    remaining: usize,
    want_offensive: bool,
) -> Option<Recommendation> {
    let mut best: Option<(&Combination, StrengthTier, i32)> = None;
    for candidate in legal {
        if !candidate.is_valid() || !hand.holds_all(candidate.cards()) {
            continue;
        }
        let tier = tier_of(candidate);
        let score = priority(candidate, tier, remaining, want_offensive);
        let better = match best {
            None => true,
            Some((current, current_tier, current_score)) => {
                score > current_score
                    || (score == current_score
                        && (tier, candidate.power()) < (current_tier, current.power()))
            }
        };
        if better {
            best = Some((candidate, tier, score));
        }
    }

    let (combination, tier, priority) = best?;
    let preserved = potential_combinations(hand.cards())
        .into_iter()
        .filter(|other| other.is_disjoint(combination) && tier_of(other) >= StrengthTier::Moderate)
        .collect();

    Some(Recommendation {
        combination: combination.clone(),
        tier,
        priority,
        offensive: want_offensive,
        preserved,
    })
}
