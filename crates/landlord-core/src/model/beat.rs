use crate::model::combination::{Combination, CombinationKind};

/// Outcome of comparing a candidate play against the combination on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeatVerdict {
    Beats,
    /// Same shape family but not strong enough, or facing a bomb/rocket.
    Outranked,
    KindMismatch,
    LengthMismatch,
    /// One side did not classify.
    Invalid,
}

impl BeatVerdict {
    pub const fn beats(self) -> bool {
        matches!(self, BeatVerdict::Beats)
    }
}

pub fn verdict(candidate: &Combination, reference: &Combination) -> BeatVerdict {
    if !candidate.is_valid() || !reference.is_valid() {
        return BeatVerdict::Invalid;
    }

    match (candidate.kind(), reference.kind()) {
        (_, CombinationKind::Rocket) => BeatVerdict::Outranked,
        (CombinationKind::Rocket, _) => BeatVerdict::Beats,
        (CombinationKind::Bomb, CombinationKind::Bomb) => by_power(candidate, reference),
        (CombinationKind::Bomb, _) => BeatVerdict::Beats,
        (_, CombinationKind::Bomb) => BeatVerdict::Outranked,
        (ours, theirs) if ours != theirs => BeatVerdict::KindMismatch,
        (kind, _) if kind.is_variable_length() && candidate.len() != reference.len() => {
            BeatVerdict::LengthMismatch
        }
        _ => by_power(candidate, reference),
    }
}

pub fn can_beat(candidate: &Combination, reference: &Combination) -> bool {
    verdict(candidate, reference).beats()
}

fn by_power(candidate: &Combination, reference: &Combination) -> BeatVerdict {
    if candidate.power() > reference.power() {
        BeatVerdict::Beats
    } else {
        BeatVerdict::Outranked
    }
}
