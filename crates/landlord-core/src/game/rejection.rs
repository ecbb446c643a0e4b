use crate::model::combination::CombinationKind;
use crate::model::player::PlayerPosition;
use core::fmt;
use thiserror::Error;

/// Why a request was turned away. Rejections never change game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the selected cards do not form a recognised combination")]
    InvalidCombination,
    #[error("expected {expected} to act but got {actual}")]
    NotYourTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{player} does not hold all of the selected cards")]
    CardsNotOwned { player: PlayerPosition },
    #[error("{candidate} cannot beat the {reference} on the table")]
    CannotBeatLastPlay {
        candidate: CombinationKind,
        reference: CombinationKind,
    },
    #[error("{kind} must use {expected} cards to answer the table, got {actual}")]
    MustMatchLength {
        kind: CombinationKind,
        expected: usize,
        actual: usize,
    },
    #[error("{player} has already bid this deal")]
    AlreadyBid { player: PlayerPosition },
    #[error("bid {amount} must be 0 or above the current bid of {current}")]
    BidTooLow { amount: u8, current: u8 },
    #[error("bid {amount} exceeds the maximum of {max}")]
    BidTooHigh { amount: u8, max: u8 },
    #[error("{player} cannot pass: {reason}")]
    IllegalPass {
        player: PlayerPosition,
        reason: PassRestriction,
    },
    #[error("{request} is not accepted during {phase}")]
    WrongPhase {
        request: &'static str,
        phase: &'static str,
    },
    #[error("the game is already finished")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassRestriction {
    /// Nothing on the table; the player must lead.
    FreeLead,
    /// The player's own combination is unanswered.
    OwnsTrick,
}

impl fmt::Display for PassRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassRestriction::FreeLead => f.write_str("there is nothing to answer"),
            PassRestriction::OwnsTrick => f.write_str("the table already belongs to them"),
        }
    }
}

impl Rejection {
    /// Stable snake_case tag for logs and telemetry.
    pub const fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidCombination => "invalid_combination",
            Rejection::NotYourTurn { .. } => "not_your_turn",
            Rejection::CardsNotOwned { .. } => "cards_not_owned",
            Rejection::CannotBeatLastPlay { .. } => "cannot_beat_last_play",
            Rejection::MustMatchLength { .. } => "must_match_length",
            Rejection::AlreadyBid { .. } => "already_bid",
            Rejection::BidTooLow { .. } => "bid_too_low",
            Rejection::BidTooHigh { .. } => "bid_too_high",
            Rejection::IllegalPass { .. } => "illegal_pass",
            Rejection::WrongPhase { .. } => "wrong_phase",
            Rejection::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PassRestriction, Rejection};
    use crate::model::combination::CombinationKind;
    use crate::model::player::PlayerPosition;

    #[test]
    fn messages_carry_context() {
        let err = Rejection::NotYourTurn {
            expected: PlayerPosition::East,
            actual: PlayerPosition::West,
        };
        assert_eq!(err.to_string(), "expected East to act but got West");

        let err = Rejection::MustMatchLength {
            kind: CombinationKind::Straight,
            expected: 5,
            actual: 6,
        };
        assert!(err.to_string().contains("straight"));
    }

    #[test]
    fn illegal_pass_explains_reason() {
        let err = Rejection::IllegalPass {
            player: PlayerPosition::South,
            reason: PassRestriction::FreeLead,
        };
        assert_eq!(
            err.to_string(),
            "South cannot pass: there is nothing to answer"
        );
        assert_eq!(err.code(), "illegal_pass");
    }
}
