//! Requests accepted by [`TurnValidator::handle`](crate::game::validator::TurnValidator::handle)
//! and the notifications it emits.

use crate::game::rejection::Rejection;
use crate::game::round::RoundState;
use crate::game::settlement::Settlement;
use crate::model::card::{Card, CardId};
use crate::model::combination::{Combination, CombinationKind};
use crate::model::player::{PlayerPosition, Team};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Bid {
        player: PlayerPosition,
        amount: u8,
    },
    PlayCards {
        player: PlayerPosition,
        cards: Vec<CardId>,
    },
    PassTurn {
        player: PlayerPosition,
    },
    Hint {
        player: PlayerPosition,
    },
}

impl Request {
    pub fn player(&self) -> PlayerPosition {
        match self {
            Request::Bid { player, .. }
            | Request::PlayCards { player, .. }
            | Request::PassTurn { player }
            | Request::Hint { player } => *player,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Request::Bid { .. } => "bid",
            Request::PlayCards { .. } => "play_cards",
            Request::PassTurn { .. } => "pass_turn",
            Request::Hint { .. } => "hint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    BidAccepted {
        player: PlayerPosition,
        amount: u8,
    },
    LandlordChosen {
        landlord: PlayerPosition,
        bid: u8,
        bonus: Vec<Card>,
    },
    /// Nobody bid; the host has to deal again.
    RedealRequested,
    PlayValidated {
        player: PlayerPosition,
        cards: Vec<Card>,
        kind: CombinationKind,
    },
    TurnPassed {
        player: PlayerPosition,
    },
    TrickCleared {
        leader: PlayerPosition,
    },
    GameFinished {
        winner: PlayerPosition,
        team: Team,
        settlement: Settlement,
    },
    /// Sent last after every accepted mutation.
    StateChanged {
        state: RoundState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintResult {
    pub combination: Option<Combination>,
    pub rationale: String,
}

impl HintResult {
    pub fn none(rationale: impl Into<String>) -> Self {
        Self {
            combination: None,
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Accepted(Vec<GameEvent>),
    Rejected(Rejection),
    Hint(HintResult),
}

impl Response {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Response::Accepted(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Response::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

impl From<Result<Vec<GameEvent>, Rejection>> for Response {
    fn from(result: Result<Vec<GameEvent>, Rejection>) -> Self {
        match result {
            Ok(events) => Response::Accepted(events),
            Err(rejection) => Response::Rejected(rejection),
        }
    }
}
