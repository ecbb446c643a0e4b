mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::BotFeatures;
use landlord_core::game::bidding::BiddingState;
use landlord_core::game::protocol::Request;
use landlord_core::game::round::RoundState;
use landlord_core::game::validator::TurnValidator;
use landlord_core::model::card::CardId;
use landlord_core::model::hand::Hand;
use landlord_core::model::player::{NUM_PLAYERS, PlayerPosition};

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub bidding: &'a BiddingState,
    pub landlord: Option<PlayerPosition>,
    pub hand_sizes: [usize; NUM_PLAYERS],
    pub features: BotFeatures,
}

impl<'a> PolicyContext<'a> {
    /// Public view of the table from `seat`.
    pub fn from_validator(
        validator: &'a TurnValidator,
        seat: PlayerPosition,
        features: BotFeatures,
    ) -> Self {
        Self {
            seat,
            hand: validator.hand(seat),
            round: validator.round(),
            bidding: validator.bidding(),
            landlord: validator.landlord(),
            hand_sizes: PlayerPosition::LOOP.map(|other| validator.hand(other).len()),
            features,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayDecision {
    Play(Vec<CardId>),
    Pass,
}

impl PlayDecision {
    pub fn into_request(self, player: PlayerPosition) -> Request {
        match self {
            PlayDecision::Play(cards) => Request::PlayCards { player, cards },
            PlayDecision::Pass => Request::PassTurn { player },
        }
    }
}

/// Unified interface for AI decision-making
pub trait Policy: Send {
    /// Bid 0 (decline) up to the table maximum, called while bidding.
    fn choose_bid(&mut self, ctx: &PolicyContext) -> u8;

    /// Cards to put down, or a pass, called while playing.
    fn choose_play(&mut self, ctx: &PolicyContext) -> PlayDecision;
}
