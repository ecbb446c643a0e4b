use super::match_state::MatchState;
use super::round::{RoundPhase, RoundResult};
use super::rules::RulesConfig;
use super::validator::TurnValidator;
use crate::model::card::CardRecord;
use crate::model::player::{NUM_PLAYERS, PlayerPosition};
use serde::{Deserialize, Serialize};

/// Enough to rebuild a match: the seed, how far into it we are, and the scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSnapshot {
    pub seed: u64,
    pub game_number: u32,
    pub deals_dealt: u32,
    pub first_bidder: PlayerPosition,
    pub scores: [i64; NUM_PLAYERS],
    #[serde(default)]
    pub rules: RulesConfig,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        MatchSnapshot {
            seed: state.seed(),
            game_number: state.game_number(),
            deals_dealt: state.deals_dealt(),
            first_bidder: state.first_bidder(),
            scores: *state.scores().standings(),
            rules: *state.rules(),
        }
    }

    pub fn restore(self) -> MatchState {
        MatchState::from_snapshot(&self)
    }

    pub fn to_json(state: &MatchState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Public view of one game for presentation collaborators. Hands are reported
/// by size only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub phase: String,
    pub current_player: PlayerPosition,
    pub landlord: Option<PlayerPosition>,
    pub bid: u8,
    pub hand_sizes: [usize; NUM_PLAYERS],
    pub last_play: Option<Vec<CardRecord>>,
    pub last_play_kind: Option<String>,
    pub last_play_owner: Option<PlayerPosition>,
    pub pass_count: u8,
    pub bombs_played: u32,
    pub winner: Option<PlayerPosition>,
}

impl RoundSnapshot {
    pub fn capture(validator: &TurnValidator) -> Self {
        let round = validator.round();
        let winner = match round.phase() {
            RoundPhase::Finished(RoundResult::Won { winner, .. }) => Some(winner),
            _ => None,
        };
        RoundSnapshot {
            phase: round.phase().label().to_string(),
            current_player: round.current_player(),
            landlord: validator.landlord(),
            bid: validator.bid_amount(),
            hand_sizes: PlayerPosition::LOOP.map(|seat| validator.hand(seat).len()),
            last_play: round
                .last_play()
                .map(|play| play.cards().iter().copied().map(CardRecord::from).collect()),
            last_play_kind: round.last_play().map(|play| play.kind().as_str().to_string()),
            last_play_owner: round.last_play_owner(),
            pass_count: round.pass_count(),
            bombs_played: validator.bombs_played(),
            winner,
        }
    }

    pub fn to_json(validator: &TurnValidator) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(validator))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchSnapshot, RoundSnapshot};
    use crate::game::match_state::MatchState;
    use crate::game::validator::TurnValidator;
    use crate::model::card::{Card, parse_cards};
    use crate::model::hand::Hand;
    use crate::model::player::PlayerPosition;

    #[test]
    fn match_snapshot_serializes_to_json() {
        let state = MatchState::with_seed(PlayerPosition::South, 99);
        let json = MatchSnapshot::to_json(&state).unwrap();
        assert!(json.contains("\"seed\": 99"));
        assert!(json.contains("\"game_number\": 1"));
    }

    #[test]
    fn match_snapshot_restores_deal_and_scores() {
        let mut state = MatchState::with_seed(PlayerPosition::East, 123);
        state.redeal();
        state.scores_mut().set_totals([6, -3, -3]);
        let snapshot = MatchSnapshot::capture(&state);
        let restored = snapshot.clone().restore();
        assert_eq!(restored.seed(), 123);
        assert_eq!(restored.scores().standings(), &snapshot.scores);
        assert_eq!(restored.validator().hands(), state.validator().hands());
    }

    #[test]
    fn match_snapshot_without_rules_uses_defaults() {
        let json = r#"{
            "seed": 7,
            "game_number": 2,
            "deals_dealt": 3,
            "first_bidder": "West",
            "scores": [0, 2, -2]
        }"#;
        let snapshot = MatchSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.rules.max_bid, 3);
        assert_eq!(snapshot.scores, [0, 2, -2]);
    }

    #[test]
    fn round_snapshot_reports_public_state() {
        let hand = |codes: &str| Hand::with_cards(parse_cards(codes).unwrap());
        let mut validator = TurnValidator::in_play(
            [hand("9S 9H 3D"), hand("4S"), hand("5S 6S")],
            PlayerPosition::South,
            2,
        );
        let nines: Vec<_> = parse_cards("9S 9H")
            .unwrap()
            .into_iter()
            .map(|card: Card| card.id)
            .collect();
        validator.play_cards(PlayerPosition::South, &nines).unwrap();

        let snapshot = RoundSnapshot::capture(&validator);
        assert_eq!(snapshot.phase, "playing");
        assert_eq!(snapshot.hand_sizes, [1, 1, 2]);
        assert_eq!(snapshot.last_play_kind.as_deref(), Some("pair"));
        assert_eq!(snapshot.last_play.as_ref().map(Vec::len), Some(2));
        assert_eq!(snapshot.current_player, PlayerPosition::East);

        let json = RoundSnapshot::to_json(&validator).unwrap();
        assert_eq!(RoundSnapshot::from_json(&json).unwrap(), snapshot);
    }
}
