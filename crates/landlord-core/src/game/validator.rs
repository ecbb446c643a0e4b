//! The turn state machine: bidding, then play, then a finished game.
//!
//! Every request is checked in full before anything changes, so a rejection
//! leaves the validator exactly as it was. Accepted requests return the events
//! they caused, always ending with [`GameEvent::StateChanged`].

use crate::game::bidding::{BidOutcome, BiddingState};
use crate::game::protocol::{GameEvent, HintResult, Request, Response};
use crate::game::rejection::{PassRestriction, Rejection};
use crate::game::round::{RoundPhase, RoundResult, RoundState};
use crate::game::rules::RulesConfig;
use crate::game::settlement::Settlement;
use crate::model::beat::{BeatVerdict, verdict};
use crate::model::card::{Card, CardId};
use crate::model::combination::{Combination, classify};
use crate::model::deck::Deal;
use crate::model::hand::Hand;
use crate::model::player::{NUM_PLAYERS, PlayerPosition, Team};
use crate::strategy::{legal_candidates, offensive_posture, recommend};
use serde::Serialize;
use tracing::debug;

const TURN_TARGET: &str = "landlord_core::turn";

/// One accepted action during the playing phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TurnRecord {
    Played {
        player: PlayerPosition,
        combination: Combination,
    },
    Passed {
        player: PlayerPosition,
    },
}

impl TurnRecord {
    pub fn player(&self) -> PlayerPosition {
        match self {
            TurnRecord::Played { player, .. } | TurnRecord::Passed { player } => *player,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnValidator {
    rules: RulesConfig,
    round: RoundState,
    bidding: BiddingState,
    hands: [Hand; NUM_PLAYERS],
    bonus: Vec<Card>,
    landlord: Option<PlayerPosition>,
    bid: u8,
    history: Vec<TurnRecord>,
    bombs_played: u32,
    settlement: Option<Settlement>,
}

impl TurnValidator {
    pub fn new(deal: Deal, first_bidder: PlayerPosition) -> Self {
        Self::with_rules(deal, first_bidder, RulesConfig::default())
    }

    pub fn with_rules(deal: Deal, first_bidder: PlayerPosition, rules: RulesConfig) -> Self {
        let rules = rules.normalized();
        Self {
            rules,
            round: RoundState::new(first_bidder),
            bidding: BiddingState::new(rules.max_bid),
            hands: deal.hands,
            bonus: deal.bonus,
            landlord: None,
            bid: 0,
            history: Vec::new(),
            bombs_played: 0,
            settlement: None,
        }
    }

    /// Starts directly in the playing phase with `landlord` to lead.
    ///
    /// The hands are taken as given; the landlord's bonus cards are assumed
    /// to be included already.
    pub fn in_play(hands: [Hand; NUM_PLAYERS], landlord: PlayerPosition, bid: u8) -> Self {
        let rules = RulesConfig::default();
        let mut round = RoundState::new(landlord);
        round.start_playing(landlord);
        Self {
            rules,
            round,
            bidding: BiddingState::new(rules.max_bid),
            hands,
            bonus: Vec::new(),
            landlord: Some(landlord),
            bid: bid.clamp(1, rules.max_bid),
            history: Vec::new(),
            bombs_played: 0,
            settlement: None,
        }
    }

    /// Discards the current game and starts bidding on a fresh deal.
    pub fn reset(&mut self, deal: Deal, first_bidder: PlayerPosition) {
        *self = Self::with_rules(deal, first_bidder, self.rules);
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.round.current_player()
    }

    pub fn bidding(&self) -> &BiddingState {
        &self.bidding
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; NUM_PLAYERS] {
        &self.hands
    }

    pub fn bonus(&self) -> &[Card] {
        &self.bonus
    }

    pub fn landlord(&self) -> Option<PlayerPosition> {
        self.landlord
    }

    pub fn bid_amount(&self) -> u8 {
        self.bid
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn bombs_played(&self) -> u32 {
        self.bombs_played
    }

    /// Points owed for the finished game; `None` while playing or after a voided deal.
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.round.is_finished()
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Bid { player, amount } => self.bid(player, amount).into(),
            Request::PlayCards { player, cards } => self.play_cards(player, &cards).into(),
            Request::PassTurn { player } => self.pass_turn(player).into(),
            Request::Hint { player } => Response::Hint(self.hint(player)),
        }
    }

    pub fn bid(&mut self, seat: PlayerPosition, amount: u8) -> Result<Vec<GameEvent>, Rejection> {
        let outcome = self
            .expect_phase(seat, "bid", RoundPhase::Bidding)
            .and_then(|()| self.bidding.submit(seat, amount))
            .inspect_err(|rejection| log_rejection(seat, "bid", rejection))?;

        debug!(target: TURN_TARGET, player = %seat, amount, "bid accepted");
        let mut events = vec![GameEvent::BidAccepted {
            player: seat,
            amount,
        }];

        match outcome {
            BidOutcome::Open => self.round.advance_bidding(),
            BidOutcome::Won { landlord, bid } => {
                self.landlord = Some(landlord);
                self.bid = bid;
                self.hands[landlord.index()].extend(self.bonus.iter().copied());
                self.round.start_playing(landlord);
                debug!(target: TURN_TARGET, landlord = %landlord, bid, "landlord chosen");
                events.push(GameEvent::LandlordChosen {
                    landlord,
                    bid,
                    bonus: self.bonus.clone(),
                });
            }
            BidOutcome::Voided => {
                self.round.finish(RoundResult::Voided);
                debug!(target: TURN_TARGET, "all players declined; redeal requested");
                events.push(GameEvent::RedealRequested);
            }
        }

        events.push(self.state_changed());
        Ok(events)
    }

    /// Validates a play without applying it.
    pub fn check_play(
        &self,
        seat: PlayerPosition,
        cards: &[CardId],
    ) -> Result<Combination, Rejection> {
        self.expect_phase(seat, "play_cards", RoundPhase::Playing)?;

        let selected = self.hands[seat.index()]
            .select(cards)
            .ok_or(Rejection::CardsNotOwned { player: seat })?;
        let combination = classify(&selected);
        if !combination.is_valid() {
            return Err(Rejection::InvalidCombination);
        }

        if let Some(reference) = self.round.reference_for(seat) {
            match verdict(&combination, reference) {
                BeatVerdict::Beats => {}
                BeatVerdict::LengthMismatch => {
                    return Err(Rejection::MustMatchLength {
                        kind: reference.kind(),
                        expected: reference.len(),
                        actual: combination.len(),
                    });
                }
                BeatVerdict::Outranked | BeatVerdict::KindMismatch | BeatVerdict::Invalid => {
                    return Err(Rejection::CannotBeatLastPlay {
                        candidate: combination.kind(),
                        reference: reference.kind(),
                    });
                }
            }
        }

        Ok(combination)
    }

    pub fn play_cards(
        &mut self,
        seat: PlayerPosition,
        cards: &[CardId],
    ) -> Result<Vec<GameEvent>, Rejection> {
        let combination = self
            .check_play(seat, cards)
            .inspect_err(|rejection| log_rejection(seat, "play_cards", rejection))?;

        let hand = &mut self.hands[seat.index()];
        for card in combination.cards() {
            hand.remove(*card);
        }
        if combination.kind().is_bomb() {
            self.bombs_played += 1;
        }

        debug!(
            target: TURN_TARGET,
            player = %seat,
            combination = %combination,
            remaining = self.hands[seat.index()].len(),
            "play validated"
        );

        let mut events = vec![GameEvent::PlayValidated {
            player: seat,
            cards: combination.cards().to_vec(),
            kind: combination.kind(),
        }];
        self.history.push(TurnRecord::Played {
            player: seat,
            combination: combination.clone(),
        });
        self.round.record_play(seat, combination);

        if self.hands[seat.index()].is_empty() {
            events.push(self.finish_game(seat));
        }

        events.push(self.state_changed());
        Ok(events)
    }

    pub fn check_pass(&self, seat: PlayerPosition) -> Result<(), Rejection> {
        self.expect_phase(seat, "pass_turn", RoundPhase::Playing)?;
        match self.round.last_play_owner() {
            None => Err(Rejection::IllegalPass {
                player: seat,
                reason: PassRestriction::FreeLead,
            }),
            Some(owner) if owner == seat => Err(Rejection::IllegalPass {
                player: seat,
                reason: PassRestriction::OwnsTrick,
            }),
            Some(_) => Ok(()),
        }
    }

    pub fn pass_turn(&mut self, seat: PlayerPosition) -> Result<Vec<GameEvent>, Rejection> {
        self.check_pass(seat)
            .inspect_err(|rejection| log_rejection(seat, "pass_turn", rejection))?;

        self.history.push(TurnRecord::Passed { player: seat });
        let mut events = vec![GameEvent::TurnPassed { player: seat }];
        if self.round.record_pass() {
            let leader = self.round.current_player();
            debug!(target: TURN_TARGET, player = %seat, leader = %leader, "trick cleared");
            events.push(GameEvent::TrickCleared { leader });
        } else {
            debug!(target: TURN_TARGET, player = %seat, "pass accepted");
        }

        events.push(self.state_changed());
        Ok(events)
    }

    /// Every combination `seat` could legally put down right now.
    pub fn legal_plays(&self, seat: PlayerPosition) -> Vec<Combination> {
        if self.round.phase() != RoundPhase::Playing {
            return Vec::new();
        }
        legal_candidates(
            self.hands[seat.index()].cards(),
            self.round.reference_for(seat),
        )
    }

    /// Suggests a play for `seat` without touching any state.
    pub fn hint(&self, seat: PlayerPosition) -> HintResult {
        if self.round.phase() != RoundPhase::Playing {
            return HintResult::none(format!(
                "no hint during {}",
                self.round.phase().label()
            ));
        }

        let hand = &self.hands[seat.index()];
        let legal = self.legal_plays(seat);
        let offensive = offensive_posture(hand.len(), self.landlord == Some(seat));
        match recommend(hand, &legal, hand.len(), offensive) {
            Some(recommendation) => HintResult {
                rationale: recommendation.rationale(),
                combination: Some(recommendation.combination),
            },
            None => match self.round.reference_for(seat) {
                Some(reference) => HintResult::none(format!("nothing beats {reference}; pass")),
                None => HintResult::none("no playable combination"),
            },
        }
    }

    fn expect_phase(
        &self,
        seat: PlayerPosition,
        request: &'static str,
        expected: RoundPhase,
    ) -> Result<(), Rejection> {
        let phase = self.round.phase();
        if let RoundPhase::Finished(_) = phase {
            return Err(Rejection::GameOver);
        }
        if phase != expected {
            return Err(Rejection::WrongPhase {
                request,
                phase: phase.label(),
            });
        }
        let current = self.round.current_player();
        if seat != current {
            return Err(Rejection::NotYourTurn {
                expected: current,
                actual: seat,
            });
        }
        Ok(())
    }

    fn finish_game(&mut self, winner: PlayerPosition) -> GameEvent {
        let landlord = self.landlord.unwrap_or(winner);
        let team = Team::of(winner, landlord);
        let spring = self.rules.spring_doubles && self.is_spring(team, landlord);
        let bombs = if self.rules.bombs_double {
            self.bombs_played
        } else {
            0
        };
        let settlement = Settlement::compute(landlord, team, self.bid, bombs, spring);

        self.round.finish(RoundResult::Won { winner, team });
        self.settlement = Some(settlement);
        debug!(
            target: TURN_TARGET,
            winner = %winner,
            team = %team,
            stake = settlement.stake(),
            spring,
            "game finished"
        );
        GameEvent::GameFinished {
            winner,
            team,
            settlement,
        }
    }

    /// The losing side was shut out: farmers never played, or the landlord
    /// only made the opening lead.
    fn is_spring(&self, winner: Team, landlord: PlayerPosition) -> bool {
        let plays_by = |team: Team| {
            self.history
                .iter()
                .filter(|record| {
                    matches!(record, TurnRecord::Played { player, .. } if Team::of(*player, landlord) == team)
                })
                .count()
        };
        match winner {
            Team::Landlord => plays_by(Team::Farmers) == 0,
            Team::Farmers => plays_by(Team::Landlord) == 1,
        }
    }

    fn state_changed(&self) -> GameEvent {
        GameEvent::StateChanged {
            state: self.round.clone(),
        }
    }
}

fn log_rejection(seat: PlayerPosition, request: &'static str, rejection: &Rejection) {
    debug!(
        target: TURN_TARGET,
        player = %seat,
        request,
        code = rejection.code(),
        reason = %rejection,
        "request rejected"
    );
}
