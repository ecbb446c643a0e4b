use crate::model::combination::Combination;
use crate::model::player::{NUM_PLAYERS, PlayerPosition, Team};
use serde::Serialize;

/// Table state shared with presentation collaborators after every accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundState {
    phase: RoundPhase,
    current_player: PlayerPosition,
    last_play: Option<Combination>,
    last_play_owner: Option<PlayerPosition>,
    pass_count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundPhase {
    Bidding,
    Playing,
    Finished(RoundResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoundResult {
    Won { winner: PlayerPosition, team: Team },
    /// Nobody bid; the deal has to be thrown in.
    Voided,
}

impl RoundPhase {
    pub const fn label(self) -> &'static str {
        match self {
            RoundPhase::Bidding => "bidding",
            RoundPhase::Playing => "playing",
            RoundPhase::Finished(_) => "finished",
        }
    }
}

impl RoundState {
    pub fn new(first_bidder: PlayerPosition) -> Self {
        Self {
            phase: RoundPhase::Bidding,
            current_player: first_bidder,
            last_play: None,
            last_play_owner: None,
            pass_count: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.current_player
    }

    pub fn last_play(&self) -> Option<&Combination> {
        self.last_play.as_ref()
    }

    pub fn last_play_owner(&self) -> Option<PlayerPosition> {
        self.last_play_owner
    }

    pub fn pass_count(&self) -> u8 {
        self.pass_count
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RoundPhase::Finished(_))
    }

    /// The combination `seat` has to beat, or `None` when it may lead anything.
    pub fn reference_for(&self, seat: PlayerPosition) -> Option<&Combination> {
        if self.last_play_owner == Some(seat) {
            None
        } else {
            self.last_play.as_ref()
        }
    }

    pub(crate) fn advance_bidding(&mut self) {
        self.current_player = self.current_player.next();
    }

    pub(crate) fn start_playing(&mut self, landlord: PlayerPosition) {
        self.phase = RoundPhase::Playing;
        self.current_player = landlord;
        self.clear_trick();
    }

    pub(crate) fn record_play(&mut self, seat: PlayerPosition, combination: Combination) {
        self.last_play = Some(combination);
        self.last_play_owner = Some(seat);
        self.pass_count = 0;
        self.current_player = seat.next();
    }

    /// Records a pass; returns true when control went back to the trick owner.
    pub(crate) fn record_pass(&mut self) -> bool {
        self.pass_count = self.pass_count.saturating_add(1);
        self.current_player = self.current_player.next();

        let cycled = self.last_play_owner == Some(self.current_player)
            && usize::from(self.pass_count) >= NUM_PLAYERS - 1;
        if cycled {
            self.clear_trick();
        }
        cycled
    }

    pub(crate) fn finish(&mut self, result: RoundResult) {
        self.phase = RoundPhase::Finished(result);
    }

    fn clear_trick(&mut self) {
        self.last_play = None;
        self.last_play_owner = None;
        self.pass_count = 0;
    }
}
