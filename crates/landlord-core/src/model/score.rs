use crate::game::settlement::Settlement;
use crate::model::player::{NUM_PLAYERS, PlayerPosition};

/// Running point totals across games; points move between seats, so totals sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [i64; NUM_PLAYERS],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            totals: [0; NUM_PLAYERS],
        }
    }

    pub fn add_points(&mut self, seat: PlayerPosition, points: i64) {
        self.totals[seat.index()] += points;
    }

    pub fn set_totals(&mut self, totals: [i64; NUM_PLAYERS]) {
        self.totals = totals;
    }

    pub fn score(&self, seat: PlayerPosition) -> i64 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[i64; NUM_PLAYERS] {
        &self.totals
    }

    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .max_by_key(|seat| (self.score(*seat), std::cmp::Reverse(seat.index())))
            .unwrap_or(PlayerPosition::South)
    }

    pub fn apply(&mut self, settlement: &Settlement) {
        for seat in PlayerPosition::LOOP {
            self.add_points(seat, settlement.delta(seat));
        }
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::ScoreBoard;
    use crate::game::settlement::Settlement;
    use crate::model::player::{PlayerPosition, Team};

    #[test]
    fn scoreboard_tracks_points() {
        let mut board = ScoreBoard::new();
        board.add_points(PlayerPosition::East, 4);
        assert_eq!(board.score(PlayerPosition::East), 4);
        assert_eq!(board.score(PlayerPosition::South), 0);
    }

    #[test]
    fn leading_player_is_highest_score() {
        let mut board = ScoreBoard::new();
        board.set_totals([-2, 6, -4]);
        assert_eq!(board.leading_player(), PlayerPosition::East);
    }

    #[test]
    fn leading_player_ties_break_to_lower_seat() {
        let board = ScoreBoard::new();
        assert_eq!(board.leading_player(), PlayerPosition::South);
    }

    #[test]
    fn applying_settlement_keeps_zero_sum() {
        let mut board = ScoreBoard::new();
        let settlement = Settlement::compute(PlayerPosition::West, Team::Farmers, 2, 1, false);
        board.apply(&settlement);
        assert_eq!(board.standings().iter().sum::<i64>(), 0);
        assert_eq!(board.score(PlayerPosition::West), -8);
        assert_eq!(board.score(PlayerPosition::South), 4);
    }
}
