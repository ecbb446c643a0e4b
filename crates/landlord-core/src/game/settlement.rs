use crate::model::player::{PlayerPosition, Team};
use serde::Serialize;

/// Points exchanged at the end of a won game.
///
/// The stake is `bid × 2^doublings`; the landlord wins or loses twice the stake
/// and each farmer the stake, so a settlement always sums to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub landlord: PlayerPosition,
    pub winner: Team,
    pub bid: u8,
    pub doublings: u32,
    pub spring: bool,
}

impl Settlement {
    pub fn compute(
        landlord: PlayerPosition,
        winner: Team,
        bid: u8,
        bombs: u32,
        spring: bool,
    ) -> Self {
        Self {
            landlord,
            winner,
            bid,
            doublings: bombs + u32::from(spring),
            spring,
        }
    }

    pub fn multiplier(&self) -> i64 {
        1i64.checked_shl(self.doublings).unwrap_or(i64::MAX)
    }

    pub fn stake(&self) -> i64 {
        i64::from(self.bid).saturating_mul(self.multiplier())
    }

    pub fn delta(&self, seat: PlayerPosition) -> i64 {
        let sign = if Team::of(seat, self.landlord) == self.winner {
            1
        } else {
            -1
        };
        let share = if seat == self.landlord { 2 } else { 1 };
        sign * share * self.stake()
    }
}
