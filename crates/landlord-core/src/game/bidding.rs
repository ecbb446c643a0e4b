use crate::game::rejection::Rejection;
use crate::model::player::{NUM_PLAYERS, PlayerPosition};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bid {
    pub player: PlayerPosition,
    pub amount: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiddingState {
    max_bid: u8,
    current_bid: u8,
    landlord: Option<PlayerPosition>,
    history: Vec<Bid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// More players still have to act.
    Open,
    Won { landlord: PlayerPosition, bid: u8 },
    /// Everybody declined; the cards must be re-dealt.
    Voided,
}

impl BiddingState {
    pub fn new(max_bid: u8) -> Self {
        Self {
            max_bid,
            current_bid: 0,
            landlord: None,
            history: Vec::with_capacity(NUM_PLAYERS),
        }
    }

    pub fn max_bid(&self) -> u8 {
        self.max_bid
    }

    pub fn current_bid(&self) -> u8 {
        self.current_bid
    }

    pub fn landlord(&self) -> Option<PlayerPosition> {
        self.landlord
    }

    pub fn history(&self) -> &[Bid] {
        &self.history
    }

    pub fn has_bid(&self, seat: PlayerPosition) -> bool {
        self.history.iter().any(|bid| bid.player == seat)
    }

    /// Checks a bid without recording it.
    pub fn check(&self, seat: PlayerPosition, amount: u8) -> Result<(), Rejection> {
        if self.has_bid(seat) {
            return Err(Rejection::AlreadyBid { player: seat });
        }
        if amount > self.max_bid {
            return Err(Rejection::BidTooHigh {
                amount,
                max: self.max_bid,
            });
        }
        if amount != 0 && amount <= self.current_bid {
            return Err(Rejection::BidTooLow {
                amount,
                current: self.current_bid,
            });
        }
        Ok(())
    }

    pub fn submit(&mut self, seat: PlayerPosition, amount: u8) -> Result<BidOutcome, Rejection> {
        self.check(seat, amount)?;

        self.history.push(Bid {
            player: seat,
            amount,
        });
        if amount > 0 {
            self.current_bid = amount;
            self.landlord = Some(seat);
        }

        if amount == self.max_bid {
            return Ok(BidOutcome::Won {
                landlord: seat,
                bid: amount,
            });
        }

        if self.history.len() >= NUM_PLAYERS {
            return Ok(match self.landlord {
                Some(landlord) => BidOutcome::Won {
                    landlord,
                    bid: self.current_bid,
                },
                None => BidOutcome::Voided,
            });
        }

        Ok(BidOutcome::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::{BidOutcome, BiddingState};
    use crate::game::rejection::Rejection;
    use crate::model::player::PlayerPosition;

    #[test]
    fn max_bid_ends_bidding_immediately() {
        let mut bidding = BiddingState::new(3);
        assert_eq!(
            bidding.submit(PlayerPosition::South, 3),
            Ok(BidOutcome::Won {
                landlord: PlayerPosition::South,
                bid: 3
            })
        );
    }

    #[test]
    fn highest_bid_wins_after_everyone_acts() {
        let mut bidding = BiddingState::new(3);
        assert_eq!(bidding.submit(PlayerPosition::South, 1), Ok(BidOutcome::Open));
        assert_eq!(bidding.submit(PlayerPosition::East, 2), Ok(BidOutcome::Open));
        assert_eq!(
            bidding.submit(PlayerPosition::West, 0),
            Ok(BidOutcome::Won {
                landlord: PlayerPosition::East,
                bid: 2
            })
        );
    }

    #[test]
    fn all_passes_void_the_deal() {
        let mut bidding = BiddingState::new(3);
        for seat in PlayerPosition::LOOP.iter().take(2) {
            assert_eq!(bidding.submit(*seat, 0), Ok(BidOutcome::Open));
        }
        assert_eq!(
            bidding.submit(PlayerPosition::West, 0),
            Ok(BidOutcome::Voided)
        );
    }

    #[test]
    fn bid_must_raise() {
        let mut bidding = BiddingState::new(3);
        bidding.submit(PlayerPosition::South, 2).unwrap();
        assert_eq!(
            bidding.submit(PlayerPosition::East, 2),
            Err(Rejection::BidTooLow {
                amount: 2,
                current: 2
            })
        );
        assert_eq!(bidding.history().len(), 1);
    }

    #[test]
    fn bid_above_max_is_rejected() {
        let mut bidding = BiddingState::new(3);
        assert_eq!(
            bidding.submit(PlayerPosition::South, 4),
            Err(Rejection::BidTooHigh { amount: 4, max: 3 })
        );
    }

    #[test]
    fn each_player_bids_once() {
        let mut bidding = BiddingState::new(3);
        bidding.submit(PlayerPosition::South, 1).unwrap();
        assert_eq!(
            bidding.submit(PlayerPosition::South, 2),
            Err(Rejection::AlreadyBid {
                player: PlayerPosition::South
            })
        );
    }
}
