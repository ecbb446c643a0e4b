use super::{BotContext, BotDifficulty, BotParams};
use landlord_core::game::bidding::BiddingState;
use landlord_core::model::combination::{CombinationKind, RankCounts};
use landlord_core::model::hand::Hand;
use landlord_core::model::rank::Rank;
use landlord_core::strategy::potential_combinations;

pub struct BidPlanner;

impl BidPlanner {
    /// Rough count of control cards: jokers, bombs, twos, aces and planes.
    pub fn hand_strength(hand: &Hand, params: &BotParams) -> i32 {
        let counts = RankCounts::from_cards(hand.cards());
        let mut strength = 0;

        let small = counts.get(Rank::SmallJoker) > 0;
        let big = counts.get(Rank::BigJoker) > 0;
        if small && big {
            strength += params.rocket_weight;
        } else if big {
            strength += params.big_joker_weight;
        } else if small {
            strength += params.small_joker_weight;
        }

        for rank in Rank::SUITED {
            match counts.get(rank) {
                4 => strength += params.bomb_weight,
                n if rank == Rank::Two => strength += params.two_weight * i32::from(n),
                n if rank == Rank::Ace => strength += params.ace_weight * i32::from(n),
                _ => {}
            }
        }

        let planes = potential_combinations(hand.cards())
            .iter()
            .filter(|combination| {
                combination.kind() == CombinationKind::Plane
                    && combination.len() == 3 * CombinationKind::MIN_PLANE
            })
            .count();
        strength += params.plane_weight * i32::try_from(planes).unwrap_or(i32::MAX);

        strength
    }

    /// Bid for the current hand: the strength-derived amount if it raises the
    /// table, otherwise 0.
    pub fn choose(ctx: &BotContext<'_>, bidding: &BiddingState) -> u8 {
        let strength = Self::hand_strength(ctx.hand, ctx.params);
        let discount = match ctx.difficulty {
            BotDifficulty::Hard => ctx.params.hard_bid_discount,
            _ => 0,
        };

        let mut wanted: u8 = 0;
        for (amount, threshold) in (1u8..).zip(ctx.params.bid_thresholds) {
            if strength >= threshold - discount {
                wanted = amount;
            }
        }
        if ctx.difficulty == BotDifficulty::Easy {
            wanted = wanted.min(1);
        }
        let wanted = wanted.min(bidding.max_bid());

        if wanted > bidding.current_bid() {
            wanted
        } else {
            0
        }
    }
}
