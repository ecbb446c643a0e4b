/// Tunable weights for bidding and play. Defaults are the shipped bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotParams {
    pub rocket_weight: i32,
    pub bomb_weight: i32,
    pub big_joker_weight: i32,
    pub small_joker_weight: i32,
    pub two_weight: i32,
    pub ace_weight: i32,
    pub plane_weight: i32,
    /// Hand strength needed to bid 1, 2 and 3.
    pub bid_thresholds: [i32; 3],
    /// Subtracted from every threshold at hard difficulty.
    pub hard_bid_discount: i32,
    /// Opponent hand size at which a hard bot starts blocking.
    pub threat_cards: usize,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            rocket_weight: 8,
            bomb_weight: 6,
            big_joker_weight: 4,
            small_joker_weight: 3,
            two_weight: 2,
            ace_weight: 1,
            plane_weight: 3,
            bid_thresholds: [7, 10, 14],
            hard_bid_discount: 1,
            threat_cards: 2,
        }
    }
}
