use super::{PlayDecision, Policy, PolicyContext};
use crate::bot::{
    BidPlanner, BotContext, BotDifficulty, BotParams, BotStyle, PlayPlanner, determine_style,
};
use landlord_core::model::combination::Combination;
use landlord_core::strategy::legal_candidates;
use tracing::{Level, event};

/// Adapter that wraps BidPlanner/PlayPlanner to implement the Policy trait
pub struct HeuristicPolicy {
    difficulty: BotDifficulty,
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            params: BotParams::default(),
        }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn hard() -> Self {
        Self::new(BotDifficulty::Hard)
    }

    pub fn with_params(mut self, params: BotParams) -> Self {
        self.params = params;
        self
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    fn bot_context<'a>(&'a self, ctx: &PolicyContext<'a>) -> BotContext<'a> {
        BotContext {
            seat: ctx.seat,
            hand: ctx.hand,
            round: ctx.round,
            landlord: ctx.landlord,
            hand_sizes: ctx.hand_sizes,
            difficulty: self.difficulty,
            params: &self.params,
            features: ctx.features,
        }
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &PolicyContext) -> u8 {
        let bot_ctx = self.bot_context(ctx);
        let amount = BidPlanner::choose(&bot_ctx, ctx.bidding);
        log_bid_decision(ctx, self.difficulty, &self.params, amount);
        amount
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> PlayDecision {
        let bot_ctx = self.bot_context(ctx);
        let legal = legal_candidates(ctx.hand.cards(), ctx.round.reference_for(ctx.seat));
        let style = determine_style(&bot_ctx);

        match PlayPlanner::choose(&legal, &bot_ctx) {
            Some(combination) => {
                log_play_decision(ctx, self.difficulty, style, &legal, Some(&combination));
                PlayDecision::Play(combination.card_ids())
            }
            None => {
                log_play_decision(ctx, self.difficulty, style, &legal, None);
                PlayDecision::Pass
            }
        }
    }
}

fn log_bid_decision(
    ctx: &PolicyContext,
    difficulty: BotDifficulty,
    params: &BotParams,
    amount: u8,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    event!(
        target: "landlord_bot::decision",
        Level::INFO,
        seat = %ctx.seat,
        difficulty = difficulty.as_str(),
        strength = BidPlanner::hand_strength(ctx.hand, params),
        current_bid = ctx.bidding.current_bid(),
        amount,
        "bid decision"
    );
}

fn log_play_decision(
    ctx: &PolicyContext,
    difficulty: BotDifficulty,
    style: BotStyle,
    legal: &[Combination],
    chosen: Option<&Combination>,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let choice = chosen.map_or_else(|| "pass".to_string(), |combination| combination.to_string());
    let legal_preview = if legal.len() <= 4 {
        legal
            .iter()
            .map(|combination| combination.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} candidates", legal.len())
    };

    event!(
        target: "landlord_bot::decision",
        Level::INFO,
        seat = %ctx.seat,
        difficulty = difficulty.as_str(),
        style = ?style,
        hand_size = ctx.hand.len(),
        legal_count = legal.len(),
        legal = %legal_preview,
        chosen = %choice,
        facing = ctx.round.reference_for(ctx.seat).map(|play| play.kind().as_str()),
        "play decision"
    );
}

#[cfg(test)]
mod tests {
    use super::HeuristicPolicy;
    use crate::bot::BotFeatures;
    use crate::policy::{PlayDecision, Policy, PolicyContext};
    use landlord_core::game::protocol::Response;
    use landlord_core::game::validator::TurnValidator;
    use landlord_core::model::deck::Deck;
    use landlord_core::model::player::PlayerPosition;

    #[test]
    fn bots_finish_a_game_through_requests() {
        let deal = Deck::shuffled_with_seed(31337).deal();
        let mut validator = TurnValidator::new(deal, PlayerPosition::East);
        let mut policies = [
            HeuristicPolicy::easy(),
            HeuristicPolicy::normal(),
            HeuristicPolicy::hard(),
        ];

        let mut steps = 0;
        while !validator.is_finished() {
            steps += 1;
            assert!(steps < 500, "game did not finish");
            let seat = validator.current_player();
            let ctx = PolicyContext::from_validator(&validator, seat, BotFeatures::default());
            let request = if validator.landlord().is_none() {
                let amount = policies[seat.index()].choose_bid(&ctx);
                landlord_core::game::protocol::Request::Bid {
                    player: seat,
                    amount,
                }
            } else {
                policies[seat.index()].choose_play(&ctx).into_request(seat)
            };
            let response = validator.handle(request);
            assert!(
                matches!(response, Response::Accepted(_)),
                "{response:?}"
            );
        }
    }

    #[test]
    fn leader_never_passes() {
        let deal = Deck::shuffled_with_seed(8).deal();
        let mut validator = TurnValidator::new(deal, PlayerPosition::South);
        validator.bid(PlayerPosition::South, 3).unwrap();
        let ctx = PolicyContext::from_validator(&validator, PlayerPosition::South, BotFeatures::default());
        let decision = HeuristicPolicy::normal().choose_play(&ctx);
        assert!(matches!(decision, PlayDecision::Play(cards) if !cards.is_empty()));
    }
}
