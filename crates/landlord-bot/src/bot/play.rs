use super::{BotContext, BotDifficulty, BotStyle, determine_style};
use landlord_core::model::combination::Combination;
use landlord_core::strategy::{StrengthTier, recommend, tier_of};
use std::borrow::Cow;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks a combination from `legal`, or `None` to pass.
    pub fn choose(legal: &[Combination], ctx: &BotContext<'_>) -> Option<Combination> {
        if legal.is_empty() {
            return None;
        }
        let leading = ctx.round.reference_for(ctx.seat).is_none();

        if ctx.difficulty == BotDifficulty::Easy {
            return legal.first().cloned();
        }

        let style = determine_style(ctx);
        let mut candidates: Cow<'_, [Combination]> = Cow::Borrowed(legal);
        match style {
            BotStyle::Support => {
                let gentle: Vec<Combination> = legal
                    .iter()
                    .filter(|combination| tier_of(combination) < StrengthTier::Strong)
                    .cloned()
                    .collect();
                if gentle.is_empty() {
                    return None;
                }
                candidates = Cow::Owned(gentle);
            }
            BotStyle::Block if !leading => return block(legal),
            _ => {}
        }

        let offensive = matches!(style, BotStyle::Race | BotStyle::Block);
        recommend(ctx.hand, candidates.as_ref(), ctx.hand.len(), offensive)
            .map(|recommendation| recommendation.combination)
            .or_else(|| leading.then(|| legal.first().cloned()).flatten())
    }
}

/// Strongest ordinary answer, falling back to the smallest bomb.
fn block(legal: &[Combination]) -> Option<Combination> {
    legal
        .iter()
        .filter(|combination| !combination.kind().is_bomb())
        .max_by_key(|combination| (combination.power(), combination.len()))
        .or_else(|| legal.iter().min_by_key(|combination| (combination.kind(), combination.power())))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::PlayPlanner;
    use crate::bot::{BotContext, BotDifficulty, BotFeatures, BotParams};
    use landlord_core::game::validator::TurnValidator;
    use landlord_core::model::card::{CardId, parse_cards};
    use landlord_core::model::combination::{Combination, classify};
    use landlord_core::model::hand::Hand;
    use landlord_core::model::player::PlayerPosition;
    use landlord_core::strategy::legal_candidates;

    fn hand(codes: &str) -> Hand {
        Hand::with_cards(parse_cards(codes).unwrap())
    }

    fn ids(codes: &str) -> Vec<CardId> {
        parse_cards(codes).unwrap().iter().map(|card| card.id).collect()
    }

    fn combo(codes: &str) -> Combination {
        classify(&parse_cards(codes).unwrap())
    }

    fn choose(
        validator: &TurnValidator,
        seat: PlayerPosition,
        difficulty: BotDifficulty,
        features: BotFeatures,
    ) -> Option<Combination> {
        let params = BotParams::default();
        let ctx = BotContext {
            seat,
            hand: validator.hand(seat),
            round: validator.round(),
            landlord: validator.landlord(),
            hand_sizes: PlayerPosition::LOOP.map(|s| validator.hand(s).len()),
            difficulty,
            params: &params,
            features,
        };
        let legal = legal_candidates(
            validator.hand(seat).cards(),
            validator.round().reference_for(seat),
        );
        PlayPlanner::choose(&legal, &ctx)
    }

    fn partner_on_table() -> TurnValidator {
        let mut validator = TurnValidator::in_play(
            [
                hand("3S 4H 5D 6C 8S 9S 10S JS QS KS AS"),
                hand("7S 8H 9D 10C JC QC KD AD 2H 4C 5C"),
                hand("3C 3D 5S 6S 7D 8D 9H 10H JH 2S 2D"),
            ],
            PlayerPosition::South,
            1,
        );
        validator.play_cards(PlayerPosition::South, &ids("3S")).unwrap();
        validator.play_cards(PlayerPosition::East, &ids("9D")).unwrap();
        validator
    }

    #[test]
    fn farmer_does_not_top_partner_with_strong_cards() {
        let validator = partner_on_table();
        let cooperative = choose(
            &validator,
            PlayerPosition::West,
            BotDifficulty::Normal,
            BotFeatures::default(),
        );
        if let Some(play) = &cooperative {
            assert!(play.power() < 14, "{play}");
        }

        let selfish = choose(
            &validator,
            PlayerPosition::West,
            BotDifficulty::Normal,
            BotFeatures::new(false),
        );
        assert!(selfish.is_some());
    }

    #[test]
    fn farmer_passes_when_only_strong_answers_remain() {
        let mut validator = TurnValidator::in_play(
            [
                hand("3S 4H 5D 6C 8S 9S 10S JS QS KS AS"),
                hand("7S 8H 9D 10C JC QC KD AD 2H 4C 5C"),
                hand("3C 3D 4S 4D 5S 5H 6D 6H 7D 7H 2S"),
            ],
            PlayerPosition::South,
            1,
        );
        validator.play_cards(PlayerPosition::South, &ids("3S")).unwrap();
        validator.play_cards(PlayerPosition::East, &ids("KD")).unwrap();
        let play = choose(
            &validator,
            PlayerPosition::West,
            BotDifficulty::Normal,
            BotFeatures::default(),
        );
        assert_eq!(play, None);
    }

    #[test]
    fn hard_bot_blocks_with_highest_answer() {
        let mut validator = TurnValidator::in_play(
            [
                hand("3S 4H 9C"),
                hand("7S 8H 9D 10C JC QC KD AD 2H 4C 5C"),
                hand("3C 6S 7D 8D 9H 10H JH QH KH AH 2S"),
            ],
            PlayerPosition::South,
            1,
        );
        validator.play_cards(PlayerPosition::South, &ids("3S")).unwrap();
        let hard = choose(
            &validator,
            PlayerPosition::East,
            BotDifficulty::Hard,
            BotFeatures::default(),
        );
        assert_eq!(hard, Some(combo("2H")));

        let normal = choose(
            &validator,
            PlayerPosition::East,
            BotDifficulty::Normal,
            BotFeatures::default(),
        );
        assert_eq!(normal, Some(combo("4C")));
    }

    #[test]
    fn easy_bot_plays_first_legal() {
        let validator = partner_on_table();
        let play = choose(
            &validator,
            PlayerPosition::West,
            BotDifficulty::Easy,
            BotFeatures::default(),
        );
        assert_eq!(play, Some(combo("10H")));
    }

    #[test]
    fn leader_always_plays() {
        let validator = TurnValidator::in_play(
            [hand("3S 2S"), hand("4S"), hand("5S")],
            PlayerPosition::South,
            1,
        );
        let play = choose(
            &validator,
            PlayerPosition::South,
            BotDifficulty::Normal,
            BotFeatures::default(),
        );
        assert!(play.is_some());
    }
}
