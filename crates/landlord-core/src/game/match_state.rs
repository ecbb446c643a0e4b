use crate::game::round::{RoundPhase, RoundResult};
use crate::game::rules::RulesConfig;
use crate::game::serialization::MatchSnapshot;
use crate::game::settlement::Settlement;
use crate::game::validator::TurnValidator;
use crate::model::deck::Deck;
use crate::model::player::PlayerPosition;
use crate::model::score::ScoreBoard;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A seeded sequence of games between the same three seats.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: ScoreBoard,
    rules: RulesConfig,
    game_number: u32,
    deals_dealt: u32,
    redeals: u32,
    first_bidder: PlayerPosition,
    validator: TurnValidator,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(first_bidder: PlayerPosition) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(first_bidder, seed)
    }

    pub fn with_seed(first_bidder: PlayerPosition, seed: u64) -> Self {
        Self::with_seed_and_rules(seed, 1, first_bidder, RulesConfig::default())
    }

    /// Starts at the `deals_dealt`-th deal of the seeded sequence.
    pub fn with_seed_and_rules(
        seed: u64,
        deals_dealt: u32,
        first_bidder: PlayerPosition,
        rules: RulesConfig,
    ) -> Self {
        let deals_dealt = deals_dealt.max(1);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 1..deals_dealt {
            let _ = Deck::shuffled(&mut rng);
        }

        let deck = Deck::shuffled(&mut rng);
        let validator = TurnValidator::with_rules(deck.deal(), first_bidder, rules);

        Self {
            scores: ScoreBoard::new(),
            rules,
            game_number: 1,
            deals_dealt,
            redeals: 0,
            first_bidder,
            validator,
            rng,
            seed,
        }
    }

    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Self {
        let mut state = MatchState::with_seed_and_rules(
            snapshot.seed,
            snapshot.deals_dealt,
            snapshot.first_bidder,
            snapshot.rules,
        );
        state.game_number = snapshot.game_number.max(1);
        state.scores.set_totals(snapshot.scores);
        state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn validator(&self) -> &TurnValidator {
        &self.validator
    }

    pub fn validator_mut(&mut self) -> &mut TurnValidator {
        &mut self.validator
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    pub fn deals_dealt(&self) -> u32 {
        self.deals_dealt
    }

    /// Redeals of the current game after everyone declined to bid.
    pub fn redeals(&self) -> u32 {
        self.redeals
    }

    pub fn first_bidder(&self) -> PlayerPosition {
        self.first_bidder
    }

    pub fn needs_redeal(&self) -> bool {
        matches!(
            self.validator.phase(),
            RoundPhase::Finished(RoundResult::Voided)
        )
    }

    pub fn is_game_over(&self) -> bool {
        matches!(
            self.validator.phase(),
            RoundPhase::Finished(RoundResult::Won { .. })
        )
    }

    /// Throws in the current cards and deals again to the same first bidder.
    pub fn redeal(&mut self) {
        self.redeals += 1;
        self.deal_next();
    }

    /// Books the finished game's settlement and deals the next game.
    pub fn finish_game_and_start_next(&mut self) -> Option<Settlement> {
        let settlement = self.validator.settlement().copied();
        if let Some(settlement) = &settlement {
            self.scores.apply(settlement);
        }

        self.game_number += 1;
        self.redeals = 0;
        self.first_bidder = self.first_bidder.next();
        self.deal_next();
        settlement
    }

    fn deal_next(&mut self) {
        let deck = Deck::shuffled(&mut self.rng);
        self.deals_dealt += 1;
        self.validator.reset(deck.deal(), self.first_bidder);
    }
}

#[cfg(test)]
mod tests {
    use super::MatchState;
    use crate::game::round::RoundPhase;
    use crate::model::deck::HAND_SIZE;
    use crate::model::player::PlayerPosition;

    fn play_out(state: &mut MatchState) {
        let first = state.first_bidder();
        state.validator_mut().bid(first, 3).unwrap();
        for _ in 0..500 {
            if state.is_game_over() {
                return;
            }
            let seat = state.validator().current_player();
            let hint = state.validator().hint(seat);
            match hint.combination {
                Some(combination) => {
                    state
                        .validator_mut()
                        .play_cards(seat, &combination.card_ids())
                        .unwrap();
                }
                None => {
                    state.validator_mut().pass_turn(seat).unwrap();
                }
            }
        }
        panic!("game did not finish");
    }

    #[test]
    fn new_match_starts_bidding_with_full_hands() {
        let state = MatchState::with_seed(PlayerPosition::East, 0);
        assert_eq!(state.game_number(), 1);
        assert_eq!(state.validator().phase(), RoundPhase::Bidding);
        assert_eq!(state.validator().current_player(), PlayerPosition::East);
        for seat in PlayerPosition::LOOP {
            assert_eq!(state.validator().hand(seat).len(), HAND_SIZE);
        }
        assert_eq!(state.validator().bonus().len(), 3);
    }

    #[test]
    fn same_seed_deals_same_cards() {
        let a = MatchState::with_seed(PlayerPosition::South, 42);
        let b = MatchState::with_seed(PlayerPosition::South, 42);
        assert_eq!(a.validator().hands(), b.validator().hands());
    }

    #[test]
    fn voided_game_is_redealt_to_same_bidder() {
        let mut state = MatchState::with_seed(PlayerPosition::West, 9);
        let before = state.validator().hands().clone();
        for seat in [PlayerPosition::West, PlayerPosition::South, PlayerPosition::East] {
            state.validator_mut().bid(seat, 0).unwrap();
        }
        assert!(state.needs_redeal());
        state.redeal();
        assert_eq!(state.redeals(), 1);
        assert_eq!(state.deals_dealt(), 2);
        assert_eq!(state.first_bidder(), PlayerPosition::West);
        assert_ne!(state.validator().hands(), &before);
        assert_eq!(state.validator().phase(), RoundPhase::Bidding);
    }

    #[test]
    fn finishing_a_game_books_points_and_rotates_bidder() {
        let mut state = MatchState::with_seed(PlayerPosition::South, 5);
        play_out(&mut state);
        let settlement = state.finish_game_and_start_next().unwrap();

        assert_eq!(state.game_number(), 2);
        assert_eq!(state.first_bidder(), PlayerPosition::East);
        let total: i64 = state.scores().standings().iter().sum();
        assert_eq!(total, 0);
        assert_eq!(
            state.scores().score(PlayerPosition::South),
            settlement.delta(PlayerPosition::South)
        );
        assert_eq!(state.validator().phase(), RoundPhase::Bidding);
    }
}
