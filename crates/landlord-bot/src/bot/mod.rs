mod bid;
mod params;
mod play;

pub use bid::BidPlanner;
pub use params::BotParams;
pub use play::PlayPlanner;

use landlord_core::game::round::RoundState;
use landlord_core::model::hand::Hand;
use landlord_core::model::player::{NUM_PLAYERS, PlayerPosition, Team};
use landlord_core::strategy::offensive_posture;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BotDifficulty {
    /// Plays the first legal combination and never cooperates.
    Easy,
    #[default]
    Normal,
    /// Bids more freely and blocks opponents close to going out.
    Hard,
}

impl BotDifficulty {
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| match std::env::var("LANDLORD_BOT_DIFFICULTY") {
            Ok(raw) => Self::parse(&raw).unwrap_or_default(),
            Err(_) => BotDifficulty::default(),
        })
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(BotDifficulty::Easy),
            "normal" | "default" => Some(BotDifficulty::Normal),
            "hard" => Some(BotDifficulty::Hard),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "easy",
            BotDifficulty::Normal => "normal",
            BotDifficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStyle {
    /// Shed weak cards, keep bombs and high cards for later.
    Conserve,
    /// Short hand: spend strength to reach the finish.
    Race,
    /// Fellow farmer holds the table.
    Support,
    /// An opponent is about to go out.
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotFeatures {
    cooperate: bool,
}

impl BotFeatures {
    pub const fn new(cooperate: bool) -> Self {
        Self { cooperate }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn cooperate_enabled(self) -> bool {
        self.cooperate
    }

    pub fn with_cooperation(mut self, enabled: bool) -> Self {
        self.cooperate = enabled;
        self
    }

    fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let cooperate = read("LANDLORD_BOT_COOPERATE")
            .map(|raw| !matches!(raw.trim(), "0" | "false" | "FALSE" | "off" | "OFF"))
            .unwrap_or(true);
        Self { cooperate }
    }
}

impl Default for BotFeatures {
    fn default() -> Self {
        Self { cooperate: true }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub round: &'a RoundState,
    pub landlord: Option<PlayerPosition>,
    pub hand_sizes: [usize; NUM_PLAYERS],
    pub difficulty: BotDifficulty,
    pub params: &'a BotParams,
    pub features: BotFeatures,
}

impl<'a> BotContext<'a> {
    pub fn is_landlord(&self) -> bool {
        self.landlord == Some(self.seat)
    }

    pub fn team_of(&self, seat: PlayerPosition) -> Option<Team> {
        self.landlord.map(|landlord| Team::of(seat, landlord))
    }

    pub fn is_partner(&self, seat: PlayerPosition) -> bool {
        seat != self.seat && !self.is_landlord() && self.team_of(seat) == Some(Team::Farmers)
    }

    /// Fewest cards held by any opponent.
    pub fn opponent_min_cards(&self) -> usize {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .filter(|seat| *seat != self.seat && !self.is_partner(*seat))
            .map(|seat| self.hand_sizes[seat.index()])
            .min()
            .unwrap_or(usize::MAX)
    }

    pub fn wants_offensive(&self) -> bool {
        offensive_posture(self.hand.len(), self.is_landlord())
    }
}

pub(crate) fn determine_style(ctx: &BotContext<'_>) -> BotStyle {
    if ctx.wants_offensive() {
        return BotStyle::Race;
    }

    let owner = ctx.round.reference_for(ctx.seat).and(ctx.round.last_play_owner());
    if let Some(owner) = owner {
        if ctx.difficulty != BotDifficulty::Easy
            && ctx.features.cooperate_enabled()
            && ctx.is_partner(owner)
        {
            return BotStyle::Support;
        }
    }

    if ctx.difficulty == BotDifficulty::Hard && ctx.opponent_min_cards() <= ctx.params.threat_cards
    {
        return BotStyle::Block;
    }

    BotStyle::Conserve
}

#[cfg(test)]
mod tests {
    use super::*;
    use landlord_core::game::validator::TurnValidator;
    use landlord_core::model::card::parse_cards;
    use std::collections::HashMap;

    fn hand(codes: &str) -> Hand {
        Hand::with_cards(parse_cards(codes).unwrap())
    }

    fn context<'a>(
        validator: &'a TurnValidator,
        seat: PlayerPosition,
        difficulty: BotDifficulty,
        params: &'a BotParams,
    ) -> BotContext<'a> {
        BotContext {
            seat,
            hand: validator.hand(seat),
            round: validator.round(),
            landlord: validator.landlord(),
            hand_sizes: PlayerPosition::LOOP.map(|s| validator.hand(s).len()),
            difficulty,
            params,
            features: BotFeatures::default(),
        }
    }

    #[test]
    fn bot_features_default_to_cooperation() {
        let features = BotFeatures::from_reader(|_| None);
        assert!(features.cooperate_enabled());
    }

    #[test]
    fn bot_features_respect_flags() {
        let mut vars = HashMap::new();
        vars.insert("LANDLORD_BOT_COOPERATE".to_string(), "off".to_string());
        let features = BotFeatures::from_reader(|key| vars.get(key).cloned());
        assert!(!features.cooperate_enabled());
    }

    #[test]
    fn difficulty_labels_parse() {
        assert_eq!(BotDifficulty::parse("HARD"), Some(BotDifficulty::Hard));
        assert_eq!(BotDifficulty::parse(" easy "), Some(BotDifficulty::Easy));
        assert_eq!(BotDifficulty::parse("expert"), None);
        assert_eq!(BotDifficulty::Normal.as_str(), "normal");
    }

    #[test]
    fn farmer_supports_partner_trick() {
        let mut validator = TurnValidator::in_play(
            [
                hand("3S 4H 5D 6C 8S 9S 10S JS QS KS AS"),
                hand("7S 8H 9D 10C JC QC KD AD 2H 4C 5C"),
                hand("3C 6S 7D 8D 9H 10H JH QH KH AH 2S"),
            ],
            PlayerPosition::South,
            1,
        );
        let three = parse_cards("3S").unwrap()[0].id;
        validator.play_cards(PlayerPosition::South, &[three]).unwrap();
        let east_seven = parse_cards("7S").unwrap()[0].id;
        validator.play_cards(PlayerPosition::East, &[east_seven]).unwrap();

        let params = BotParams::default();
        let west = context(&validator, PlayerPosition::West, BotDifficulty::Normal, &params);
        assert!(west.is_partner(PlayerPosition::East));
        assert_eq!(determine_style(&west), BotStyle::Support);

        let easy = context(&validator, PlayerPosition::West, BotDifficulty::Easy, &params);
        assert_eq!(determine_style(&easy), BotStyle::Conserve);
    }

    #[test]
    fn hard_bot_blocks_short_opponent() {
        let validator = TurnValidator::in_play(
            [
                hand("3S 4H"),
                hand("7S 8H 9D 10C JC QC KD AD 2H 4C 5C"),
                hand("3C 6S 7D 8D 9H 10H JH QH KH AH 2S"),
            ],
            PlayerPosition::South,
            1,
        );
        let params = BotParams::default();
        let east = context(&validator, PlayerPosition::East, BotDifficulty::Hard, &params);
        assert_eq!(east.opponent_min_cards(), 2);
        assert_eq!(determine_style(&east), BotStyle::Block);

        let normal = context(&validator, PlayerPosition::East, BotDifficulty::Normal, &params);
        assert_eq!(determine_style(&normal), BotStyle::Conserve);
    }
}
