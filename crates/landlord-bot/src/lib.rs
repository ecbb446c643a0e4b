pub mod bot;
pub mod policy;

pub use bot::{
    BidPlanner, BotContext, BotDifficulty, BotFeatures, BotParams, BotStyle, PlayPlanner,
};
pub use policy::{HeuristicPolicy, PlayDecision, Policy, PolicyContext};
