//! Combination search and the play recommender shared by bots and hints.
//!
//! - `potential`: every combination latent in a hand, and the subset legal against the table.
//! - `strength`: coarse strength tiers per combination.
//! - `scoring`: tunable priority tables.
//! - `recommender`: picks one legal combination and explains the choice.

pub mod potential;
pub mod recommender;
pub mod scoring;
pub mod strength;

pub use potential::{legal_candidates, potential_combinations};
pub use recommender::{Recommendation, offensive_posture, recommend};
pub use scoring::{GamePace, RemainingBucket, StrengthAdjustment};
pub use strength::{StrengthTier, tier_of};
