//! Seeded tournament harness for the landlord bots.

pub mod analytics;
pub mod config;
pub mod logging;
pub mod tournament;
