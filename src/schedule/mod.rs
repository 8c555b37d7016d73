pub mod types;
pub mod tracker;
pub mod candidates;
pub mod round_builder;
pub mod engine;

pub use types::{Match, Pair, Player, Round, Schedule, ScheduleReport, Score};
pub use tracker::FairnessTracker;
pub use round_builder::{MatchScore, RoundBuilder};
pub use engine::{generate, max_matches_per_round, resolve_seed};
