pub mod record;
pub mod standings;
pub mod store;

pub use record::{MatchRecord, Progress, RoundRecord, Tournament};
pub use standings::{compute_standings, export_standings_to_csv, Standing};
pub use store::{slugify, TournamentStore, TournamentSummary};
