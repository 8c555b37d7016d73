use thiserror::Error;

/// Rejected scheduling input. No schedule is produced when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least 4 players are needed to build doubles matches (got {found})")]
    TooFewPlayers { found: usize },

    #[error("courts and rounds must both be at least 1 (got {courts} courts, {rounds} rounds)")]
    InvalidDimensions { courts: u32, rounds: u32 },

    #[error("{players} players on {courts} courts cannot fill a single match per round")]
    NoMatchesPerRound { players: usize, courts: u32 },

    #[error("player '{name}' appears more than once in the roster")]
    DuplicatePlayer { name: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Tournament not found: {id}")]
    TournamentNotFound { id: String },

    #[error("A tournament named '{id}' already exists")]
    TournamentExists { id: String },

    #[error("Match {index} of round {round} not found")]
    MatchNotFound { round: usize, index: usize },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
