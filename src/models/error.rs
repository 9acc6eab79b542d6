//! Errors that can occur during league operations.

use crate::store::StoreError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// Not enough players to generate a schedule.
    NotEnoughPlayers { required: usize },
    /// Fewer than 2 ranked players; no playoff bracket can be formed.
    NotEnoughQualifiers,
    /// Playoff action attempted while the regular season is still open.
    SeasonStillOpen,
    /// Regular-season action attempted after the season was concluded.
    SeasonConcluded,
    /// The actor lacks the admin capability for this operation.
    Unauthorized,
    /// Bracket match has an unresolved or BYE slot; no result can be entered.
    MatchNotReady,
    /// No match at the given round/index (or unknown fixture id).
    NoSuchMatch,
    /// Player not found in the store.
    PlayerNotFound(String),
    /// Empty or whitespace-only username on signup.
    InvalidUsername,
    /// A player with this username already exists (usernames are unique).
    DuplicateUsername,
    /// The persistent store reported a failure.
    Store(StoreError),
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::NotEnoughPlayers { required } => {
                write!(f, "Need at least {} players", required)
            }
            LeagueError::NotEnoughQualifiers => {
                write!(f, "Not enough ranked players for playoffs")
            }
            LeagueError::SeasonStillOpen => {
                write!(f, "Playoffs are locked until the regular season is concluded")
            }
            LeagueError::SeasonConcluded => {
                write!(f, "The regular season is over; this action is disabled")
            }
            LeagueError::Unauthorized => write!(f, "Only the admin can do this"),
            LeagueError::MatchNotReady => {
                write!(f, "Both participants must be decided before entering a result")
            }
            LeagueError::NoSuchMatch => write!(f, "Match not found"),
            LeagueError::PlayerNotFound(name) => write!(f, "Player '{}' not found", name),
            LeagueError::InvalidUsername => write!(f, "Username must not be empty"),
            LeagueError::DuplicateUsername => {
                write!(f, "A player with this username already exists")
            }
            LeagueError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for LeagueError {}

impl From<StoreError> for LeagueError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Constraint(_) => LeagueError::DuplicateUsername,
            other => LeagueError::Store(other),
        }
    }
}
