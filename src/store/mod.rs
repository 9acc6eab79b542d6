//! Persistent store contract: CRUD per logical table plus push-based
//! change notification. Any store honoring this trait is substitutable;
//! [`MemoryStore`] is the in-process reference implementation.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Bracket, Fixture, FixtureId, Player, PlayerStats, SeasonState};
use tokio::sync::broadcast;

/// Logical tables the store manages.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Players,
    Matches,
    Bracket,
    SeasonState,
}

/// What kind of mutation happened.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Change notification. Carries no row payload: subscribers are expected
/// to re-fetch whatever they need.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoreEvent {
    pub table: Table,
    pub kind: ChangeKind,
}

/// Errors reported by a store backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// Uniqueness or other constraint violation on insert.
    Constraint(String),
    /// The requested row does not exist.
    NotFound,
    /// Backend-specific failure (connection, serialization, ...).
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Constraint(what) => write!(f, "constraint violation: {}", what),
            StoreError::NotFound => write!(f, "row not found"),
            StoreError::Backend(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// The store contract: typed CRUD per table plus subscribe.
///
/// The singleton tables (`bracket`, `season_state`) are written through
/// upsert-style operations so callers never race a read-then-insert;
/// `season_state` is implicitly created as open on first read.
pub trait Store: Send + Sync {
    // -- players --

    /// All players, ordered by username.
    fn list_players(&self) -> Result<Vec<Player>, StoreError>;

    fn find_player(&self, username: &str) -> Result<Option<Player>, StoreError>;

    /// Insert a signup. Usernames are unique (case-insensitive).
    fn insert_player(&self, player: Player) -> Result<(), StoreError>;

    /// Replace the stored row for `username` with `player`.
    fn update_player(&self, username: &str, player: Player) -> Result<(), StoreError>;

    fn delete_player(&self, username: &str) -> Result<(), StoreError>;

    /// Bulk stats patch: each named player's stats are overwritten.
    /// Names without a matching row are ignored.
    fn put_player_stats(&self, stats: &[(String, PlayerStats)]) -> Result<(), StoreError>;

    // -- matches --

    /// All fixtures, ordered by round ascending then priority descending.
    fn list_fixtures(&self) -> Result<Vec<Fixture>, StoreError>;

    fn find_fixture(&self, id: FixtureId) -> Result<Option<Fixture>, StoreError>;

    /// Delete all fixtures and bulk-insert the given ones (schedule
    /// regeneration is never incremental).
    fn replace_fixtures(&self, fixtures: Vec<Fixture>) -> Result<(), StoreError>;

    fn update_fixture(&self, fixture: Fixture) -> Result<(), StoreError>;

    /// Reset every fixture's result back to pending.
    fn clear_fixture_results(&self) -> Result<(), StoreError>;

    fn delete_fixtures(&self) -> Result<(), StoreError>;

    // -- bracket (singleton) --

    fn load_bracket(&self) -> Result<Option<Bracket>, StoreError>;

    /// Upsert the single bracket row.
    fn save_bracket(&self, bracket: &Bracket) -> Result<(), StoreError>;

    fn delete_bracket(&self) -> Result<(), StoreError>;

    // -- season state (singleton) --

    /// Read the season state, creating it as open if absent.
    fn season_state(&self) -> Result<SeasonState, StoreError>;

    /// Upsert the season-state row.
    fn set_season_concluded(&self, concluded: bool) -> Result<(), StoreError>;

    // -- notifications --

    /// Subscribe to change notifications for one table. Events carry no
    /// payload; receivers re-fetch on wakeup, which is idempotent and
    /// safe to run redundantly.
    fn subscribe(&self, table: Table) -> broadcast::Receiver<StoreEvent>;
}
