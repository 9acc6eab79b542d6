//! Online league organizer: round-robin season scheduling, standings with
//! deterministic tie-breaks, and a season-gated single-elimination playoff
//! bracket.

pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    compute_ranking, generate_bracket, generate_schedule, qualifier_count, record_result,
    recompute_stats, RankedRow,
};
pub use models::{
    Actor, Availability, Bracket, BracketMatch, Fixture, FixtureId, FixtureStatus, LeagueError,
    Player, PlayerStats, SeasonState, Slot, TimeWindow,
};
pub use store::{ChangeKind, MemoryStore, Store, StoreError, StoreEvent, Table};
