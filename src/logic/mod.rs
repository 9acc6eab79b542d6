//! Pure engine logic: standings, schedule generation, bracket progression.
//!
//! Everything here operates on snapshots passed in by the caller and has
//! no store access; the service layer fetches fresh data around each call.

mod bracket;
mod schedule;
mod standings;

pub use bracket::{generate_bracket, record_result};
pub use schedule::generate_schedule;
pub use standings::{compute_ranking, qualifier_count, recompute_stats, RankedRow};
