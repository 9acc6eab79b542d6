//! Data model: players, fixtures, bracket, season state, errors.

mod bracket;
mod error;
mod fixture;
mod player;
mod season;

pub use bracket::{Bracket, BracketMatch, Slot};
pub use error::LeagueError;
pub use fixture::{Fixture, FixtureId, FixtureStatus};
pub use player::{Availability, Player, PlayerStats, TimeWindow};
pub use season::{Actor, SeasonState};
