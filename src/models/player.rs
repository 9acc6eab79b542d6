//! Player, availability, and cumulative season stats.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Time-of-day interval a player says they can play in.
///
/// Intervals are half-open for the overlap test so that back-to-back
/// windows (e.g. 18:00-20:00 and 20:00-22:00) do not count as overlapping.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Half-open interval intersection: `start1 < end2 && start2 < end1`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Self-reported availability: weekday tags plus one time window.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    /// Weekday tags (e.g. "mon", "wed"). Free-form strings; matching is exact.
    pub days: Vec<String>,
    pub window: TimeWindow,
}

impl Availability {
    /// True iff both players share at least one day tag and their windows overlap.
    pub fn compatible_with(&self, other: &Availability) -> bool {
        let shares_day = self.days.iter().any(|d| other.days.contains(d));
        shares_day && self.window.overlaps(&other.window)
    }
}

/// Cumulative regular-season stats. Always rebuilt from finished fixtures,
/// never patched incrementally.
///
/// All fields default to zero so rows with missing numeric columns
/// deserialize cleanly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub games_played: u32,
}

impl PlayerStats {
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// A signed-up player. `username` is the unique key used everywhere
/// (fixtures and bracket slots refer to players by name).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub platform: String,
    pub team: String,
    /// None when the player gave no availability; such players never get
    /// a priority-flagged fixture.
    pub availability: Option<Availability>,
    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    /// Create a new signup with zeroed stats and no availability.
    pub fn new(
        username: impl Into<String>,
        platform: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            platform: platform.into(),
            team: team.into(),
            availability: None,
            stats: PlayerStats::zeroed(),
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }
}
