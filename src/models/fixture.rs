//! Regular-season fixture (one scheduled match between two players).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type FixtureId = Uuid;

/// Whether a fixture has a recorded result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Pending,
    Finished,
}

/// One regular-season match. Created in bulk by the schedule generator,
/// mutated only by result entry, deleted in bulk on reset.
///
/// BYE pairings never produce a fixture; the byed player simply has no
/// fixture in that round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: FixtureStatus,
    /// 1-based round ("jornada") number.
    pub round: u32,
    /// True when the two players' self-reported availability overlaps.
    pub priority: bool,
}

impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>, round: u32, priority: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            home: home.into(),
            away: away.into(),
            home_score: None,
            away_score: None,
            status: FixtureStatus::Pending,
            round,
            priority,
        }
    }

    /// Record a result and mark the fixture finished. Overwrites any
    /// previous result (corrections are allowed; standings are fully
    /// recomputed afterwards anyway).
    pub fn record_result(&mut self, home_score: u32, away_score: u32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = FixtureStatus::Finished;
    }

    /// Clear the result back to pending (used by "clear all results").
    pub fn clear_result(&mut self) {
        self.home_score = None;
        self.away_score = None;
        self.status = FixtureStatus::Pending;
    }
}
