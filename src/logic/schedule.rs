//! Regular-season schedule generation: single round-robin via the circle
//! method, with BYE handling and availability-compatibility tagging.

use crate::models::{Fixture, LeagueError, Player};

/// Minimum players for a schedule.
const MIN_PLAYERS: usize = 2;

/// Generate the full single round-robin schedule for the given players.
///
/// The circle method: seat 0 stays fixed, the rest rotate one seat per
/// round, and each round pairs seat `i` against seat `n-1-i`. With an odd
/// player count a BYE seat is appended; pairings against it produce no
/// fixture, so that player simply has no match that round.
///
/// Rounds are numbered from 1 and the output is deterministic for a given
/// input order. Regeneration replaces the previous schedule wholesale
/// (the caller deletes all fixtures and bulk-inserts these).
pub fn generate_schedule(players: &[Player]) -> Result<Vec<Fixture>, LeagueError> {
    if players.len() < MIN_PLAYERS {
        return Err(LeagueError::NotEnoughPlayers {
            required: MIN_PLAYERS,
        });
    }

    // None is the BYE seat.
    let mut seats: Vec<Option<&Player>> = players.iter().map(Some).collect();
    if seats.len() % 2 != 0 {
        seats.push(None);
    }

    let n = seats.len();
    let total_rounds = n - 1;
    let mut fixtures = Vec::new();

    for round in 1..=total_rounds as u32 {
        for i in 0..n / 2 {
            if let (Some(home), Some(away)) = (seats[i], seats[n - 1 - i]) {
                let priority = availability_compatible(home, away);
                fixtures.push(Fixture::new(&home.username, &away.username, round, priority));
            }
        }
        // Rotate everyone but seat 0: last seat moves to position 1.
        if let Some(last) = seats.pop() {
            seats.insert(1, last);
        }
    }

    Ok(fixtures)
}

/// Priority flag: both players reported availability, share a day tag, and
/// their time windows overlap.
fn availability_compatible(a: &Player, b: &Player) -> bool {
    match (&a.availability, &b.availability) {
        (Some(av_a), Some(av_b)) => av_a.compatible_with(av_b),
        _ => false,
    }
}
