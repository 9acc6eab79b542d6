//! Bracket engine: seeding, result recording, and one-round winner
//! propagation.

use crate::logic::standings::RankedRow;
use crate::models::{Bracket, BracketMatch, LeagueError, Slot};

/// Build a bracket from the standings: the top `q` rows qualify, and
/// round 0 pairs qualifier `i` against qualifier `q-1-i` (best vs worst).
/// Every later round starts fully placeholdered.
///
/// Precondition: `q` is a power of two and `ranking.len() >= q` (the
/// qualification cutoff guarantees 2, 4, or 8).
pub fn generate_bracket(ranking: &[RankedRow], q: usize) -> Bracket {
    debug_assert!(q.is_power_of_two() && q >= 2);
    debug_assert!(ranking.len() >= q);

    let qualifiers: Vec<&str> = ranking[..q].iter().map(|r| r.username.as_str()).collect();

    let first_round: Vec<BracketMatch> = (0..q / 2)
        .map(|i| {
            BracketMatch::seeded(
                Slot::Named(qualifiers[i].to_string()),
                Slot::Named(qualifiers[q - 1 - i].to_string()),
            )
        })
        .collect();

    let total_rounds = q.ilog2() as usize;
    let mut rounds = Vec::with_capacity(total_rounds);
    rounds.push(first_round);
    for r in 1..total_rounds {
        let matches_in_round = q >> (r + 1);
        rounds.push((0..matches_in_round).map(|_| BracketMatch::pending()).collect());
    }

    Bracket { rounds }
}

/// Record a raw score for the match at (`round`, `index`) and propagate.
///
/// The raw text is stored as entered. Only `"<int>-<int>"` with two
/// different numbers is decisive; ties and malformed text clear the winner
/// and never propagate (a tie blocks advancement in single elimination).
/// A decisive result in a non-final round writes the winner into slot 1
/// or 2 (by the parity of `index`) of match `index / 2` in the next round
/// and never cascades further; re-entering a result overwrites and
/// re-propagates.
pub fn record_result(
    bracket: &mut Bracket,
    round: usize,
    index: usize,
    raw_score: &str,
) -> Result<(), LeagueError> {
    let total_rounds = bracket.total_rounds();
    let m = bracket
        .rounds
        .get_mut(round)
        .and_then(|r| r.get_mut(index))
        .ok_or(LeagueError::NoSuchMatch)?;
    if !m.is_editable() {
        return Err(LeagueError::MatchNotReady);
    }

    let raw = raw_score.trim();
    m.score = if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    };

    m.winner = match parse_score(raw) {
        Some((a, b)) if a > b => m.slot1.name().map(str::to_string),
        Some((a, b)) if b > a => m.slot2.name().map(str::to_string),
        _ => None,
    };

    let winner = m.winner.clone();
    if let Some(winner) = winner {
        if round + 1 < total_rounds {
            let next = &mut bracket.rounds[round + 1][index / 2];
            if index % 2 == 0 {
                next.slot1 = Slot::Named(winner);
            } else {
                next.slot2 = Slot::Named(winner);
            }
        }
    }

    Ok(())
}

/// Parse `"<int>-<int>"`. Splitting on `-` must yield exactly two parts,
/// each a non-negative integer; anything else (missing dash, extra
/// dashes, non-numeric parts) is a no-decision.
fn parse_score(raw: &str) -> Option<(u32, u32)> {
    let mut parts = raw.split('-');
    let a = parts.next()?.trim().parse().ok()?;
    let b = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((a, b))
}
