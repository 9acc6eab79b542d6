//! Single-elimination playoff bracket: slots, matches, and the round tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant slot in a bracket match.
///
/// `Unresolved` is a feeder slot still waiting for an earlier match to
/// decide; `Bye` is an automatic pass. Downstream logic pattern-matches
/// on this instead of comparing magic placeholder strings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Slot {
    Unresolved,
    Bye,
    Named(String),
}

impl Slot {
    /// The player name, if this slot is resolved to a real player.
    pub fn name(&self) -> Option<&str> {
        match self {
            Slot::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self, Slot::Named(_))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Unresolved => write!(f, "TBD"),
            Slot::Bye => write!(f, "BYE"),
            Slot::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One bracket match. `score` keeps the raw text as entered (including
/// text that did not parse to a decision); `winner` is only set when the
/// score parsed as decisive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub slot1: Slot,
    pub slot2: Slot,
    pub score: Option<String>,
    pub winner: Option<String>,
}

impl BracketMatch {
    /// A round-0 match between two seeded players.
    pub fn seeded(slot1: Slot, slot2: Slot) -> Self {
        Self {
            slot1,
            slot2,
            score: None,
            winner: None,
        }
    }

    /// A later-round match with both feeder slots still unresolved.
    pub fn pending() -> Self {
        Self::seeded(Slot::Unresolved, Slot::Unresolved)
    }

    /// A match is editable exactly when both slots are resolved to real
    /// player names.
    pub fn is_editable(&self) -> bool {
        self.slot1.is_named() && self.slot2.is_named()
    }
}

/// The full bracket: rounds in playing order, round 0 first. Round `r`
/// has exactly half the matches of round `r-1`; the last round has one.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Vec<BracketMatch>>,
}

impl Bracket {
    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Presentational name for a round, derived from its distance to the
    /// final. Recomputed on demand, never stored. Indexes past the last
    /// round fall through to the generic name.
    pub fn round_name(&self, index: usize) -> String {
        match self.total_rounds().saturating_sub(index) {
            1 => "Final".to_string(),
            2 => "Semifinals".to_string(),
            3 => "Quarterfinals".to_string(),
            4 => "Round of 16".to_string(),
            _ => format!("Round {}", index + 1),
        }
    }

    /// Names for every round, in playing order (for display).
    pub fn round_names(&self) -> Vec<String> {
        (0..self.total_rounds()).map(|i| self.round_name(i)).collect()
    }

    /// The champion, once the final has a decisive parsed score.
    ///
    /// This is a pure query; announcing the champion at most once is a UI
    /// concern and deliberately not tracked here.
    pub fn champion(&self) -> Option<&str> {
        let final_match = self.rounds.last()?.first()?;
        let winner = final_match.winner.as_deref()?;
        // A winner without a stored dash score would be inconsistent data
        // from the store; refuse to call it a champion.
        let score = final_match.score.as_deref()?;
        if score.contains('-') {
            Some(winner)
        } else {
            None
        }
    }
}
