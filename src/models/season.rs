//! Season state (the regular-season gate) and the actor capability.

use serde::{Deserialize, Serialize};

/// Singleton row: is the regular season over?
///
/// While open, playoff bracket generation is refused; once concluded,
/// regular-season result entry and schedule generation are refused.
/// The only way back to open is a full season reset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeasonState {
    pub concluded: bool,
}

impl SeasonState {
    pub fn open() -> Self {
        Self { concluded: false }
    }
}

/// Who is invoking a mutating operation. Passed explicitly into every
/// mutating service call; there is no ambient "is admin" flag.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    #[default]
    Guest,
    Admin,
}

impl Actor {
    pub fn is_admin(self) -> bool {
        self == Actor::Admin
    }
}
