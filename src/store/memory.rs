//! In-memory store: the reference [`Store`] implementation used by the
//! web binary and the tests.

use super::{ChangeKind, Store, StoreError, StoreEvent, Table};
use crate::models::{Bracket, Fixture, FixtureId, Player, PlayerStats, SeasonState};
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;

#[derive(Default)]
struct Tables {
    players: Vec<Player>,
    fixtures: Vec<Fixture>,
    bracket: Option<Bracket>,
    season: Option<SeasonState>,
}

/// All data behind a single RwLock, so every store call sees and leaves a
/// consistent snapshot. One broadcast channel per table carries the
/// payload-free change events.
pub struct MemoryStore {
    inner: RwLock<Tables>,
    channels: HashMap<Table, broadcast::Sender<StoreEvent>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut channels = HashMap::new();
        for table in [
            Table::Players,
            Table::Matches,
            Table::Bracket,
            Table::SeasonState,
        ] {
            let (tx, _) = broadcast::channel(64);
            channels.insert(table, tx);
        }
        Self {
            inner: RwLock::new(Tables::default()),
            channels,
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))
    }

    fn notify(&self, table: Table, kind: ChangeKind) {
        // No receivers is fine; the event is simply dropped.
        let _ = self.channels[&table].send(StoreEvent { table, kind });
    }
}

impl Store for MemoryStore {
    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let g = self.read()?;
        let mut players = g.players.clone();
        players.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(players)
    }

    fn find_player(&self, username: &str) -> Result<Option<Player>, StoreError> {
        let g = self.read()?;
        Ok(g.players.iter().find(|p| p.username == username).cloned())
    }

    fn insert_player(&self, player: Player) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            let duplicate = g
                .players
                .iter()
                .any(|p| p.username.eq_ignore_ascii_case(&player.username));
            if duplicate {
                return Err(StoreError::Constraint(format!(
                    "username '{}' already taken",
                    player.username
                )));
            }
            g.players.push(player);
        }
        self.notify(Table::Players, ChangeKind::Insert);
        Ok(())
    }

    fn update_player(&self, username: &str, player: Player) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            let row = g
                .players
                .iter_mut()
                .find(|p| p.username == username)
                .ok_or(StoreError::NotFound)?;
            *row = player;
        }
        self.notify(Table::Players, ChangeKind::Update);
        Ok(())
    }

    fn delete_player(&self, username: &str) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            let before = g.players.len();
            g.players.retain(|p| p.username != username);
            if g.players.len() == before {
                return Err(StoreError::NotFound);
            }
        }
        self.notify(Table::Players, ChangeKind::Delete);
        Ok(())
    }

    fn put_player_stats(&self, stats: &[(String, PlayerStats)]) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            for (username, new_stats) in stats {
                if let Some(p) = g.players.iter_mut().find(|p| &p.username == username) {
                    p.stats = *new_stats;
                }
            }
        }
        self.notify(Table::Players, ChangeKind::Update);
        Ok(())
    }

    fn list_fixtures(&self) -> Result<Vec<Fixture>, StoreError> {
        let g = self.read()?;
        let mut fixtures = g.fixtures.clone();
        fixtures.sort_by(|a, b| a.round.cmp(&b.round).then(b.priority.cmp(&a.priority)));
        Ok(fixtures)
    }

    fn find_fixture(&self, id: FixtureId) -> Result<Option<Fixture>, StoreError> {
        let g = self.read()?;
        Ok(g.fixtures.iter().find(|f| f.id == id).cloned())
    }

    fn replace_fixtures(&self, fixtures: Vec<Fixture>) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            g.fixtures = fixtures;
        }
        self.notify(Table::Matches, ChangeKind::Insert);
        Ok(())
    }

    fn update_fixture(&self, fixture: Fixture) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            let row = g
                .fixtures
                .iter_mut()
                .find(|f| f.id == fixture.id)
                .ok_or(StoreError::NotFound)?;
            *row = fixture;
        }
        self.notify(Table::Matches, ChangeKind::Update);
        Ok(())
    }

    fn clear_fixture_results(&self) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            for f in &mut g.fixtures {
                f.clear_result();
            }
        }
        self.notify(Table::Matches, ChangeKind::Update);
        Ok(())
    }

    fn delete_fixtures(&self) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            g.fixtures.clear();
        }
        self.notify(Table::Matches, ChangeKind::Delete);
        Ok(())
    }

    fn load_bracket(&self) -> Result<Option<Bracket>, StoreError> {
        let g = self.read()?;
        Ok(g.bracket.clone())
    }

    fn save_bracket(&self, bracket: &Bracket) -> Result<(), StoreError> {
        let kind = {
            let mut g = self.write()?;
            let kind = if g.bracket.is_some() {
                ChangeKind::Update
            } else {
                ChangeKind::Insert
            };
            g.bracket = Some(bracket.clone());
            kind
        };
        self.notify(Table::Bracket, kind);
        Ok(())
    }

    fn delete_bracket(&self) -> Result<(), StoreError> {
        {
            let mut g = self.write()?;
            g.bracket = None;
        }
        self.notify(Table::Bracket, ChangeKind::Delete);
        Ok(())
    }

    fn season_state(&self) -> Result<SeasonState, StoreError> {
        // Get-or-create under one write lock: no read-then-insert race.
        let created;
        let state = {
            let mut g = self.write()?;
            match g.season {
                Some(state) => {
                    created = false;
                    state
                }
                None => {
                    let state = SeasonState::open();
                    g.season = Some(state);
                    created = true;
                    state
                }
            }
        };
        if created {
            self.notify(Table::SeasonState, ChangeKind::Insert);
        }
        Ok(state)
    }

    fn set_season_concluded(&self, concluded: bool) -> Result<(), StoreError> {
        let kind = {
            let mut g = self.write()?;
            let kind = if g.season.is_some() {
                ChangeKind::Update
            } else {
                ChangeKind::Insert
            };
            g.season = Some(SeasonState { concluded });
            kind
        };
        self.notify(Table::SeasonState, kind);
        Ok(())
    }

    fn subscribe(&self, table: Table) -> broadcast::Receiver<StoreEvent> {
        self.channels[&table].subscribe()
    }
}
