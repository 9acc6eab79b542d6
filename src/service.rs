//! League operations: the layer between the HTTP surface and the engine.
//!
//! Every operation fetches a fresh snapshot from the store, runs the pure
//! logic on it, and writes the outcome back. Nothing is cached between
//! calls. Mutating operations take an explicit [`Actor`] and refuse
//! guests; there is no ambient admin flag.

use crate::logic;
use crate::logic::RankedRow;
use crate::models::{
    Actor, Bracket, Fixture, FixtureId, LeagueError, Player, SeasonState,
};
use crate::store::Store;

fn require_admin(actor: Actor) -> Result<(), LeagueError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(LeagueError::Unauthorized)
    }
}

fn require_open<S: Store>(store: &S) -> Result<(), LeagueError> {
    if store.season_state()?.concluded {
        Err(LeagueError::SeasonConcluded)
    } else {
        Ok(())
    }
}

fn require_concluded<S: Store>(store: &S) -> Result<(), LeagueError> {
    if store.season_state()?.concluded {
        Ok(())
    } else {
        Err(LeagueError::SeasonStillOpen)
    }
}

// -- players --

/// Public signup: anyone may register (uniqueness enforced by the store).
pub fn signup<S: Store>(store: &S, player: Player) -> Result<(), LeagueError> {
    let username = player.username.trim().to_string();
    if username.is_empty() {
        return Err(LeagueError::InvalidUsername);
    }
    store.insert_player(Player { username, ..player })?;
    Ok(())
}

pub fn list_players<S: Store>(store: &S) -> Result<Vec<Player>, LeagueError> {
    Ok(store.list_players()?)
}

/// Admin edit of a signup (name, team, platform, availability, stats).
pub fn update_player<S: Store>(
    store: &S,
    actor: Actor,
    username: &str,
    player: Player,
) -> Result<(), LeagueError> {
    require_admin(actor)?;
    match store.update_player(username, player) {
        Ok(()) => Ok(()),
        Err(crate::store::StoreError::NotFound) => {
            Err(LeagueError::PlayerNotFound(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn remove_player<S: Store>(
    store: &S,
    actor: Actor,
    username: &str,
) -> Result<(), LeagueError> {
    require_admin(actor)?;
    match store.delete_player(username) {
        Ok(()) => Ok(()),
        Err(crate::store::StoreError::NotFound) => {
            Err(LeagueError::PlayerNotFound(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

// -- standings --

/// Current standings, computed from a fresh player snapshot.
pub fn current_standings<S: Store>(store: &S) -> Result<Vec<RankedRow>, LeagueError> {
    let players = store.list_players()?;
    Ok(logic::compute_ranking(&players))
}

// -- regular season --

/// Generate (or regenerate) the round-robin schedule. Replaces any
/// previous schedule wholesale. Refused once the season is concluded.
/// Returns the number of fixtures created.
pub fn generate_season_schedule<S: Store>(store: &S, actor: Actor) -> Result<usize, LeagueError> {
    require_admin(actor)?;
    require_open(store)?;
    let players = store.list_players()?;
    let fixtures = logic::generate_schedule(&players)?;
    let count = fixtures.len();
    store.replace_fixtures(fixtures)?;
    log::info!("Generated {} fixtures for {} players", count, players.len());
    Ok(count)
}

pub fn list_fixtures<S: Store>(store: &S) -> Result<Vec<Fixture>, LeagueError> {
    Ok(store.list_fixtures()?)
}

/// Enter a fixture result and rebuild every player's stats from the full
/// finished-fixture set. The recompute overwrites rather than adds, so
/// corrections and resubmissions are safe.
pub fn submit_fixture_result<S: Store>(
    store: &S,
    actor: Actor,
    id: FixtureId,
    home_score: u32,
    away_score: u32,
) -> Result<(), LeagueError> {
    require_admin(actor)?;
    require_open(store)?;
    let mut fixture = store.find_fixture(id)?.ok_or(LeagueError::NoSuchMatch)?;
    fixture.record_result(home_score, away_score);
    store.update_fixture(fixture)?;
    recompute_and_store_stats(store)
}

/// Clear every regular-season result and zero all stats, keeping the
/// schedule itself.
pub fn clear_regular_results<S: Store>(store: &S, actor: Actor) -> Result<(), LeagueError> {
    require_admin(actor)?;
    store.clear_fixture_results()?;
    zero_all_stats(store)?;
    log::info!("Cleared all regular-season results and stats");
    Ok(())
}

fn recompute_and_store_stats<S: Store>(store: &S) -> Result<(), LeagueError> {
    let players = store.list_players()?;
    let fixtures = store.list_fixtures()?;
    let stats: Vec<_> = logic::recompute_stats(&players, &fixtures)
        .into_iter()
        .collect();
    store.put_player_stats(&stats)?;
    Ok(())
}

fn zero_all_stats<S: Store>(store: &S) -> Result<(), LeagueError> {
    let stats: Vec<_> = store
        .list_players()?
        .into_iter()
        .map(|p| (p.username, crate::models::PlayerStats::zeroed()))
        .collect();
    store.put_player_stats(&stats)?;
    Ok(())
}

// -- season state --

pub fn season_state<S: Store>(store: &S) -> Result<SeasonState, LeagueError> {
    Ok(store.season_state()?)
}

/// Close the regular season: result entry locks, playoffs unlock.
/// There is no reverse transition short of a full reset.
pub fn close_season<S: Store>(store: &S, actor: Actor) -> Result<(), LeagueError> {
    require_admin(actor)?;
    store.set_season_concluded(true)?;
    log::info!("Regular season concluded; playoffs unlocked");
    Ok(())
}

/// Full season reset, from either state: delete all fixtures and the
/// bracket, zero every player's stats, season back to open.
///
/// The writes run in sequence; the first failure aborts with the store
/// error so the operator sees a partial reset instead of silence. Every
/// step is idempotent, so retrying the reset completes it.
pub fn reset_season<S: Store>(store: &S, actor: Actor) -> Result<(), LeagueError> {
    require_admin(actor)?;
    store.delete_fixtures()?;
    store.delete_bracket()?;
    zero_all_stats(store)?;
    store.set_season_concluded(false)?;
    log::info!("Season reset: fixtures, bracket, and stats wiped");
    Ok(())
}

// -- playoffs --

pub fn load_bracket<S: Store>(store: &S) -> Result<Option<Bracket>, LeagueError> {
    Ok(store.load_bracket()?)
}

/// Generate the playoff bracket from the current standings. Only valid
/// once the regular season is concluded; replaces any existing bracket.
pub fn generate_playoff_bracket<S: Store>(store: &S, actor: Actor) -> Result<Bracket, LeagueError> {
    require_admin(actor)?;
    require_concluded(store)?;
    let ranking = current_standings(store)?;
    let q = logic::qualifier_count(ranking.len())?;
    let bracket = logic::generate_bracket(&ranking, q);
    store.save_bracket(&bracket)?;
    log::info!("Generated playoff bracket with {} qualifiers", q);
    Ok(bracket)
}

/// Delete the bracket (admin "reset brackets" action). The season state
/// and regular-season data stay as they are.
pub fn reset_playoff_bracket<S: Store>(store: &S, actor: Actor) -> Result<(), LeagueError> {
    require_admin(actor)?;
    store.delete_bracket()?;
    Ok(())
}

/// Record a playoff result on a fresh bracket snapshot and persist it.
/// Returns the updated bracket.
pub fn record_playoff_result<S: Store>(
    store: &S,
    actor: Actor,
    round: usize,
    index: usize,
    raw_score: &str,
) -> Result<Bracket, LeagueError> {
    require_admin(actor)?;
    require_concluded(store)?;
    let mut bracket = store.load_bracket()?.ok_or(LeagueError::NoSuchMatch)?;
    logic::record_result(&mut bracket, round, index, raw_score)?;
    store.save_bracket(&bracket)?;
    Ok(bracket)
}

/// The playoff champion, if the final has a decisive result.
pub fn playoff_champion<S: Store>(store: &S) -> Result<Option<String>, LeagueError> {
    let bracket = store.load_bracket()?;
    Ok(bracket.and_then(|b| b.champion().map(str::to_string)))
}
