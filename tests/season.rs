//! Integration tests for the service layer on the in-memory store:
//! capability gating, the season gate, reset, and change notifications.

use football_league_web::{
    service, Actor, ChangeKind, FixtureStatus, LeagueError, MemoryStore, Player, Store, Table,
};

fn store_with_players(n: usize) -> MemoryStore {
    let store = MemoryStore::new();
    for i in 0..n {
        service::signup(
            &store,
            Player::new(format!("P{i}"), "pc", format!("Team {i}")),
        )
        .unwrap();
    }
    store
}

fn finish_all_fixtures(store: &MemoryStore) {
    // Home always wins 2-0; enough to produce a fully ranked table.
    for f in service::list_fixtures(store).unwrap() {
        service::submit_fixture_result(store, Actor::Admin, f.id, 2, 0).unwrap();
    }
}

#[test]
fn signup_enforces_unique_usernames() {
    let store = MemoryStore::new();
    service::signup(&store, Player::new("ana", "pc", "Team A")).unwrap();
    assert_eq!(
        service::signup(&store, Player::new("ANA", "ps5", "Team B")),
        Err(LeagueError::DuplicateUsername)
    );
    assert_eq!(
        service::signup(&store, Player::new("   ", "pc", "Team C")),
        Err(LeagueError::InvalidUsername)
    );
}

#[test]
fn guests_cannot_mutate() {
    let store = store_with_players(4);
    assert_eq!(
        service::generate_season_schedule(&store, Actor::Guest),
        Err(LeagueError::Unauthorized)
    );
    assert_eq!(
        service::close_season(&store, Actor::Guest),
        Err(LeagueError::Unauthorized)
    );
    assert_eq!(
        service::reset_season(&store, Actor::Guest),
        Err(LeagueError::Unauthorized)
    );
    assert_eq!(
        service::generate_playoff_bracket(&store, Actor::Guest),
        Err(LeagueError::Unauthorized)
    );
    assert_eq!(
        service::remove_player(&store, Actor::Guest, "P0"),
        Err(LeagueError::Unauthorized)
    );
}

#[test]
fn season_state_is_implicitly_created_open() {
    let store = MemoryStore::new();
    let state = service::season_state(&store).unwrap();
    assert!(!state.concluded);
    // Second read sees the same singleton.
    assert_eq!(service::season_state(&store).unwrap(), state);
}

#[test]
fn schedule_generation_replaces_previous_schedule() {
    let store = store_with_players(5);
    let count = service::generate_season_schedule(&store, Actor::Admin).unwrap();
    assert_eq!(count, 10); // 5 players, BYE appended, 5 rounds of 2

    let first_ids: Vec<_> = service::list_fixtures(&store)
        .unwrap()
        .iter()
        .map(|f| f.id)
        .collect();
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    let fixtures = service::list_fixtures(&store).unwrap();
    assert_eq!(fixtures.len(), 10);
    assert!(fixtures.iter().all(|f| !first_ids.contains(&f.id)));
}

#[test]
fn submitting_a_result_recomputes_standings() {
    let store = store_with_players(4);
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    let fixture = &service::list_fixtures(&store).unwrap()[0];

    service::submit_fixture_result(&store, Actor::Admin, fixture.id, 3, 1).unwrap();

    let stored = store.find_fixture(fixture.id).unwrap().unwrap();
    assert_eq!(stored.status, FixtureStatus::Finished);
    assert_eq!((stored.home_score, stored.away_score), (Some(3), Some(1)));

    let ranking = service::current_standings(&store).unwrap();
    assert_eq!(ranking[0].username, fixture.home);
    assert_eq!(ranking[0].points, 3);
    assert_eq!(ranking[0].goal_diff, 2);

    // Correcting the same fixture overwrites, never accumulates.
    service::submit_fixture_result(&store, Actor::Admin, fixture.id, 3, 1).unwrap();
    let ranking = service::current_standings(&store).unwrap();
    assert_eq!(ranking[0].points, 3);
    assert_eq!(ranking[0].goal_diff, 2);
}

#[test]
fn concluded_season_locks_regular_actions_and_unlocks_playoffs() {
    let store = store_with_players(4);
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    finish_all_fixtures(&store);

    // Playoffs are gated until the season closes.
    assert_eq!(
        service::generate_playoff_bracket(&store, Actor::Admin),
        Err(LeagueError::SeasonStillOpen)
    );

    service::close_season(&store, Actor::Admin).unwrap();
    assert!(service::season_state(&store).unwrap().concluded);

    // Regular-season writes are now refused.
    let fixture = &service::list_fixtures(&store).unwrap()[0];
    assert_eq!(
        service::submit_fixture_result(&store, Actor::Admin, fixture.id, 1, 0),
        Err(LeagueError::SeasonConcluded)
    );
    assert_eq!(
        service::generate_season_schedule(&store, Actor::Admin),
        Err(LeagueError::SeasonConcluded)
    );

    // Four ranked players: a 4-slot, 2-round bracket.
    let bracket = service::generate_playoff_bracket(&store, Actor::Admin).unwrap();
    assert_eq!(bracket.total_rounds(), 2);
    assert_eq!(bracket.rounds[0].len(), 2);
    assert_eq!(service::load_bracket(&store).unwrap(), Some(bracket));
}

#[test]
fn bracket_needs_at_least_two_players() {
    let store = store_with_players(1);
    service::close_season(&store, Actor::Admin).unwrap();
    assert_eq!(
        service::generate_playoff_bracket(&store, Actor::Admin),
        Err(LeagueError::NotEnoughQualifiers)
    );
}

#[test]
fn playoff_results_persist_and_expose_a_champion() {
    let store = store_with_players(4);
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    finish_all_fixtures(&store);
    service::close_season(&store, Actor::Admin).unwrap();
    service::generate_playoff_bracket(&store, Actor::Admin).unwrap();

    service::record_playoff_result(&store, Actor::Admin, 0, 0, "2-1").unwrap();
    service::record_playoff_result(&store, Actor::Admin, 0, 1, "0-1").unwrap();
    assert_eq!(service::playoff_champion(&store).unwrap(), None);

    let final_round = service::load_bracket(&store).unwrap().unwrap();
    assert!(final_round.rounds[1][0].is_editable());

    service::record_playoff_result(&store, Actor::Admin, 1, 0, "3-0").unwrap();
    let champion = service::playoff_champion(&store).unwrap();
    let bracket = service::load_bracket(&store).unwrap().unwrap();
    assert_eq!(champion.as_deref(), bracket.rounds[1][0].winner.as_deref());
    assert!(champion.is_some());
}

#[test]
fn reset_wipes_everything_back_to_open() {
    let store = store_with_players(4);
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    finish_all_fixtures(&store);
    service::close_season(&store, Actor::Admin).unwrap();
    service::generate_playoff_bracket(&store, Actor::Admin).unwrap();

    service::reset_season(&store, Actor::Admin).unwrap();

    assert!(!service::season_state(&store).unwrap().concluded);
    assert!(service::list_fixtures(&store).unwrap().is_empty());
    assert_eq!(service::load_bracket(&store).unwrap(), None);
    for p in service::list_players(&store).unwrap() {
        assert_eq!(p.stats, football_league_web::PlayerStats::zeroed());
    }
}

#[test]
fn clear_results_keeps_the_schedule() {
    let store = store_with_players(4);
    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    finish_all_fixtures(&store);

    service::clear_regular_results(&store, Actor::Admin).unwrap();

    let fixtures = service::list_fixtures(&store).unwrap();
    assert_eq!(fixtures.len(), 6);
    assert!(fixtures.iter().all(|f| f.status == FixtureStatus::Pending));
    for p in service::list_players(&store).unwrap() {
        assert_eq!(p.stats.games_played, 0);
    }
}

#[test]
fn mutations_notify_subscribers_per_table() {
    let store = MemoryStore::new();
    let mut players_rx = store.subscribe(Table::Players);
    let mut matches_rx = store.subscribe(Table::Matches);

    service::signup(&store, Player::new("ana", "pc", "Team A")).unwrap();
    service::signup(&store, Player::new("bruno", "pc", "Team B")).unwrap();

    let event = players_rx.try_recv().unwrap();
    assert_eq!(event.table, Table::Players);
    assert_eq!(event.kind, ChangeKind::Insert);
    // No match activity yet.
    assert!(matches_rx.try_recv().is_err());

    service::generate_season_schedule(&store, Actor::Admin).unwrap();
    let event = matches_rx.try_recv().unwrap();
    assert_eq!(event.table, Table::Matches);
    assert_eq!(event.kind, ChangeKind::Insert);
}
