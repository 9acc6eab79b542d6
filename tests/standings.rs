//! Integration tests for standings: ranking order, qualification cutoff,
//! and full stats recomputation.

use football_league_web::{
    compute_ranking, qualifier_count, recompute_stats, Fixture, LeagueError, Player, PlayerStats,
};

fn player_with_stats(name: &str, stats: PlayerStats) -> Player {
    let mut p = Player::new(name, "pc", format!("Team {name}"));
    p.stats = stats;
    p
}

fn stats(wins: u32, draws: u32, losses: u32, gf: u32, ga: u32) -> PlayerStats {
    PlayerStats {
        wins,
        draws,
        losses,
        goals_for: gf,
        goals_against: ga,
        games_played: wins + draws + losses,
    }
}

#[test]
fn ranking_orders_by_points_then_goal_diff() {
    // A and B both on 9 points, A with the better goal difference; C on 6.
    let players = vec![
        player_with_stats("C", stats(2, 0, 2, 5, 5)),
        player_with_stats("B", stats(3, 0, 1, 8, 6)),
        player_with_stats("A", stats(3, 0, 1, 9, 4)),
    ];
    let ranking = compute_ranking(&players);
    let order: Vec<&str> = ranking.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(order, ["A", "B", "C"]);
    assert_eq!(ranking[0].points, 9);
    assert_eq!(ranking[0].goal_diff, 5);
    assert_eq!(ranking[2].points, 6);
}

#[test]
fn ranking_falls_back_to_goals_for_then_username() {
    // Same points and goal diff; "Y" has more goals for than "X".
    let mut players = vec![
        player_with_stats("X", stats(1, 0, 1, 2, 2)),
        player_with_stats("Y", stats(1, 0, 1, 5, 5)),
        // Identical on every stat key: username decides, ascending.
        player_with_stats("bbb", stats(0, 1, 0, 1, 1)),
        player_with_stats("aaa", stats(0, 1, 0, 1, 1)),
    ];
    players.reverse();
    let ranking = compute_ranking(&players);
    let order: Vec<&str> = ranking.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(order, ["Y", "X", "aaa", "bbb"]);
}

#[test]
fn ranking_is_a_total_order() {
    // Every player identical: positions are still fully determined.
    let players: Vec<Player> = (0..10)
        .map(|i| player_with_stats(&format!("p{i}"), stats(1, 1, 1, 3, 3)))
        .collect();
    let first = compute_ranking(&players);
    let mut shuffled = players;
    shuffled.rotate_left(3);
    let second = compute_ranking(&shuffled);
    assert_eq!(first, second);
    for pair in first.windows(2) {
        assert!(pair[0].username < pair[1].username);
    }
}

#[test]
fn qualification_cutoff_ladder() {
    assert_eq!(qualifier_count(0), Err(LeagueError::NotEnoughQualifiers));
    assert_eq!(qualifier_count(1), Err(LeagueError::NotEnoughQualifiers));
    assert_eq!(qualifier_count(2), Ok(2));
    assert_eq!(qualifier_count(3), Ok(2));
    assert_eq!(qualifier_count(4), Ok(4));
    assert_eq!(qualifier_count(7), Ok(4));
    assert_eq!(qualifier_count(8), Ok(8));
    assert_eq!(qualifier_count(30), Ok(8));
}

#[test]
fn recompute_builds_stats_from_finished_fixtures() {
    let players = vec![
        Player::new("ana", "ps5", "Team 1"),
        Player::new("bruno", "pc", "Team 2"),
        Player::new("carla", "xbox", "Team 3"),
    ];
    let mut f1 = Fixture::new("ana", "bruno", 1, false);
    f1.record_result(3, 1);
    let mut f2 = Fixture::new("carla", "ana", 2, false);
    f2.record_result(2, 2);
    // Pending fixture: contributes nothing.
    let f3 = Fixture::new("bruno", "carla", 3, false);

    let stats = recompute_stats(&players, &[f1, f2, f3]);

    let ana = &stats["ana"];
    assert_eq!((ana.wins, ana.draws, ana.losses), (1, 1, 0));
    assert_eq!((ana.goals_for, ana.goals_against), (5, 3));
    assert_eq!(ana.games_played, 2);

    let bruno = &stats["bruno"];
    assert_eq!((bruno.wins, bruno.draws, bruno.losses), (0, 0, 1));
    assert_eq!(bruno.games_played, 1);

    let carla = &stats["carla"];
    assert_eq!((carla.wins, carla.draws, carla.losses), (0, 1, 0));
    assert_eq!(carla.games_played, 1);
}

#[test]
fn recompute_is_idempotent_and_overwrites() {
    // Stale nonzero stats on the players must not leak into the result.
    let players = vec![
        player_with_stats("ana", stats(9, 9, 9, 99, 99)),
        player_with_stats("bruno", stats(5, 5, 5, 50, 50)),
    ];
    let mut f = Fixture::new("ana", "bruno", 1, false);
    f.record_result(1, 0);
    let fixtures = vec![f];

    let first = recompute_stats(&players, &fixtures);
    let second = recompute_stats(&players, &fixtures);
    assert_eq!(first, second);
    assert_eq!(first["ana"].wins, 1);
    assert_eq!(first["ana"].games_played, 1);
    assert_eq!(first["bruno"].losses, 1);
}

#[test]
fn recompute_skips_fixtures_of_unknown_players() {
    let players = vec![Player::new("ana", "pc", "Team 1")];
    let mut f = Fixture::new("ghost", "ana", 1, false);
    f.record_result(0, 4);

    let stats = recompute_stats(&players, &[f]);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats["ana"].wins, 1);
    assert_eq!(stats["ana"].goals_for, 4);
}
