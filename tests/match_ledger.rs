//! Integration tests for the match lifecycle: complete, edit, cancel, delete, and rating updates.

use padel_tournament_web::{
    cancel_edit, complete_match, delete_match, delete_round, generate_next_round_with_rng,
    reverse_match, save_edit, start_tournament_with_rng, update_match_elo, update_score,
    MatchStatus, Player, RatedPlayer, ServerPosition, Side, Tournament, TournamentError,
    TournamentSettings,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn started(n: usize, seed: u64) -> Tournament {
    let players: Vec<Player> = (0..n).map(|i| Player::new(format!("P{i}"))).collect();
    let t = Tournament::with_players(players, TournamentSettings::default());
    start_tournament_with_rng(&t, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn first_match_id(t: &Tournament) -> String {
    t.rounds[0].matches[0].id.clone()
}

fn score(t: &Tournament, match_id: &str, s1: i32, s2: i32) -> Tournament {
    let t = update_score(t, 0, match_id, Side::One, s1).unwrap();
    update_score(&t, 0, match_id, Side::Two, s2).unwrap()
}

/// Points, matches, wins and losses per player, in roster order.
fn stats(t: &Tournament) -> Vec<(u32, u32, u32, u32)> {
    t.players
        .iter()
        .map(|p| (p.points, p.matches_played, p.wins, p.losses))
        .collect()
}

fn player(t: &Tournament, id: uuid::Uuid) -> &Player {
    t.get_player(id).unwrap()
}

#[test]
fn five_players_one_match_seven_three() {
    let t = started(5, 42);
    let round = &t.rounds[0];
    assert_eq!(round.matches.len(), 1);
    assert!(!round.completed);
    let resting = round.sitting_out.as_ref().unwrap().player_ids();
    assert_eq!(resting.len(), 1);

    let id = first_match_id(&t);
    let t = score(&t, &id, 7, 3);
    let t = complete_match(&t, 0, &id).unwrap();

    let round = &t.rounds[0];
    assert!(round.completed);
    let m = &round.matches[0];
    assert_eq!(m.status, MatchStatus::Completed);
    assert!(m.ended_at.is_some());
    for pid in m.pair_1.players {
        let p = player(&t, pid);
        assert_eq!((p.points, p.matches_played, p.wins, p.losses), (7, 1, 1, 0));
        assert_eq!(p.elo_rating, 1516);
    }
    for pid in m.pair_2.players {
        let p = player(&t, pid);
        assert_eq!((p.points, p.matches_played, p.wins, p.losses), (3, 1, 0, 1));
        assert_eq!(p.elo_rating, 1484);
    }
    let rester = player(&t, resting[0]);
    assert_eq!((rester.sit_out_count, rester.matches_played), (1, 0));

    let [a, b] = m.pair_1.players;
    let [c, d] = m.pair_2.players;
    assert_eq!(t.partnership_history.count(a, b), 1);
    assert_eq!(t.partnership_history.count(c, d), 1);
    assert_eq!(t.partnership_history.count(a, c), 0);
    for x in [a, b] {
        for y in [c, d] {
            assert_eq!(t.opposition_history.count(x, y), 1);
            assert_eq!(t.opposition_history.count(y, x), 1);
        }
    }
    assert_eq!(t.opposition_history.count(a, b), 0);
}

#[test]
fn completing_leaves_the_input_snapshot_untouched() {
    let t = started(4, 1);
    let id = first_match_id(&t);
    let scored = score(&t, &id, 5, 2);
    let before = scored.clone();
    let _ = complete_match(&scored, 0, &id).unwrap();
    assert_eq!(scored, before);
    assert_eq!(scored.rounds[0].matches[0].status, MatchStatus::Pending);
}

#[test]
fn complete_then_reverse_restores_stats_and_histories() {
    let t = started(5, 9);
    let id = first_match_id(&t);
    let scored = score(&t, &id, 9, 4);
    let completed = complete_match(&scored, 0, &id).unwrap();
    let reversed = reverse_match(&completed, 0, &id).unwrap();

    assert_eq!(stats(&reversed), stats(&scored));
    assert_eq!(reversed.partnership_history, scored.partnership_history);
    assert_eq!(reversed.opposition_history, scored.opposition_history);
    assert!(reversed.partnership_history.is_empty());
    assert!(!reversed.rounds[0].completed);

    let m = &reversed.rounds[0].matches[0];
    assert_eq!(m.status, MatchStatus::Editing);
    assert_eq!(m.scores_before_edit, Some((9, 4)));

    // Ratings and sit-out credit are not rolled back.
    let winner = m.pair_1.players[0];
    assert_eq!(player(&reversed, winner).elo_rating, player(&completed, winner).elo_rating);
    let rester = reversed.rounds[0].sitting_out.as_ref().unwrap().player_ids()[0];
    assert_eq!(player(&reversed, rester).sit_out_count, 1);
}

#[test]
fn save_edit_applies_new_scores_once() {
    let t = started(5, 4);
    let id = first_match_id(&t);
    let t = complete_match(&score(&t, &id, 7, 3), 0, &id).unwrap();
    let rating_after_first = t.players.iter().map(|p| p.elo_rating).collect::<Vec<_>>();

    let t = reverse_match(&t, 0, &id).unwrap();
    let t = update_score(&t, 0, &id, Side::Two, 5).unwrap();
    let t = save_edit(&t, 0, &id).unwrap();

    let m = &t.rounds[0].matches[0];
    assert_eq!((m.score_1, m.score_2), (7, 8));
    assert_eq!(m.scores_before_edit, None);
    for pid in m.pair_1.players {
        let p = player(&t, pid);
        assert_eq!((p.points, p.matches_played, p.wins, p.losses), (7, 1, 0, 1));
    }
    for pid in m.pair_2.players {
        let p = player(&t, pid);
        assert_eq!((p.points, p.matches_played, p.wins, p.losses), (8, 1, 1, 0));
    }
    assert_eq!(t.players.iter().map(|p| p.elo_rating).collect::<Vec<_>>(), rating_after_first);
    let rester = t.rounds[0].sitting_out.as_ref().unwrap().player_ids()[0];
    assert_eq!(player(&t, rester).sit_out_count, 1);
    assert_eq!(t.partnership_history.count(m.pair_1.players[0], m.pair_1.players[1]), 1);
}

#[test]
fn cancel_edit_restores_previous_scores() {
    let t = started(4, 8);
    let id = first_match_id(&t);
    let completed = complete_match(&score(&t, &id, 6, 4), 0, &id).unwrap();

    let editing = reverse_match(&completed, 0, &id).unwrap();
    let editing = update_score(&editing, 0, &id, Side::One, -2).unwrap();
    assert_eq!(editing.rounds[0].matches[0].score_1, 4);
    let cancelled = cancel_edit(&editing, 0, &id).unwrap();

    let m = &cancelled.rounds[0].matches[0];
    assert_eq!((m.score_1, m.score_2), (6, 4));
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(stats(&cancelled), stats(&completed));
    assert_eq!(cancelled.partnership_history, completed.partnership_history);
    assert_eq!(cancelled.opposition_history, completed.opposition_history);
    assert!(cancelled.rounds[0].completed);
}

#[test]
fn weighted_points_use_ratings_from_before_the_match() {
    let t = started(4, 12);
    let id = first_match_id(&t);
    let completed = complete_match(&score(&t, &id, 7, 3), 0, &id).unwrap();
    let weighted = completed.rounds[0].matches[0].weighted_points.unwrap();
    assert_eq!((weighted.pair_1, weighted.pair_2), (7.0, 3.0));

    let editing = reverse_match(&completed, 0, &id).unwrap();
    let cancelled = cancel_edit(&editing, 0, &id).unwrap();
    let m = &cancelled.rounds[0].matches[0];
    assert_eq!(m.weighted_points, Some(weighted));
    assert_eq!(m.rated_pair_elos, Some([1500.0, 1500.0]));

    let editing = reverse_match(&cancelled, 0, &id).unwrap();
    let editing = update_score(&editing, 0, &id, Side::One, 2).unwrap();
    let saved = save_edit(&editing, 0, &id).unwrap();
    let weighted = saved.rounds[0].matches[0].weighted_points.unwrap();
    assert_eq!((weighted.pair_1, weighted.pair_2), (9.0, 3.0));
}

#[test]
fn lifecycle_rejects_out_of_order_actions() {
    let t = started(4, 3);
    let id = first_match_id(&t);

    assert!(matches!(
        reverse_match(&t, 0, &id),
        Err(TournamentError::InvalidMatchState { status: MatchStatus::Pending, .. })
    ));
    assert!(matches!(
        save_edit(&t, 0, &id),
        Err(TournamentError::InvalidMatchState { .. })
    ));
    assert!(matches!(
        cancel_edit(&t, 0, &id),
        Err(TournamentError::InvalidMatchState { .. })
    ));

    let done = complete_match(&t, 0, &id).unwrap();
    assert!(matches!(
        complete_match(&done, 0, &id),
        Err(TournamentError::InvalidMatchState { status: MatchStatus::Completed, .. })
    ));
    assert!(matches!(
        update_score(&done, 0, &id, Side::One, 1),
        Err(TournamentError::InvalidMatchState { .. })
    ));
    assert_eq!(complete_match(&t, 7, &id), Err(TournamentError::RoundNotFound(7)));
    assert_eq!(
        complete_match(&t, 0, "r0-m9"),
        Err(TournamentError::MatchNotFound("r0-m9".to_string()))
    );
}

#[test]
fn scores_clamp_at_zero_and_points_rotate_server() {
    let t = started(4, 6);
    let id = first_match_id(&t);
    let t = update_score(&t, 0, &id, Side::Two, -1).unwrap();
    let m = &t.rounds[0].matches[0];
    assert_eq!(m.score_2, 0);
    assert_eq!(m.current_server, Some(ServerPosition::Pair1P1));

    let t = update_score(&t, 0, &id, Side::One, 1).unwrap();
    assert_eq!(t.rounds[0].matches[0].current_server, Some(ServerPosition::Pair2P1));
    let t = update_score(&t, 0, &id, Side::Two, 1).unwrap();
    assert_eq!(t.rounds[0].matches[0].current_server, Some(ServerPosition::Pair1P2));
}

#[test]
fn draw_counts_neither_win_nor_loss_and_keeps_ratings() {
    let t = started(4, 12);
    let id = first_match_id(&t);
    let t = complete_match(&score(&t, &id, 5, 5), 0, &id).unwrap();
    for p in &t.players {
        assert_eq!((p.points, p.matches_played, p.wins, p.losses), (5, 1, 0, 0));
        assert_eq!(p.elo_rating, 1500);
    }
    let wp = t.rounds[0].matches[0].weighted_points.unwrap();
    assert_eq!((wp.pair_1, wp.pair_2), (5.0, 5.0));
}

#[test]
fn ratings_disabled_leaves_elo_alone() {
    let players: Vec<Player> = (0..4).map(|i| Player::new(format!("P{i}"))).collect();
    let settings = TournamentSettings {
        ratings_enabled: false,
        ..TournamentSettings::default()
    };
    let t = Tournament::with_players(players, settings);
    let t = start_tournament_with_rng(&t, &mut StdRng::seed_from_u64(0)).unwrap();
    let id = first_match_id(&t);
    let t = complete_match(&score(&t, &id, 8, 1), 0, &id).unwrap();
    assert!(t.players.iter().all(|p| p.elo_rating == 1500));
    assert!(t.rounds[0].matches[0].weighted_points.is_none());
}

#[test]
fn delete_completed_match_reverses_it() {
    let t = started(4, 21);
    let id = first_match_id(&t);
    let fresh = t.clone();
    let t = complete_match(&score(&t, &id, 4, 2), 0, &id).unwrap();
    let t = delete_match(&t, 0, &id).unwrap();

    assert!(t.rounds[0].matches.is_empty());
    assert!(!t.rounds[0].completed);
    assert_eq!(stats(&t), stats(&fresh));
    assert!(t.partnership_history.is_empty());
    assert!(t.opposition_history.is_empty());
}

#[test]
fn delete_editing_match_does_not_reverse_twice() {
    let t = started(8, 5);
    let first = t.rounds[0].matches[0].id.clone();
    let second = t.rounds[0].matches[1].id.clone();
    let t = complete_match(&score(&t, &first, 3, 1), 0, &first).unwrap();
    let t = complete_match(&score(&t, &second, 2, 6), 0, &second).unwrap();
    let only_second = delete_match(&t, 0, &first).unwrap();

    let t = reverse_match(&t, 0, &first).unwrap();
    let t = delete_match(&t, 0, &first).unwrap();

    assert_eq!(stats(&t), stats(&only_second));
    assert_eq!(t.partnership_history, only_second.partnership_history);
    assert_eq!(t.opposition_history, only_second.opposition_history);
    assert!(t.rounds[0].completed);
}

#[test]
fn delete_round_reverses_completed_matches() {
    let t = started(8, 17);
    let fresh = t.clone();
    let first = t.rounds[0].matches[0].id.clone();
    let t = complete_match(&score(&t, &first, 6, 3), 0, &first).unwrap();
    let t = delete_round(&t, 0).unwrap();

    assert!(t.rounds.is_empty());
    assert_eq!(stats(&t), stats(&fresh));
    assert!(t.partnership_history.is_empty());
    assert!(t.opposition_history.is_empty());
    assert_eq!(delete_round(&t, 0), Err(TournamentError::RoundNotFound(0)));
}

#[test]
fn histories_stay_symmetric_through_random_play() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut t = started(9, 99);
    for _ in 0..8 {
        let round = t.rounds.last().unwrap();
        let round_id = round.id;
        let ids: Vec<String> = round.matches.iter().map(|m| m.id.clone()).collect();
        for id in &ids {
            t = update_score(&t, round_id, id, Side::One, rng.gen_range(0..12)).unwrap();
            t = update_score(&t, round_id, id, Side::Two, rng.gen_range(0..12)).unwrap();
            t = complete_match(&t, round_id, id).unwrap();
            if rng.gen_bool(0.3) {
                t = reverse_match(&t, round_id, id).unwrap();
                t = save_edit(&t, round_id, id).unwrap();
            }
        }
        if rng.gen_bool(0.2) {
            t = delete_match(&t, round_id, &ids[0]).unwrap();
        }
        assert!(t.partnership_history.is_symmetric());
        assert!(t.opposition_history.is_symmetric());
        t = generate_next_round_with_rng(&t, &mut rng).unwrap();
    }
}

#[test]
fn elo_update_is_zero_sum_within_rounding() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let rated: Vec<RatedPlayer> = (0..4)
            .map(|_| RatedPlayer::new(uuid::Uuid::new_v4(), rng.gen_range(100..=3000)))
            .collect();
        let before: i32 = rated.iter().map(|p| p.rating).sum();
        let updated =
            update_match_elo([rated[0], rated[1]], [rated[2], rated[3]], rng.gen_bool(0.5));
        let after: i32 = updated.values().sum();
        assert!((after - before).abs() <= 4, "{before} -> {after}");
        assert_eq!(
            updated[&rated[0].id] - rated[0].rating,
            updated[&rated[1].id] - rated[1].rating
        );
    }
}
