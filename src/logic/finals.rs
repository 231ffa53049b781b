//! Finals: one match among the leaderboard's top four, seed 1 & 4 against seed 2 & 3.

use crate::logic::leaderboard::rank_leaderboard;
use crate::logic::scoring::{adjust_score, check_match_winner, next_server};
use crate::models::{
    FinalsMatch, LeaderboardMode, MatchStatus, Pair, PlayerStats, ServerPosition, Side, Tournament,
    TournamentError,
};

fn seeded_pair(first: &PlayerStats, second: &PlayerStats) -> Pair {
    let mut pair = Pair::new(
        first.player.id,
        second.player.id,
        (f64::from(first.player.elo_rating) + f64::from(second.player.elo_rating)) / 2.0,
    );
    pair.name = Some(format!("{} & {}", first.player.name, second.player.name));
    pair
}

/// Seed the finals from the leaderboard in `mode`. Needs four ranked players.
pub fn initiate_finals(
    t: &Tournament,
    mode: LeaderboardMode,
) -> Result<Tournament, TournamentError> {
    let ranked = rank_leaderboard(&t.players, &t.rounds, mode);
    if ranked.len() < 4 {
        return Err(TournamentError::InsufficientPlayers {
            available: ranked.len(),
            required: 4,
        });
    }
    let finals = FinalsMatch {
        id: "finals".to_string(),
        pair_1: seeded_pair(&ranked[0], &ranked[3]),
        pair_2: seeded_pair(&ranked[1], &ranked[2]),
        score_1: 0,
        score_2: 0,
        winner: None,
        completed: false,
        current_server: Some(ServerPosition::Pair1P1),
    };
    log::info!(
        "Finals: {} vs {}",
        finals.pair_1.name.as_deref().unwrap_or_default(),
        finals.pair_2.name.as_deref().unwrap_or_default()
    );

    let mut next = t.clone();
    next.finals_mode = true;
    next.finals_match = Some(finals);
    Ok(next)
}

fn finals_in_progress(t: &Tournament) -> Result<&FinalsMatch, TournamentError> {
    let finals = t.finals_match.as_ref().ok_or(TournamentError::FinalsNotStarted)?;
    if finals.completed {
        log::warn!("Ignoring action on completed finals");
        return Err(TournamentError::InvalidMatchState {
            match_id: finals.id.clone(),
            status: MatchStatus::Completed,
        });
    }
    Ok(finals)
}

/// Adjust a finals score. A point scored rotates the server; the winner is re-checked
/// after every change.
pub fn update_finals_score(
    t: &Tournament,
    side: Side,
    delta: i32,
) -> Result<Tournament, TournamentError> {
    let mut finals = finals_in_progress(t)?.clone();
    match side {
        Side::One => finals.score_1 = adjust_score(finals.score_1, delta),
        Side::Two => finals.score_2 = adjust_score(finals.score_2, delta),
    }
    if delta > 0 {
        finals.current_server = Some(next_server(finals.current_server));
    }
    finals.winner = check_match_winner(finals.score_1, finals.score_2, t.settings.points_to_win);

    let mut next = t.clone();
    next.finals_match = Some(finals);
    Ok(next)
}

/// Close the finals. Only possible once a winner is decided.
pub fn complete_finals(t: &Tournament) -> Result<Tournament, TournamentError> {
    let mut finals = finals_in_progress(t)?.clone();
    let Some(winner) = finals.winner else {
        return Err(TournamentError::FinalsUndecided);
    };
    finals.completed = true;
    log::info!(
        "Finals completed, champions: {}",
        finals.pair(winner).name.as_deref().unwrap_or_default()
    );

    let mut next = t.clone();
    next.finals_match = Some(finals);
    Ok(next)
}
