//! Match lifecycle: apply and reverse a match's effect on player stats and both histories.
//!
//! `Pending -> Completed -> Editing -> Completed | deleted`. Each operation reads a snapshot
//! and returns the next one; the input is never modified, so callers may keep it for undo.
//!
//! Reversal restores points, matches, wins/losses and both histories exactly. Two effects are
//! one-way: sit-out credit (once per round) and rating changes (once per match). Neither is
//! rolled back on edit or delete, and neither is applied twice when a match is re-completed.

use crate::logic::rating::{self, RatedPlayer};
use crate::logic::scoring::{adjust_score, next_server};
use crate::models::{Match, MatchStatus, Side, Tournament, TournamentError, WeightedPoints};
use chrono::Utc;

fn invalid_state(m: &Match) -> TournamentError {
    log::warn!("Ignoring action on match {} in state {}", m.id, m.status);
    TournamentError::InvalidMatchState {
        match_id: m.id.clone(),
        status: m.status,
    }
}

/// Add the match's scores, results and pairings to the players and both histories.
fn apply_effects(t: &mut Tournament, m: &Match) {
    for side in [Side::One, Side::Two] {
        let (own, other) = (m.score(side), m.score(side.other()));
        for pid in m.pair(side).players {
            if let Some(p) = t.get_player_mut(pid) {
                p.record_result(own, other);
            }
        }
    }
    for pair in [&m.pair_1, &m.pair_2] {
        t.partnership_history.record(pair.players[0], pair.players[1]);
    }
    for a in m.pair_1.players {
        for b in m.pair_2.players {
            t.opposition_history.record(a, b);
        }
    }
}

/// Exact inverse of [`apply_effects`]; counters are floored at zero.
fn reverse_effects(t: &mut Tournament, m: &Match) {
    for side in [Side::One, Side::Two] {
        let (own, other) = (m.score(side), m.score(side.other()));
        for pid in m.pair(side).players {
            if let Some(p) = t.get_player_mut(pid) {
                p.revert_result(own, other);
            }
        }
    }
    for pair in [&m.pair_1, &m.pair_2] {
        t.partnership_history.release(pair.players[0], pair.players[1]);
    }
    for a in m.pair_1.players {
        for b in m.pair_2.players {
            t.opposition_history.release(a, b);
        }
    }
}

/// Record weighted points from the pre-match pair ratings and, the first time a decided
/// match completes, move ratings.
fn apply_ratings(t: &mut Tournament, m: &mut Match) {
    let rated = |id| t.get_player(id).map(|p| RatedPlayer::new(p.id, p.elo_rating));
    let (Some(a1), Some(a2), Some(b1), Some(b2)) = (
        rated(m.pair_1.players[0]),
        rated(m.pair_1.players[1]),
        rated(m.pair_2.players[0]),
        rated(m.pair_2.players[1]),
    ) else {
        return;
    };

    let [elo_1, elo_2] = *m.rated_pair_elos.get_or_insert([
        rating::pair_rating(a1.rating, a2.rating),
        rating::pair_rating(b1.rating, b2.rating),
    ]);
    m.weighted_points = Some(WeightedPoints {
        pair_1: rating::weighted_points(m.score_1, elo_1, elo_2),
        pair_2: rating::weighted_points(m.score_2, elo_2, elo_1),
    });

    if m.rating_applied || m.score_1 == m.score_2 {
        return;
    }
    let updated = rating::update_match_elo([a1, a2], [b1, b2], m.score_1 > m.score_2);
    for (id, new_rating) in updated {
        if let Some(p) = t.get_player_mut(id) {
            log::debug!("{}: rating {} -> {}", p.name, p.elo_rating, new_rating);
            p.elo_rating = new_rating;
        }
    }
    m.rating_applied = true;
}

/// Complete a pending (or reopened) match with its current scores.
///
/// Updates points, matches played, wins/losses, both histories, the round's sit-out credit
/// and, when enabled, ratings. Marks the round completed once every match in it is.
pub fn complete_match(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;
    if current.status == MatchStatus::Completed {
        return Err(invalid_state(current));
    }

    let mut next = t.clone();
    let mut m = current.clone();
    apply_effects(&mut next, &m);
    if next.settings.ratings_enabled {
        apply_ratings(&mut next, &mut m);
    }
    m.status = MatchStatus::Completed;
    m.ended_at = Some(Utc::now());
    m.scores_before_edit = None;

    let round = next.find_round(round_id)?;
    let sit_out_ids = match (&round.sitting_out, round.sit_out_recorded) {
        (Some(sitting_out), false) => sitting_out.player_ids(),
        _ => Vec::new(),
    };
    for pid in &sit_out_ids {
        if let Some(p) = next.get_player_mut(*pid) {
            p.record_sat_out();
        }
    }

    let round = next.find_round_mut(round_id)?;
    if round.sitting_out.is_some() {
        round.sit_out_recorded = true;
    }
    if let Some(slot) = round.find_match_mut(match_id) {
        *slot = m;
    }
    round.refresh_completed();

    log::info!(
        "Completed match {} in round {} ({}-{}){}",
        match_id,
        round_id,
        current.score_1,
        current.score_2,
        if round.completed { "; round completed" } else { "" }
    );
    Ok(next)
}

/// Reopen a completed match for editing: reverse its stats and history effects.
/// Ratings and sit-out credit stay as they are.
pub fn reverse_match(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;
    if current.status != MatchStatus::Completed {
        return Err(invalid_state(current));
    }

    let mut next = t.clone();
    reverse_effects(&mut next, current);

    let round = next.find_round_mut(round_id)?;
    if let Some(m) = round.find_match_mut(match_id) {
        m.status = MatchStatus::Editing;
        m.scores_before_edit = Some((m.score_1, m.score_2));
    }
    round.refresh_completed();

    log::info!("Reopened match {} in round {} for editing", match_id, round_id);
    Ok(next)
}

/// Finish an edit with the adjusted scores.
pub fn save_edit(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;
    if current.status != MatchStatus::Editing {
        return Err(invalid_state(current));
    }
    complete_match(t, round_id, match_id)
}

/// Abandon an edit: restore the scores from before the edit and complete again.
pub fn cancel_edit(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;
    if current.status != MatchStatus::Editing {
        return Err(invalid_state(current));
    }
    let mut restored = t.clone();
    let m = restored.find_match_mut(round_id, match_id)?;
    if let Some((score_1, score_2)) = m.scores_before_edit {
        m.score_1 = score_1;
        m.score_2 = score_2;
    }
    complete_match(&restored, round_id, match_id)
}

/// Add `delta` (normally +1 or -1) to one side's score, clamped at zero.
/// Only allowed while the match is pending or being edited. A point scored rotates the server.
pub fn update_score(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
    side: Side,
    delta: i32,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;
    if current.status == MatchStatus::Completed {
        return Err(invalid_state(current));
    }

    let mut next = t.clone();
    let m = next.find_match_mut(round_id, match_id)?;
    match side {
        Side::One => m.score_1 = adjust_score(m.score_1, delta),
        Side::Two => m.score_2 = adjust_score(m.score_2, delta),
    }
    if delta > 0 {
        m.current_server = Some(next_server(m.current_server));
    }
    Ok(next)
}

/// Remove a match from its round, reversing its effects first if it was completed.
pub fn delete_match(
    t: &Tournament,
    round_id: u32,
    match_id: &str,
) -> Result<Tournament, TournamentError> {
    let current = t.find_match(round_id, match_id)?;

    let mut next = t.clone();
    // An editing match has already been reversed.
    if current.status == MatchStatus::Completed {
        reverse_effects(&mut next, current);
    }
    let round = next.find_round_mut(round_id)?;
    round.remove_match(match_id);
    round.refresh_completed();

    log::info!("Deleted match {} from round {}", match_id, round_id);
    Ok(next)
}

/// Drop a whole round, reversing every completed match inside it.
pub fn delete_round(t: &Tournament, round_id: u32) -> Result<Tournament, TournamentError> {
    let round = t.find_round(round_id)?;

    let mut next = t.clone();
    for m in round.matches.iter().filter(|m| m.is_completed()) {
        reverse_effects(&mut next, m);
    }
    next.rounds.retain(|r| r.id != round_id);

    log::info!("Deleted round {} ({} matches)", round_id, round.matches.len());
    Ok(next)
}
