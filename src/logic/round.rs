//! Round generation: sit-outs, then partners, then opponents.

use crate::logic::matching::match_pairs;
use crate::logic::pairing::generate_pairs_with_rng;
use crate::logic::sit_out::split_sit_outs;
use crate::models::{Round, Tournament, TournamentError};
use rand::Rng;

/// Generate the next round with the thread-local RNG.
pub fn generate_next_round(t: &Tournament) -> Result<Tournament, TournamentError> {
    generate_next_round_with_rng(t, &mut rand::thread_rng())
}

/// Build the next round from the active players and append it.
///
/// 1. Need at least 4 active players.
/// 2. Rest players until the rest divide by four (see [`split_sit_outs`]).
/// 3. Pair the rest using partnership history and the configured skill metric.
/// 4. Match pairs using opposition history.
pub fn generate_next_round_with_rng<R: Rng>(
    t: &Tournament,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    if !t.started {
        return Err(TournamentError::NotStarted);
    }
    let active = t.active_players();
    if active.len() < 4 {
        return Err(TournamentError::InsufficientPlayers {
            available: active.len(),
            required: 4,
        });
    }

    let (playing, sitting_out) = split_sit_outs(active);
    let pairs = generate_pairs_with_rng(
        &playing,
        &t.partnership_history,
        t.settings.skill_metric,
        rng,
    )?;

    let round_id = t.next_round_id();
    let matches = match_pairs(&pairs, &t.opposition_history, round_id);
    if matches.is_empty() {
        return Err(TournamentError::InsufficientPlayers {
            available: playing.len(),
            required: 4,
        });
    }

    log::info!(
        "Generated round {} with {} match(es){}",
        round_id,
        matches.len(),
        sitting_out
            .as_ref()
            .map(|s| format!("; sitting out: {}", s.name()))
            .unwrap_or_default()
    );

    let mut next = t.clone();
    next.rounds.push(Round::new(round_id, matches, sitting_out));
    Ok(next)
}
