//! Start and reset: the transitions around the playing phase.

use crate::logic::round::generate_next_round_with_rng;
use crate::models::{PairHistory, Tournament, TournamentError};
use rand::Rng;

/// Start the tournament and generate the first round. Needs at least 4 active players.
pub fn start_tournament(t: &Tournament) -> Result<Tournament, TournamentError> {
    start_tournament_with_rng(t, &mut rand::thread_rng())
}

pub fn start_tournament_with_rng<R: Rng>(
    t: &Tournament,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    if t.started {
        return Err(TournamentError::AlreadyStarted);
    }
    let active = t.players.iter().filter(|p| p.active).count();
    if active < 4 {
        return Err(TournamentError::InsufficientPlayers {
            available: active,
            required: 4,
        });
    }
    let mut started = t.clone();
    started.started = true;
    log::info!("Starting tournament {} with {} active players", t.id, active);
    generate_next_round_with_rng(&started, rng)
}

/// Back to the roster stage: same players, all stats and ratings back to their start values.
pub fn reset_tournament(t: &Tournament) -> Tournament {
    let mut next = t.clone();
    for p in &mut next.players {
        p.reset();
    }
    next.rounds.clear();
    next.started = false;
    next.partnership_history = PairHistory::new();
    next.opposition_history = PairHistory::new();
    next.finals_mode = false;
    next.finals_match = None;
    log::info!("Reset tournament {}", t.id);
    next
}
