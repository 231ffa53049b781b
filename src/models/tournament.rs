//! Tournament snapshot and roster operations.

use crate::models::game::{FinalsMatch, Match, MatchId, MatchStatus};
use crate::models::history::PairHistory;
use crate::models::player::{Player, PlayerId, MAX_STARTING_RATING, MIN_STARTING_RATING};
use crate::models::round::Round;
use crate::models::settings::TournamentSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations. A rejected operation changes nothing.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Need at least {required} players to form matches (have {available})")]
    InsufficientPlayers { available: usize, required: usize },
    #[error("Match {match_id} is {status}; action not allowed")]
    InvalidMatchState { match_id: MatchId, status: MatchStatus },
    #[error("Tournament has not started")]
    NotStarted,
    #[error("Tournament has already started")]
    AlreadyStarted,
    #[error("Round {0} not found")]
    RoundNotFound(u32),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    /// Names are unique, case-insensitive.
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    #[error("Player name must not be empty")]
    EmptyPlayerName,
    #[error("Starting rating {0} must be between 100 and 3000")]
    InvalidStartingRating(i32),
    #[error("Finals have not been started")]
    FinalsNotStarted,
    #[error("Finals have no winner yet")]
    FinalsUndecided,
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Full tournament state. Operations in `logic` read one snapshot and return the next.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub players: Vec<Player>,
    pub rounds: Vec<Round>,
    pub started: bool,
    pub partnership_history: PairHistory,
    pub opposition_history: PairHistory,
    pub finals_mode: bool,
    pub finals_match: Option<FinalsMatch>,
    pub settings: TournamentSettings,
}

impl Tournament {
    /// Create a new tournament with no players, not yet started.
    pub fn new(settings: TournamentSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            players: Vec::new(),
            rounds: Vec::new(),
            started: false,
            partnership_history: PairHistory::new(),
            opposition_history: PairHistory::new(),
            finals_mode: false,
            finals_match: None,
            settings,
        }
    }

    /// Create a tournament with initial players. Still not started.
    pub fn with_players(players: Vec<Player>, settings: TournamentSettings) -> Self {
        Self {
            players,
            ..Self::new(settings)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn active_players(&self) -> Vec<Player> {
        self.players.iter().filter(|p| p.active).cloned().collect()
    }

    pub fn find_round(&self, round_id: u32) -> Result<&Round, TournamentError> {
        self.rounds
            .iter()
            .find(|r| r.id == round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))
    }

    pub fn find_round_mut(&mut self, round_id: u32) -> Result<&mut Round, TournamentError> {
        self.rounds
            .iter_mut()
            .find(|r| r.id == round_id)
            .ok_or(TournamentError::RoundNotFound(round_id))
    }

    pub fn find_match(&self, round_id: u32, match_id: &str) -> Result<&Match, TournamentError> {
        self.find_round(round_id)?
            .find_match(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))
    }

    pub fn find_match_mut(
        &mut self,
        round_id: u32,
        match_id: &str,
    ) -> Result<&mut Match, TournamentError> {
        self.find_round_mut(round_id)?
            .find_match_mut(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))
    }

    /// Id for the next generated round; stays unique after rounds are deleted.
    pub fn next_round_id(&self) -> u32 {
        self.rounds.iter().map(|r| r.id + 1).max().unwrap_or(0)
    }

    /// Add a player. Names are trimmed and must be unique (case-insensitive).
    /// `rating` must lie in 100..=3000; `None` uses the default of 1500.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        rating: Option<i32>,
    ) -> Result<PlayerId, TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let lowered = name_trimmed.to_lowercase();
        let is_duplicate = self.players.iter().any(|p| p.name.to_lowercase() == lowered);
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = match rating {
            Some(r) if !(MIN_STARTING_RATING..=MAX_STARTING_RATING).contains(&r) => {
                return Err(TournamentError::InvalidStartingRating(r));
            }
            Some(r) => Player::with_rating(name_trimmed, r),
            None => Player::new(name_trimmed),
        };
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (only before the tournament starts).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.started {
            return Err(TournamentError::AlreadyStarted);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Flip a player between active and away. Returns the new active flag.
    pub fn toggle_player_active(&mut self, player_id: PlayerId) -> Result<bool, TournamentError> {
        let p = self
            .get_player_mut(player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.active = !p.active;
        Ok(p.active)
    }

    pub fn set_settings(&mut self, settings: TournamentSettings) {
        self.settings = settings;
    }
}
