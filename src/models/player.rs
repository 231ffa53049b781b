//! Player and PlayerStats data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in pairs, matches, and history lookups).
pub type PlayerId = Uuid;

/// Rating every player starts from unless the roster supplies one.
pub const DEFAULT_RATING: i32 = 1500;

/// Allowed range for an explicit starting rating.
pub const MIN_STARTING_RATING: i32 = 100;
pub const MAX_STARTING_RATING: i32 = 3000;

/// A player in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Sum of own-side scores across completed matches.
    pub points: u32,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Away players are skipped when a new round is generated.
    pub active: bool,
    pub sit_out_count: u32,
    pub elo_rating: i32,
    pub initial_elo: i32,
}

impl Player {
    /// Create a new player at the default rating. Stats start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rating(name, DEFAULT_RATING)
    }

    pub fn with_rating(name: impl Into<String>, rating: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            points: 0,
            matches_played: 0,
            wins: 0,
            losses: 0,
            active: true,
            sit_out_count: 0,
            elo_rating: rating,
            initial_elo: rating,
        }
    }

    /// Points per game; zero before the first match.
    pub fn ppg(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            f64::from(self.points) / f64::from(self.matches_played)
        }
    }

    /// Fraction of matches won, in `0.0..=1.0`.
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.matches_played)
        }
    }

    /// Add one side's result of a match. Equal scores count as neither win nor loss.
    pub fn record_result(&mut self, own: u32, other: u32) {
        self.points += own;
        self.matches_played += 1;
        if own > other {
            self.wins += 1;
        } else if own < other {
            self.losses += 1;
        }
    }

    /// Exact inverse of [`Player::record_result`], clamped at zero.
    pub fn revert_result(&mut self, own: u32, other: u32) {
        self.points = self.points.saturating_sub(own);
        self.matches_played = self.matches_played.saturating_sub(1);
        if own > other {
            self.wins = self.wins.saturating_sub(1);
        } else if own < other {
            self.losses = self.losses.saturating_sub(1);
        }
    }

    /// Record that this player sat out one round.
    pub fn record_sat_out(&mut self) {
        self.sit_out_count += 1;
    }

    /// Back to a fresh state, keeping identity and starting rating.
    pub fn reset(&mut self) {
        self.points = 0;
        self.matches_played = 0;
        self.wins = 0;
        self.losses = 0;
        self.active = true;
        self.sit_out_count = 0;
        self.elo_rating = self.initial_elo;
    }
}

/// Leaderboard row: the player plus derived display stats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub rank: usize,
    #[serde(flatten)]
    pub player: Player,
    pub ppg: f64,
    /// Percentage, `0.0..=100.0`.
    pub win_rate: f64,
}

impl PlayerStats {
    pub fn from_player(p: &Player) -> Self {
        Self {
            rank: 0,
            player: p.clone(),
            ppg: p.ppg(),
            win_rate: p.win_rate() * 100.0,
        }
    }
}
