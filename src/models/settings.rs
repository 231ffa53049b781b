//! Per-tournament settings and the selectable skill / leaderboard strategies.

use crate::models::player::Player;
use serde::{Deserialize, Serialize};

/// How a player's skill is measured when forming pairs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMetric {
    /// Current Elo rating.
    #[default]
    Elo,
    /// Points per game so far.
    PointsPerGame,
}

impl SkillMetric {
    pub fn skill(self, player: &Player) -> f64 {
        match self {
            SkillMetric::Elo => f64::from(player.elo_rating),
            SkillMetric::PointsPerGame => player.ppg(),
        }
    }

    /// Skills closer than this count as near-equal when ordering players for pairing.
    pub fn tie_epsilon(self) -> f64 {
        match self {
            SkillMetric::Elo => 10.0,
            SkillMetric::PointsPerGame => 0.25,
        }
    }
}

/// Leaderboard ordering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardMode {
    /// Points per game with the full tie-break cascade.
    #[default]
    Ppg,
    /// Total points, win rate as the only tie-break.
    Total,
    /// Current rating, then the points-per-game cascade.
    Elo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentSettings {
    /// Target score for the winner check (first to this, leading).
    pub points_to_win: u32,
    /// Completing a match updates ratings and records weighted points.
    pub ratings_enabled: bool,
    pub skill_metric: SkillMetric,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            points_to_win: 32,
            ratings_enabled: true,
            skill_metric: SkillMetric::Elo,
        }
    }
}
