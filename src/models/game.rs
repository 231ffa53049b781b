//! Pair, Match, and FinalsMatch for 2v2 games.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Match identifier, `r{round}-m{index}` for round matches.
pub type MatchId = String;

/// Which pair of a match (first or second).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

/// Who serves next. Rotation alternates pairs: pair1-p1, pair2-p1, pair1-p2, pair2-p2.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ServerPosition {
    #[default]
    #[serde(rename = "pair1-p1")]
    Pair1P1,
    #[serde(rename = "pair2-p1")]
    Pair2P1,
    #[serde(rename = "pair1-p2")]
    Pair1P2,
    #[serde(rename = "pair2-p2")]
    Pair2P2,
}

/// Two players teamed together for one round. Not kept across rounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub players: [PlayerId; 2],
    /// Mean skill of both players under the metric used when the pair was formed.
    pub avg_skill: f64,
    pub name: Option<String>,
}

impl Pair {
    pub fn new(first: PlayerId, second: PlayerId, avg_skill: f64) -> Self {
        Self {
            players: [first, second],
            avg_skill,
            name: None,
        }
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }
}

/// Lifecycle of a round match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
    /// Reopened: stats reversed, scores adjustable until saved or cancelled.
    Editing,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Pending => write!(f, "pending"),
            MatchStatus::Completed => write!(f, "completed"),
            MatchStatus::Editing => write!(f, "editing"),
        }
    }
}

/// Opponent-strength weighted scores recorded at completion (display only).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoints {
    pub pair_1: f64,
    pub pair_2: f64,
}

/// A single round match between two pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub pair_1: Pair,
    pub pair_2: Pair,
    pub score_1: u32,
    pub score_2: u32,
    pub status: MatchStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub current_server: Option<ServerPosition>,
    pub weighted_points: Option<WeightedPoints>,
    /// Set once this match has moved ratings; later re-completions leave ratings alone.
    #[serde(default)]
    pub rating_applied: bool,
    /// Scores as they were when an edit started, restored on cancel.
    #[serde(default)]
    pub scores_before_edit: Option<(u32, u32)>,
    /// Pair ratings going into the match, fixed at its first completion.
    /// Weighted points are always derived from these.
    #[serde(default)]
    pub rated_pair_elos: Option<[f64; 2]>,
}

impl Match {
    pub fn new(round_id: u32, index: usize, pair_1: Pair, pair_2: Pair) -> Self {
        Self {
            id: format!("r{round_id}-m{index}"),
            pair_1,
            pair_2,
            score_1: 0,
            score_2: 0,
            status: MatchStatus::Pending,
            started_at: Some(Utc::now()),
            ended_at: None,
            current_server: Some(ServerPosition::Pair1P1),
            weighted_points: None,
            rating_applied: false,
            scores_before_edit: None,
            rated_pair_elos: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn pair(&self, side: Side) -> &Pair {
        match side {
            Side::One => &self.pair_1,
            Side::Two => &self.pair_2,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::One => self.score_1,
            Side::Two => self.score_2,
        }
    }

    /// Side a player is on, if they played in this match.
    pub fn side_of(&self, id: PlayerId) -> Option<Side> {
        if self.pair_1.contains(id) {
            Some(Side::One)
        } else if self.pair_2.contains(id) {
            Some(Side::Two)
        } else {
            None
        }
    }

    /// All four players, pair 1 first.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.pair_1.players.iter().chain(self.pair_2.players.iter()).copied()
    }
}

/// The single finals match: seed 1 & 4 against seed 2 & 3.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalsMatch {
    pub id: MatchId,
    pub pair_1: Pair,
    pub pair_2: Pair,
    pub score_1: u32,
    pub score_2: u32,
    /// Side that has reached the target score and leads, if any.
    pub winner: Option<Side>,
    pub completed: bool,
    pub current_server: Option<ServerPosition>,
}

impl FinalsMatch {
    pub fn pair(&self, side: Side) -> &Pair {
        match side {
            Side::One => &self.pair_1,
            Side::Two => &self.pair_2,
        }
    }
}
