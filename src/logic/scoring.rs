//! Score rules shared by round matches and the finals: winner check, server rotation, timing.

use crate::models::{ServerPosition, Side};
use chrono::{DateTime, Utc};

/// First side to reach `points_to_win` while ahead wins. `None` while undecided.
pub fn check_match_winner(score_1: u32, score_2: u32, points_to_win: u32) -> Option<Side> {
    if score_1 >= points_to_win && score_1 > score_2 {
        Some(Side::One)
    } else if score_2 >= points_to_win && score_2 > score_1 {
        Some(Side::Two)
    } else {
        None
    }
}

/// Next server: pair1-p1, pair2-p1, pair1-p2, pair2-p2, then around again.
pub fn next_server(current: Option<ServerPosition>) -> ServerPosition {
    match current {
        None => ServerPosition::Pair1P1,
        Some(ServerPosition::Pair1P1) => ServerPosition::Pair2P1,
        Some(ServerPosition::Pair2P1) => ServerPosition::Pair1P2,
        Some(ServerPosition::Pair1P2) => ServerPosition::Pair2P2,
        Some(ServerPosition::Pair2P2) => ServerPosition::Pair1P1,
    }
}

/// Apply a +1/-1 (or any) delta to a score, never going below zero.
pub fn adjust_score(score: u32, delta: i32) -> u32 {
    score.saturating_add_signed(delta)
}

/// `m:ss` between start and end (or now, if still running). `--:--` if never started.
pub fn match_duration(
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
) -> String {
    let Some(start) = started_at else {
        return "--:--".to_string();
    };
    let end = ended_at.unwrap_or_else(Utc::now);
    let total_seconds = (end - start).num_seconds().max(0);
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
