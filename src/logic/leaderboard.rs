//! Leaderboard: points per game with a tie-break cascade, or simpler orderings.

use crate::models::{LeaderboardMode, Player, PlayerId, PlayerStats, Round};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Floating values closer than this are treated as tied.
pub const EPSILON: f64 = 0.001;

/// Record of `player` against `opponent` over completed matches where they were on opposite sides.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeadToHead {
    pub wins: u32,
    pub losses: u32,
    pub points_for: u32,
    pub points_against: u32,
}

pub fn head_to_head(player: PlayerId, opponent: PlayerId, rounds: &[Round]) -> HeadToHead {
    let mut record = HeadToHead::default();
    for m in rounds.iter().flat_map(|r| &r.matches).filter(|m| m.is_completed()) {
        let (Some(own_side), Some(opp_side)) = (m.side_of(player), m.side_of(opponent)) else {
            continue;
        };
        if own_side == opp_side {
            continue;
        }
        let (own, other) = (m.score(own_side), m.score(opp_side));
        record.points_for += own;
        record.points_against += other;
        match own.cmp(&other) {
            Ordering::Greater => record.wins += 1,
            Ordering::Less => record.losses += 1,
            Ordering::Equal => {}
        }
    }
    record
}

/// Strength of schedule: mean PPG of the distinct opponents `player` has faced.
///
/// Opponents without a ranked row still count towards the divisor.
pub fn opponent_quality(player: PlayerId, rounds: &[Round], ranked: &[PlayerStats]) -> f64 {
    let mut opponents: HashSet<PlayerId> = HashSet::new();
    for m in rounds.iter().flat_map(|r| &r.matches).filter(|m| m.is_completed()) {
        if let Some(side) = m.side_of(player) {
            opponents.extend(m.pair(side.other()).players);
        }
    }
    if opponents.is_empty() {
        return 0.0;
    }
    let total: f64 = ranked
        .iter()
        .filter(|row| opponents.contains(&row.player.id))
        .map(|row| row.ppg)
        .sum();
    total / opponents.len() as f64
}

/// Descending by value, with ties inside [`EPSILON`].
fn desc_approx(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= EPSILON {
        Ordering::Equal
    } else {
        b.total_cmp(&a)
    }
}

fn ppg_cascade(
    a: &PlayerStats,
    b: &PlayerStats,
    rounds: &[Round],
    quality: &HashMap<PlayerId, f64>,
) -> Ordering {
    desc_approx(a.ppg, b.ppg)
        .then_with(|| {
            let h2h = head_to_head(a.player.id, b.player.id, rounds);
            h2h.losses
                .cmp(&h2h.wins)
                .then(h2h.points_against.cmp(&h2h.points_for))
        })
        .then_with(|| desc_approx(a.win_rate, b.win_rate))
        .then_with(|| {
            let qa = quality.get(&a.player.id).copied().unwrap_or(0.0);
            let qb = quality.get(&b.player.id).copied().unwrap_or(0.0);
            desc_approx(qa, qb)
        })
        .then(b.player.matches_played.cmp(&a.player.matches_played))
        .then(b.player.points.cmp(&a.player.points))
}

/// Stable insertion sort. Head-to-head results can be cyclic, so the cascade is not a
/// total order; this never panics on that and keeps roster order among full ties.
fn insertion_sort_by<T>(items: &mut [T], mut cmp: impl FnMut(&T, &T) -> Ordering) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && cmp(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Rank everyone who has played at least one match. Rows carry 1-based ranks.
pub fn rank_leaderboard(
    players: &[Player],
    rounds: &[Round],
    mode: LeaderboardMode,
) -> Vec<PlayerStats> {
    let mut rows: Vec<PlayerStats> = players
        .iter()
        .filter(|p| p.matches_played > 0)
        .map(PlayerStats::from_player)
        .collect();

    match mode {
        LeaderboardMode::Total => insertion_sort_by(&mut rows, |a, b| {
            b.player
                .points
                .cmp(&a.player.points)
                .then_with(|| desc_approx(a.win_rate, b.win_rate))
        }),
        LeaderboardMode::Ppg | LeaderboardMode::Elo => {
            let quality: HashMap<PlayerId, f64> = rows
                .iter()
                .map(|row| (row.player.id, opponent_quality(row.player.id, rounds, &rows)))
                .collect();
            let by_elo = mode == LeaderboardMode::Elo;
            insertion_sort_by(&mut rows, |a, b| {
                let elo = if by_elo {
                    b.player.elo_rating.cmp(&a.player.elo_rating)
                } else {
                    Ordering::Equal
                };
                elo.then_with(|| ppg_cascade(a, b, rounds, &quality))
            });
        }
    }

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}
