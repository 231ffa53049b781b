//! Paired Elo: both members of a pair share the pair's rating change.

use crate::models::PlayerId;
use std::collections::HashMap;

pub const K_FACTOR: f64 = 32.0;

/// Expected score of A against B, in `0.0..=1.0`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// A pair's rating is the mean of its members.
pub fn pair_rating(rating_1: i32, rating_2: i32) -> f64 {
    (f64::from(rating_1) + f64::from(rating_2)) / 2.0
}

/// New rating after one result, rounded to the nearest integer.
pub fn new_rating(current: i32, expected: f64, actual: f64) -> i32 {
    (f64::from(current) + K_FACTOR * (actual - expected)).round() as i32
}

/// Opponent-strength multiplier for weighted points, clamped to `0.5..=1.5`.
/// Equal pairs give 1.0; an opponent 200 points stronger gives 1.35.
pub fn point_multiplier(own_pair_elo: f64, opponent_pair_elo: f64) -> f64 {
    let multiplier = 1.0 + 0.7 * (opponent_pair_elo - own_pair_elo) / 400.0;
    multiplier.clamp(0.5, 1.5)
}

/// Raw score times the multiplier, rounded to one decimal.
pub fn weighted_points(score: u32, own_pair_elo: f64, opponent_pair_elo: f64) -> f64 {
    let raw = f64::from(score) * point_multiplier(own_pair_elo, opponent_pair_elo);
    (raw * 10.0).round() / 10.0
}

/// A player going into a rating update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatedPlayer {
    pub id: PlayerId,
    pub rating: i32,
}

impl RatedPlayer {
    pub fn new(id: PlayerId, rating: i32) -> Self {
        Self { id, rating }
    }
}

/// New ratings for all four players after a decided match.
///
/// Each side's delta is `K * (actual - expected)` from the pair ratings; every player's new
/// rating is rounded on its own, so the total is conserved only up to rounding.
pub fn update_match_elo(
    pair_1: [RatedPlayer; 2],
    pair_2: [RatedPlayer; 2],
    pair_1_won: bool,
) -> HashMap<PlayerId, i32> {
    let pair_1_rating = pair_rating(pair_1[0].rating, pair_1[1].rating);
    let pair_2_rating = pair_rating(pair_2[0].rating, pair_2[1].rating);

    let pair_1_expected = expected_score(pair_1_rating, pair_2_rating);
    let pair_2_expected = 1.0 - pair_1_expected;

    let (pair_1_actual, pair_2_actual) = if pair_1_won { (1.0, 0.0) } else { (0.0, 1.0) };

    let mut ratings = HashMap::with_capacity(4);
    for p in pair_1 {
        ratings.insert(p.id, new_rating(p.rating, pair_1_expected, pair_1_actual));
    }
    for p in pair_2 {
        ratings.insert(p.id, new_rating(p.rating, pair_2_expected, pair_2_actual));
    }
    ratings
}
