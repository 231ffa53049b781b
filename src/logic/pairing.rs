//! Partner selection: a greedy approximation of maximum-weight matching.
//!
//! Each step scans every unpaired `(i, j)` in O(n^2) and commits the single best-scoring
//! pair. The result is not guaranteed optimal. Variety dominates:
//! a first-time partnership is worth 2000 while skill balance costs 20 per rating point.

use crate::models::{Pair, PairHistory, Player, SkillMetric, TournamentError};
use rand::Rng;

/// Score for partnering two players who have been partners `partner_count` times before.
pub fn partner_variety_score(partner_count: u32) -> f64 {
    match partner_count {
        0 => 2000.0,
        1 => -500.0,
        2 => -1500.0,
        n => -2000.0 * f64::from(n - 1),
    }
}

pub fn pairing_score(partner_count: u32, skill_1: f64, skill_2: f64) -> f64 {
    partner_variety_score(partner_count) - 20.0 * (skill_1 - skill_2).abs()
}

/// Form pairs with the thread-local RNG. See [`generate_pairs_with_rng`].
pub fn generate_pairs(
    players: &[Player],
    partnership_history: &PairHistory,
    metric: SkillMetric,
) -> Result<Vec<Pair>, TournamentError> {
    generate_pairs_with_rng(players, partnership_history, metric, &mut rand::thread_rng())
}

/// Partition `players` into pairs. With an odd count, one player is left over.
///
/// Players are scanned strongest first; near-equal skills get a random nudge so the same
/// player is not always encountered first. Score ties go to the first pair found.
/// Fewer than two resulting pairs is [`TournamentError::InsufficientPlayers`].
pub fn generate_pairs_with_rng<R: Rng>(
    players: &[Player],
    partnership_history: &PairHistory,
    metric: SkillMetric,
    rng: &mut R,
) -> Result<Vec<Pair>, TournamentError> {
    let mut order: Vec<(&Player, f64)> = players
        .iter()
        .map(|p| (p, metric.skill(p) + rng.gen_range(0.0..metric.tie_epsilon())))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    let sorted: Vec<&Player> = order.into_iter().map(|(p, _)| p).collect();

    let mut used = vec![false; sorted.len()];
    let mut pairs = Vec::with_capacity(sorted.len() / 2);

    while used.iter().filter(|u| !**u).count() >= 2 {
        let mut best: Option<(usize, usize)> = None;
        let mut best_score = f64::NEG_INFINITY;

        for i in 0..sorted.len() {
            if used[i] {
                continue;
            }
            for j in (i + 1)..sorted.len() {
                if used[j] {
                    continue;
                }
                let (p1, p2) = (sorted[i], sorted[j]);
                let count = partnership_history.count(p1.id, p2.id);
                let score = pairing_score(count, metric.skill(p1), metric.skill(p2));
                if score > best_score {
                    best_score = score;
                    best = Some((i, j));
                }
            }
        }

        let Some((i, j)) = best else {
            break;
        };
        let (p1, p2) = (sorted[i], sorted[j]);
        log::debug!(
            "Paired {} & {} (score {:.0}, partnered {} times)",
            p1.name,
            p2.name,
            best_score,
            partnership_history.count(p1.id, p2.id)
        );
        let avg_skill = (metric.skill(p1) + metric.skill(p2)) / 2.0;
        pairs.push(Pair::new(p1.id, p2.id, avg_skill));
        used[i] = true;
        used[j] = true;
    }

    if pairs.len() < 2 {
        return Err(TournamentError::InsufficientPlayers {
            available: players.len(),
            required: 4,
        });
    }
    Ok(pairs)
}
