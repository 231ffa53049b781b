//! Opponent selection: per-pair greedy, strongest pair picks first.

use crate::models::{Match, Pair, PairHistory};

/// Score for two pairs whose players have met `opposition_count` times in total.
pub fn opponent_score(opposition_count: u32, avg_skill_1: f64, avg_skill_2: f64) -> f64 {
    let variety = if opposition_count == 0 {
        2000.0
    } else {
        -300.0 * f64::from(opposition_count)
    };
    variety - 50.0 * (avg_skill_1 - avg_skill_2).abs()
}

/// Times any player of `a` has faced any player of `b` (four combinations).
pub fn opposition_count(a: &Pair, b: &Pair, opposition_history: &PairHistory) -> u32 {
    a.players
        .iter()
        .flat_map(|p1| b.players.iter().map(move |p2| opposition_history.count(*p1, *p2)))
        .sum()
}

/// Match pairs against each other for round `round_id`.
///
/// Pairs are sorted by descending `avg_skill`; each unmatched pair in turn takes its
/// best-scoring unmatched opponent further down the list. A pair left without an opponent
/// is dropped from the round.
pub fn match_pairs(pairs: &[Pair], opposition_history: &PairHistory, round_id: u32) -> Vec<Match> {
    let mut sorted: Vec<&Pair> = pairs.iter().collect();
    sorted.sort_by(|a, b| b.avg_skill.total_cmp(&a.avg_skill));

    let mut used = vec![false; sorted.len()];
    let mut matches = Vec::new();

    for i in 0..sorted.len() {
        if used[i] {
            continue;
        }
        let mut best: Option<usize> = None;
        let mut best_score = f64::NEG_INFINITY;

        for j in (i + 1)..sorted.len() {
            if used[j] {
                continue;
            }
            let count = opposition_count(sorted[i], sorted[j], opposition_history);
            let score = opponent_score(count, sorted[i].avg_skill, sorted[j].avg_skill);
            if score > best_score {
                best_score = score;
                best = Some(j);
            }
        }

        if let Some(j) = best {
            matches.push(Match::new(
                round_id,
                matches.len(),
                sorted[i].clone(),
                sorted[j].clone(),
            ));
            used[i] = true;
            used[j] = true;
        } else {
            log::debug!("Pair at position {} has no opponent in round {}", i, round_id);
        }
    }

    matches
}
