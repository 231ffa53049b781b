//! Tournament business logic: sit-outs, pairing, opponents, ratings, match ledger,
//! leaderboard and finals.

mod finals;
mod leaderboard;
mod ledger;
mod matching;
mod pairing;
pub mod rating;
mod round;
mod scoring;
mod setup;
mod sit_out;

pub use finals::{complete_finals, initiate_finals, update_finals_score};
pub use leaderboard::{head_to_head, opponent_quality, rank_leaderboard, HeadToHead};
pub use ledger::{
    cancel_edit, complete_match, delete_match, delete_round, reverse_match, save_edit, update_score,
};
pub use matching::{match_pairs, opponent_score, opposition_count};
pub use pairing::{generate_pairs, generate_pairs_with_rng, pairing_score, partner_variety_score};
pub use rating::{point_multiplier, update_match_elo, weighted_points, RatedPlayer};
pub use round::{generate_next_round, generate_next_round_with_rng};
pub use scoring::{check_match_winner, match_duration, next_server};
pub use setup::{reset_tournament, start_tournament, start_tournament_with_rng};
pub use sit_out::{select_sit_outs, split_sit_outs};
