//! Padel Indiano tournament web app: library with models and the matchmaking / rating engine.

pub mod logic;
pub mod models;
pub mod roster;
pub mod snapshot;

pub use logic::{
    cancel_edit, check_match_winner, complete_finals, complete_match, delete_match, delete_round,
    generate_next_round, generate_next_round_with_rng, generate_pairs, generate_pairs_with_rng,
    head_to_head, initiate_finals, match_duration, match_pairs, next_server, opponent_quality,
    point_multiplier, rank_leaderboard, reset_tournament, reverse_match, save_edit,
    select_sit_outs, split_sit_outs, start_tournament, start_tournament_with_rng,
    update_finals_score, update_match_elo, update_score, weighted_points, HeadToHead, RatedPlayer,
};
pub use models::{
    FinalsMatch, LeaderboardMode, Match, MatchId, MatchStatus, Pair, PairHistory, Player,
    PlayerId, PlayerStats, Round, ServerPosition, Side, SittingOut, SkillMetric, Tournament,
    TournamentError, TournamentId, TournamentSettings, DEFAULT_RATING,
};
