//! Data structures for the doubles tournament: players, pairs, matches, rounds, history, settings.

mod game;
mod history;
mod player;
mod round;
mod settings;
mod tournament;

pub use game::{
    FinalsMatch, Match, MatchId, MatchStatus, Pair, ServerPosition, Side, WeightedPoints,
};
pub use history::PairHistory;
pub use player::{
    Player, PlayerId, PlayerStats, DEFAULT_RATING, MAX_STARTING_RATING, MIN_STARTING_RATING,
};
pub use round::{Round, SittingOut};
pub use settings::{LeaderboardMode, SkillMetric, TournamentSettings};
pub use tournament::{Tournament, TournamentError, TournamentId};
