//! Round and the sitting-out record.

use crate::models::game::Match;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Who rests this round: one player, or several reported as one unit ("Alice, Bob").
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SittingOut {
    Single { player: PlayerId, name: String },
    Group { players: Vec<PlayerId>, name: String },
}

impl SittingOut {
    pub fn player_ids(&self) -> Vec<PlayerId> {
        match self {
            SittingOut::Single { player, .. } => vec![*player],
            SittingOut::Group { players, .. } => players.clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SittingOut::Single { name, .. } | SittingOut::Group { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: u32,
    pub matches: Vec<Match>,
    /// True iff the round has matches and every one of them is completed.
    pub completed: bool,
    pub sitting_out: Option<SittingOut>,
    /// Sit-out counts are credited once per round and never taken back.
    #[serde(default)]
    pub sit_out_recorded: bool,
}

impl Round {
    pub fn new(id: u32, matches: Vec<Match>, sitting_out: Option<SittingOut>) -> Self {
        Self {
            id,
            matches,
            completed: false,
            sitting_out,
            sit_out_recorded: false,
        }
    }

    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn find_match_mut(&mut self, match_id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    pub fn remove_match(&mut self, match_id: &str) -> Option<Match> {
        let idx = self.matches.iter().position(|m| m.id == match_id)?;
        Some(self.matches.remove(idx))
    }

    /// Recompute `completed` from the matches; an empty round is not completed.
    pub fn refresh_completed(&mut self) {
        self.completed = !self.matches.is_empty() && self.matches.iter().all(Match::is_completed);
    }
}
