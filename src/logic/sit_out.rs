//! Sit-out selection when the active count is not a multiple of four.

use crate::models::{Player, SittingOut};

/// Pick `count` players to rest this round.
///
/// Fewest sit-outs first; among equals, whoever has played more rests. The sort is stable,
/// so remaining ties keep roster order.
pub fn select_sit_outs(players: &[Player], count: usize) -> Vec<Player> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| {
        a.sit_out_count
            .cmp(&b.sit_out_count)
            .then(b.matches_played.cmp(&a.matches_played))
    });
    sorted.into_iter().take(count).cloned().collect()
}

/// Split the active pool into players who play and the sitting-out record.
///
/// A remainder of 2 rests two players at once. Otherwise one rests, and the remainder is
/// re-evaluated on the smaller pool: if that leaves a remainder of 2, two more rest.
pub fn split_sit_outs(active: Vec<Player>) -> (Vec<Player>, Option<SittingOut>) {
    let mut playing = active;
    let mut resting: Vec<Player> = Vec::new();

    match playing.len() % 4 {
        0 => {}
        2 => rest(&mut playing, &mut resting, 2),
        _ => {
            rest(&mut playing, &mut resting, 1);
            if playing.len() % 4 == 2 {
                rest(&mut playing, &mut resting, 2);
            }
        }
    }

    (playing, sitting_out_record(&resting))
}

fn rest(playing: &mut Vec<Player>, resting: &mut Vec<Player>, count: usize) {
    let chosen = select_sit_outs(playing, count);
    playing.retain(|p| !chosen.iter().any(|c| c.id == p.id));
    resting.extend(chosen);
}

fn sitting_out_record(resting: &[Player]) -> Option<SittingOut> {
    match resting {
        [] => None,
        [single] => Some(SittingOut::Single {
            player: single.id,
            name: single.name.clone(),
        }),
        group => Some(SittingOut::Group {
            players: group.iter().map(|p| p.id).collect(),
            name: group
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}
