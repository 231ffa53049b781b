//! CSV roster import: one player per record, `name[,starting_rating]`.

use crate::models::{PlayerId, Tournament, TournamentError};
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Could not read roster: {0}")]
    Csv(#[from] csv::Error),
    #[error("Line {line}: rating {value:?} is not a number")]
    InvalidRating { line: u64, value: String },
    #[error("Line {line}: {source}")]
    Tournament {
        line: u64,
        #[source]
        source: TournamentError,
    },
}

/// A parsed roster line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterEntry {
    pub line: u64,
    pub name: String,
    pub rating: Option<i32>,
}

/// Parse a headerless roster. Blank names are skipped.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let rating = match record.get(1) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<i32>().map_err(|_| RosterError::InvalidRating {
                line,
                value: value.to_string(),
            })?),
        };
        entries.push(RosterEntry {
            line,
            name: name.to_string(),
            rating,
        });
    }
    Ok(entries)
}

/// Parse a roster and add every player. All-or-nothing: on any error `t` is unchanged.
pub fn import_roster<R: Read>(
    t: &Tournament,
    reader: R,
) -> Result<(Tournament, Vec<PlayerId>), RosterError> {
    let entries = parse_roster(reader)?;
    let mut next = t.clone();
    let mut added = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = next
            .add_player(entry.name, entry.rating)
            .map_err(|source| RosterError::Tournament {
                line: entry.line,
                source,
            })?;
        added.push(id);
    }
    log::info!("Imported {} player(s) into tournament {}", added.len(), t.id);
    Ok((next, added))
}
