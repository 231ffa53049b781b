//! Versioned JSON snapshot of the whole tournament, for whatever stores it.
//!
//! A snapshot written by a different schema version is rejected instead of being read
//! with the wrong field meanings.

use crate::models::Tournament;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bump on any change to the serialized shape of [`Tournament`].
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Snapshot has no version field")]
    MissingVersion,
    #[error("Snapshot version {found} is not supported (expected {expected})")]
    IncompatibleVersion { found: u64, expected: u32 },
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    tournament: &'a Tournament,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    tournament: Tournament,
}

pub fn to_json(t: &Tournament) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&SnapshotRef {
        version: SNAPSHOT_VERSION,
        tournament: t,
    })?)
}

pub fn from_json(s: &str) -> Result<Tournament, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(s)?;
    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or(SnapshotError::MissingVersion)?;
    if version != u64::from(SNAPSHOT_VERSION) {
        return Err(SnapshotError::IncompatibleVersion {
            found: version,
            expected: SNAPSHOT_VERSION,
        });
    }
    let snapshot: SnapshotOwned = serde_json::from_value(value)?;
    Ok(snapshot.tournament)
}
