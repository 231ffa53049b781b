//! Symmetric pair counters: how often two players partnered (or opposed) each other.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `player -> other -> count`, kept symmetric: `count(a, b) == count(b, a)`.
///
/// Zero counts are never stored, so applying and then releasing the same pair
/// gives back an equal map.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairHistory(HashMap<PlayerId, HashMap<PlayerId, u32>>);

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.0
            .get(&a)
            .and_then(|inner| inner.get(&b))
            .copied()
            .unwrap_or(0)
    }

    /// Increment both directions of `(a, b)`.
    pub fn record(&mut self, a: PlayerId, b: PlayerId) {
        *self.0.entry(a).or_default().entry(b).or_insert(0) += 1;
        *self.0.entry(b).or_default().entry(a).or_insert(0) += 1;
    }

    /// Decrement both directions of `(a, b)`, floored at zero.
    pub fn release(&mut self, a: PlayerId, b: PlayerId) {
        self.decrement(a, b);
        self.decrement(b, a);
    }

    fn decrement(&mut self, from: PlayerId, to: PlayerId) {
        let Some(inner) = self.0.get_mut(&from) else {
            return;
        };
        if let Some(count) = inner.get_mut(&to) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                inner.remove(&to);
            }
        }
        if inner.is_empty() {
            self.0.remove(&from);
        }
    }

    pub fn is_symmetric(&self) -> bool {
        self.0
            .iter()
            .all(|(a, inner)| inner.iter().all(|(b, c)| self.count(*b, *a) == *c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
