//! Derived statistics over the place collection.
//!
//! # Responsibility
//! - Summarize a place snapshot into counts for the statistics view.
//!
//! # Invariants
//! - `compute` is pure, deterministic and single-pass over its input.
//! - `states` counts distinct `country` labels, not `PlaceType::State` entries.

use crate::model::place::{Place, PlaceType};
use serde::Serialize;
use std::collections::HashSet;

/// Summary counts recomputed after every store mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_places: usize,
    /// Number of distinct `country` labels.
    pub states: usize,
    pub cities: usize,
    pub landmarks: usize,
    /// Distinct `country` labels in first-seen order.
    pub unique_states: Vec<String>,
}

impl Statistics {
    /// One-line summary shown once at least one place exists.
    pub fn summary(&self) -> Option<String> {
        if self.total_places == 0 {
            return None;
        }
        Some(format!(
            "You've explored {} states and {} cities across India!",
            self.states, self.cities
        ))
    }
}

/// Computes statistics for `places` in one pass.
pub fn compute(places: &[Place]) -> Statistics {
    let mut seen: HashSet<&str> = HashSet::with_capacity(places.len());
    let mut stats = Statistics {
        total_places: places.len(),
        ..Statistics::default()
    };

    for place in places {
        match place.kind {
            PlaceType::City => stats.cities += 1,
            PlaceType::Landmark => stats.landmarks += 1,
            PlaceType::State => {}
        }
        if seen.insert(place.country.as_str()) {
            stats.unique_states.push(place.country.clone());
        }
    }

    stats.states = stats.unique_states.len();
    stats
}
