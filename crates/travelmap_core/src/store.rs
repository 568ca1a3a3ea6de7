//! In-memory authoritative place collection.
//!
//! # Responsibility
//! - Own the ordered place collection and its add/remove transitions.
//! - Hand out read-only snapshots to persistence, statistics and views.
//!
//! # Invariants
//! - Order is insertion order; there is no reordering operation.
//! - `remove` of an unknown id is a silent no-op.
//! - The store itself performs no I/O. Callers run persistence and
//!   statistics after every applied [`StoreChange`].

use crate::model::place::Place;

/// Mutation applied to the store, reported so callers can react.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Added { id: String },
    Removed { id: String, index: usize },
    Restored { count: usize },
    Unchanged,
}

impl StoreChange {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceStore {
    places: Vec<Place>,
}

impl PlaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `place` to the end of the collection. No dedup check.
    pub fn add(&mut self, place: Place) -> StoreChange {
        let id = place.id.clone();
        self.places.push(place);
        StoreChange::Added { id }
    }

    /// Removes the first place whose id equals `id`.
    pub fn remove(&mut self, id: &str) -> StoreChange {
        match self.places.iter().position(|place| place.id == id) {
            Some(index) => {
                self.places.remove(index);
                StoreChange::Removed {
                    id: id.to_string(),
                    index,
                }
            }
            None => StoreChange::Unchanged,
        }
    }

    /// Replaces the entire collection.
    pub fn restore(&mut self, places: Vec<Place>) -> StoreChange {
        self.places = places;
        StoreChange::Restored {
            count: self.places.len(),
        }
    }

    pub fn snapshot(&self) -> &[Place] {
        &self.places
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}
