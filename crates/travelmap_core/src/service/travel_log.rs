//! Travel log use-case service.
//!
//! # Responsibility
//! - Own the place store together with its persistence adapter.
//! - Keep statistics in step with every mutation.
//!
//! # Invariants
//! - Every `add`/`remove`/`clear` persists the full snapshot, then recomputes
//!   statistics, in that order.
//! - Place ids stay unique: creation stamps are strictly increasing per log.

use crate::model::candidate::Candidate;
use crate::model::place::{Place, PlaceValidationError};
use crate::persist::PlacePersistence;
use crate::repo::slot_repo::SlotStore;
use crate::stats::{compute, Statistics};
use crate::store::{PlaceStore, StoreChange};
use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};

/// Use-case service wrapping store, persistence and statistics.
pub struct TravelLog<S: SlotStore> {
    store: PlaceStore,
    persistence: PlacePersistence<S>,
    statistics: Statistics,
    last_stamp_ms: i64,
}

impl<S: SlotStore> TravelLog<S> {
    /// Restores the persisted collection and computes its statistics.
    ///
    /// A missing or unreadable slot starts the log empty.
    pub fn open(persistence: PlacePersistence<S>) -> Self {
        let mut store = PlaceStore::new();
        store.restore(persistence.load());
        let last_stamp_ms = store
            .snapshot()
            .iter()
            .map(|place| place.added_at.timestamp_millis())
            .max()
            .unwrap_or(i64::MIN);
        let statistics = compute(store.snapshot());

        info!(
            "event=travel_log_open module=service status=ok places={} regions={}",
            statistics.total_places, statistics.states
        );

        Self {
            store,
            persistence,
            statistics,
            last_stamp_ms,
        }
    }

    pub fn places(&self) -> &[Place] {
        self.store.snapshot()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn get(&self, id: &str) -> Option<&Place> {
        self.store.get(id)
    }

    pub fn persistence(&self) -> &PlacePersistence<S> {
        &self.persistence
    }

    /// Appends an already-built place.
    pub fn add(&mut self, place: Place) -> StoreChange {
        let stamp = place.added_at.timestamp_millis();
        self.last_stamp_ms = self.last_stamp_ms.max(stamp);
        let change = self.store.add(place);
        self.after_change(&change);
        change
    }

    /// Promotes `candidate` to a place created now and appends it.
    pub fn add_candidate(
        &mut self,
        candidate: &Candidate,
        year: Option<i32>,
    ) -> Result<Place, PlaceValidationError> {
        self.add_candidate_at(candidate, year, Utc::now())
    }

    /// Same as [`TravelLog::add_candidate`] with an explicit clock reading.
    ///
    /// When `now` does not advance past the previous creation stamp, the
    /// stamp is bumped by one millisecond so ids never collide.
    pub fn add_candidate_at(
        &mut self,
        candidate: &Candidate,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> Result<Place, PlaceValidationError> {
        let added_at = self.next_stamp(now);
        let place = Place::from_candidate(candidate, year, added_at).inspect_err(|err| {
            warn!("event=place_add module=service status=error error_code=invalid_candidate error={err}");
        })?;
        self.add(place.clone());
        Ok(place)
    }

    /// Removes the place with `id`. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &str) -> StoreChange {
        let change = self.store.remove(id);
        self.after_change(&change);
        change
    }

    /// Removes every place and persists the empty collection.
    pub fn clear(&mut self) -> usize {
        let removed = self.store.len();
        let change = self.store.restore(Vec::new());
        self.after_change(&change);
        removed
    }

    fn next_stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let now_ms = now.timestamp_millis();
        let stamp_ms = if now_ms > self.last_stamp_ms {
            now_ms
        } else {
            self.last_stamp_ms.saturating_add(1)
        };
        self.last_stamp_ms = stamp_ms;
        Utc.timestamp_millis_opt(stamp_ms).single().unwrap_or(now)
    }

    fn after_change(&mut self, change: &StoreChange) {
        self.persistence.save(self.store.snapshot());
        self.statistics = compute(self.store.snapshot());

        let kind = match change {
            StoreChange::Added { .. } => "add",
            StoreChange::Removed { .. } => "remove",
            StoreChange::Restored { .. } => "restore",
            StoreChange::Unchanged => "noop",
        };
        info!(
            "event=places_changed module=service status=ok change={} places={} cities={} landmarks={}",
            kind, self.statistics.total_places, self.statistics.cities, self.statistics.landmarks
        );
    }
}
