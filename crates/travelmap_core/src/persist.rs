//! Best-effort persistence of the place collection.
//!
//! # Responsibility
//! - Serialize the full place collection into one named slot.
//! - Restore the collection from that slot at startup.
//!
//! # Invariants
//! - `save` and `load` never return errors; faults are logged and swallowed.
//! - An absent, unreadable or malformed slot loads as an empty collection.
//! - `save(load())` reproduces the stored bytes of a previous `save`.
//! - Keys a place record carries beyond the known fields are written back.

use crate::model::place::Place;
use crate::repo::slot_repo::SlotStore;
use log::{debug, error, warn};

/// Slot name holding the serialized place collection.
pub const PLACES_SLOT_KEY: &str = "travel-map-places";

/// Persistence adapter writing whole snapshots to a [`SlotStore`].
pub struct PlacePersistence<S: SlotStore> {
    slots: S,
    key: String,
}

impl<S: SlotStore> PlacePersistence<S> {
    /// Creates an adapter using the default [`PLACES_SLOT_KEY`].
    pub fn new(slots: S) -> Self {
        Self::with_key(slots, PLACES_SLOT_KEY)
    }

    pub fn with_key(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Writes `places` to the slot, replacing its previous contents.
    ///
    /// Failures are logged; the in-memory collection stays authoritative.
    pub fn save(&self, places: &[Place]) {
        let encoded = match encode_places(places) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=places_save module=persist status=error error_code=encode_failed count={} error={}",
                    places.len(),
                    err
                );
                return;
            }
        };

        match self.slots.write_slot(&self.key, &encoded) {
            Ok(()) => debug!(
                "event=places_save module=persist status=ok count={} bytes={}",
                places.len(),
                encoded.len()
            ),
            Err(err) => error!(
                "event=places_save module=persist status=error error_code=write_failed count={} error={}",
                places.len(),
                err
            ),
        }
    }

    /// Reads the slot back into a collection.
    ///
    /// Returns an empty collection when the slot is absent or unusable.
    pub fn load(&self) -> Vec<Place> {
        let stored = match self.slots.read_slot(&self.key) {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("event=places_load module=persist status=ok count=0 reason=absent");
                return Vec::new();
            }
            Err(err) => {
                error!(
                    "event=places_load module=persist status=error error_code=read_failed error={err}"
                );
                return Vec::new();
            }
        };

        if stored.trim().is_empty() {
            debug!("event=places_load module=persist status=ok count=0 reason=blank");
            return Vec::new();
        }

        match decode_places(&stored) {
            Ok(places) => {
                debug!(
                    "event=places_load module=persist status=ok count={}",
                    places.len()
                );
                places
            }
            Err(err) => {
                warn!(
                    "event=places_load module=persist status=error error_code=decode_failed bytes={} error={}",
                    stored.len(),
                    err
                );
                Vec::new()
            }
        }
    }
}

/// Encodes places to their stored JSON array form.
pub fn encode_places(places: &[Place]) -> serde_json::Result<String> {
    serde_json::to_string(places)
}

/// Decodes the stored JSON array form, including `addedAt` timestamps.
pub fn decode_places(stored: &str) -> serde_json::Result<Vec<Place>> {
    serde_json::from_str(stored)
}

#[cfg(test)]
mod tests {
    use super::{decode_places, encode_places, PlacePersistence};
    use crate::model::place::{Place, PlaceType};
    use crate::repo::slot_repo::{MemorySlotStore, SlotStore};
    use chrono::{TimeZone, Utc};

    fn place() -> Place {
        Place {
            id: "101-1700000000123".to_string(),
            name: "Hampi".to_string(),
            display_name: "Hampi, Vijayanagara, Karnataka, India".to_string(),
            lat: 15.335,
            lng: 76.46,
            country: "India".to_string(),
            kind: PlaceType::Landmark,
            year: None,
            added_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            extra: Default::default(),
        }
    }

    #[test]
    fn stored_form_uses_camel_case_and_omits_missing_year() {
        let encoded = encode_places(&[place()]).unwrap();
        assert_eq!(
            encoded,
            r#"[{"id":"101-1700000000123","name":"Hampi","displayName":"Hampi, Vijayanagara, Karnataka, India","lat":15.335,"lng":76.46,"country":"India","type":"landmark","addedAt":"2023-11-14T22:13:20.123Z"}]"#
        );
    }

    #[test]
    fn decode_accepts_offset_timestamps() {
        let stored = r#"[{"id":"1-1","name":"Agra","displayName":"Agra, Uttar Pradesh, India","lat":27.17,"lng":78.0,"country":"India","type":"city","year":2019,"addedAt":"2023-11-15T03:43:20.123+05:30"}]"#;
        let places = decode_places(stored).unwrap();
        assert_eq!(places[0].year, Some(2019));
        assert_eq!(
            places[0].added_at,
            Utc.timestamp_millis_opt(1_700_000_000_123).unwrap()
        );
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let slots = MemorySlotStore::new();
        slots.write_slot(super::PLACES_SLOT_KEY, "{not json").unwrap();
        let persistence = PlacePersistence::new(&slots);
        assert!(persistence.load().is_empty());

        slots
            .write_slot(super::PLACES_SLOT_KEY, r#"[{"id":"x","type":"volcano"}]"#)
            .unwrap();
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn save_then_load_roundtrips_bytes() {
        let slots = MemorySlotStore::new();
        let persistence = PlacePersistence::with_key(&slots, "custom-slot");
        persistence.save(&[place()]);
        let first = slots.read_slot("custom-slot").unwrap().unwrap();

        persistence.save(&persistence.load());
        let second = slots.read_slot("custom-slot").unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(persistence.load(), vec![place()]);
    }

    #[test]
    fn unknown_keys_survive_load_then_save() {
        let slots = MemorySlotStore::new();
        slots
            .write_slot(
                super::PLACES_SLOT_KEY,
                r#"[{"id":"1-1","name":"Agra","displayName":"Agra, Uttar Pradesh, India","lat":27.17,"lng":78.0,"country":"India","type":"city","addedAt":"2023-11-14T22:13:20.123Z","note":"sunrise at the Taj"}]"#,
            )
            .unwrap();
        let persistence = PlacePersistence::new(&slots);

        let places = persistence.load();
        assert_eq!(places[0].extra["note"], "sunrise at the Taj");

        persistence.save(&places);
        let stored = slots.read_slot(super::PLACES_SLOT_KEY).unwrap().unwrap();
        assert!(stored.ends_with(
            r#""addedAt":"2023-11-14T22:13:20.123Z","note":"sunrise at the Taj"}]"#
        ));
    }
}
