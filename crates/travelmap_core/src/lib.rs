//! Core domain logic for the travel map.
//! This crate is the single source of truth for place-store invariants.

pub mod config;
pub mod db;
pub mod debounce;
pub mod geocode;
pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod service;
pub mod stats;
pub mod store;

pub use config::{ConfigError, TravelMapConfig};
pub use debounce::{DebounceState, Debouncer, DEFAULT_DEBOUNCE_WINDOW};
pub use geocode::nominatim::NominatimClient;
pub use geocode::{GeocodeError, GeocodingClient};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::candidate::Candidate;
pub use model::place::{parse_year, Place, PlaceId, PlaceType, PlaceValidationError};
pub use persist::{PlacePersistence, PLACES_SLOT_KEY};
pub use repo::slot_repo::{MemorySlotStore, SlotError, SlotResult, SlotStore, SqliteSlotStore};
pub use service::search_session::{SearchOutcome, SearchSession, SearchTicket};
pub use service::travel_log::TravelLog;
pub use stats::{compute as compute_statistics, Statistics};
pub use store::{PlaceStore, StoreChange};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
