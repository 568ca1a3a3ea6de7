//! Geocoding entry points.
//!
//! # Responsibility
//! - Turn a free-text query into ranked candidate records.
//! - Hide transport failures from callers behind an empty result.
//!
//! # Invariants
//! - Results keep the service's relevance order; no client-side reordering.
//! - `GeocodingClient::search` never fails; "no match" and "request failed"
//!   look the same to the caller.

pub mod nominatim;

use crate::model::candidate::Candidate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Failure of a single outbound geocoding request.
#[derive(Debug)]
pub enum GeocodeError {
    /// HTTP client could not be constructed.
    Client(reqwest::Error),
    /// Connection, timeout or body read failure.
    Transport(reqwest::Error),
    /// Non-success HTTP status.
    Status(u16),
    /// Body is not a JSON array of candidate records.
    Decode(serde_json::Error),
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client(err) => write!(f, "failed to build geocoding client: {err}"),
            Self::Transport(err) => write!(f, "geocoding request failed: {err}"),
            Self::Status(code) => write!(f, "geocoding service returned status {code}"),
            Self::Decode(err) => write!(f, "invalid geocoding response: {err}"),
        }
    }
}

impl Error for GeocodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Client(err) | Self::Transport(err) => Some(err),
            Self::Status(_) => None,
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

/// Text-search service returning place candidates.
pub trait GeocodingClient {
    /// Returns up to the configured number of candidates for `query`.
    ///
    /// Returns an empty list on any failure.
    fn search(&self, query: &str) -> Vec<Candidate>;
}

impl<G: GeocodingClient + ?Sized> GeocodingClient for &G {
    fn search(&self, query: &str) -> Vec<Candidate> {
        (**self).search(query)
    }
}
