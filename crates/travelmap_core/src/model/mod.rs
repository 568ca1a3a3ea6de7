//! Domain model for the travel log.
//!
//! # Responsibility
//! - Define the canonical `Place` record and its classification.
//! - Define the unconfirmed search `Candidate` shape returned by geocoding.
//!
//! # Invariants
//! - A `Place` is built only from a selected `Candidate`.
//! - A `Place` is never mutated after creation; removal is by `id` only.

pub mod candidate;
pub mod place;
