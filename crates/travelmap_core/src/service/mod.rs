//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, persistence, statistics and search into use cases.
//! - Keep front ends decoupled from storage and transport details.

pub mod search_session;
pub mod travel_log;
