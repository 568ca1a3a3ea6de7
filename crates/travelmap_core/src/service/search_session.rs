//! Type-ahead search session.
//!
//! # Responsibility
//! - Debounce raw query input before it reaches the geocoding client.
//! - Gate queries below the minimum length.
//! - Hold the current suggestion list until a candidate is selected.
//!
//! # Invariants
//! - Each dispatched search carries a ticket; only the response for the most
//!   recently dispatched ticket is applied, older ones are discarded.
//! - A query below the minimum length clears suggestions without a request.

use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::geocode::GeocodingClient;
use crate::model::candidate::Candidate;
use log::debug;
use std::time::Instant;

/// Identifies one dispatched search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What happened when a debounced query fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was too short; suggestions were cleared.
    Skipped,
    /// Response was applied as the new suggestion list.
    Applied { results: usize },
    /// Response arrived for an outdated ticket and was dropped.
    Discarded,
}

pub struct SearchSession<G: GeocodingClient> {
    client: G,
    debouncer: Debouncer<String>,
    min_query_chars: usize,
    latest_ticket: u64,
    suggestions: Vec<Candidate>,
}

impl<G: GeocodingClient> SearchSession<G> {
    pub fn new(client: G, config: &SearchConfig) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(config.debounce_window()),
            min_query_chars: config.min_query_chars,
            latest_ticket: 0,
            suggestions: Vec::new(),
        }
    }

    /// Records a change of the query text at `now`.
    pub fn input(&mut self, query: impl Into<String>, now: Instant) {
        self.debouncer.call(query.into(), now);
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Runs the search if the debounce window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<SearchOutcome> {
        let query = self.debouncer.poll(now)?;
        Some(self.run(&query))
    }

    /// Blocks until the pending query is due, then runs it.
    pub fn wait(&mut self) -> Option<SearchOutcome> {
        let query = self.debouncer.wait()?;
        Some(self.run(&query))
    }

    /// Runs `query` immediately, bypassing the debounce window.
    pub fn run(&mut self, query: &str) -> SearchOutcome {
        if !self.accepts(query) {
            self.supersede_in_flight();
            self.suggestions.clear();
            return SearchOutcome::Skipped;
        }
        let ticket = self.dispatch();
        let results = self.client.search(query.trim());
        self.complete(ticket, results)
    }

    /// Whether `query` meets the minimum length.
    pub fn accepts(&self, query: &str) -> bool {
        query.trim().chars().count() >= self.min_query_chars
    }

    /// Issues a ticket for a new outbound request.
    pub fn dispatch(&mut self) -> SearchTicket {
        self.latest_ticket += 1;
        SearchTicket(self.latest_ticket)
    }

    /// Applies `results` when `ticket` is the latest dispatched one.
    pub fn complete(&mut self, ticket: SearchTicket, results: Vec<Candidate>) -> SearchOutcome {
        if ticket.0 < self.latest_ticket {
            debug!(
                "event=search_response module=service status=discarded ticket={} latest={}",
                ticket.0, self.latest_ticket
            );
            return SearchOutcome::Discarded;
        }
        let count = results.len();
        self.suggestions = results;
        SearchOutcome::Applied { results: count }
    }

    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    /// Takes the suggestion at `index` and resets the session.
    pub fn select(&mut self, index: usize) -> Option<Candidate> {
        if index >= self.suggestions.len() {
            return None;
        }
        let candidate = self.suggestions.swap_remove(index);
        self.reset();
        Some(candidate)
    }

    /// Drops pending input, current suggestions and any in-flight response.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.supersede_in_flight();
        self.suggestions.clear();
    }

    /// Outdates every ticket issued so far.
    fn supersede_in_flight(&mut self) {
        self.latest_ticket += 1;
    }
}
