//! Nominatim-backed geocoding client.
//!
//! # Responsibility
//! - Build the country-restricted search request.
//! - Decode the JSON array response into `Candidate` records.
//!
//! # Invariants
//! - Exactly one blocking GET per `search` call; no retries.
//! - Query text is never logged, only its length.

use super::{GeocodeError, GeocodeResult, GeocodingClient};
use crate::config::GeocodingConfig;
use crate::model::candidate::Candidate;
use log::{debug, warn};
use reqwest::blocking::Client;
use std::time::Instant;

pub struct NominatimClient {
    http: Client,
    config: GeocodingConfig,
}

impl NominatimClient {
    /// Builds a client with the configured timeout and user agent.
    pub fn new(config: GeocodingConfig) -> GeocodeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(GeocodeError::Client)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeocodingConfig {
        &self.config
    }

    /// Runs one search and surfaces the failure reason.
    pub fn try_search(&self, query: &str) -> GeocodeResult<Vec<Candidate>> {
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&query_params(&self.config, query))
            .send()
            .map_err(GeocodeError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().map_err(GeocodeError::Transport)?;
        parse_candidates(&body, self.config.limit)
    }
}

impl GeocodingClient for NominatimClient {
    fn search(&self, query: &str) -> Vec<Candidate> {
        let started_at = Instant::now();
        match self.try_search(query) {
            Ok(candidates) => {
                debug!(
                    "event=geocode_search module=geocode status=ok query_len={} results={} duration_ms={}",
                    query.chars().count(),
                    candidates.len(),
                    started_at.elapsed().as_millis()
                );
                candidates
            }
            Err(err) => {
                warn!(
                    "event=geocode_search module=geocode status=error query_len={} duration_ms={} error={}",
                    query.chars().count(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Vec::new()
            }
        }
    }
}

/// Request parameters for one country-restricted search.
pub fn query_params(config: &GeocodingConfig, query: &str) -> Vec<(&'static str, String)> {
    vec![
        ("q", format!("{}, {}", query.trim(), config.country_name)),
        ("format", "json".to_string()),
        ("limit", config.limit.to_string()),
        ("addressdetails", "1".to_string()),
        ("extratags", "1".to_string()),
        ("namedetails", "1".to_string()),
        ("countrycodes", config.country_code.clone()),
    ]
}

/// Decodes a response body, keeping at most `limit` records in order.
pub fn parse_candidates(body: &str, limit: u32) -> GeocodeResult<Vec<Candidate>> {
    let mut candidates: Vec<Candidate> = serde_json::from_str(body)?;
    candidates.truncate(limit as usize);
    Ok(candidates)
}
