//! Geocoding candidate record.
//!
//! # Responsibility
//! - Mirror the search-service JSON record closely enough to decode it.
//! - Expose the display-label helpers used when promoting to a `Place`.

use serde::{Deserialize, Serialize};

/// Unconfirmed search result, not yet promoted to a `Place`.
///
/// Coordinates arrive as strings and are parsed only on promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub place_id: u64,
    #[serde(default)]
    pub licence: String,
    #[serde(default)]
    pub osm_type: String,
    #[serde(default)]
    pub osm_id: u64,
    #[serde(default)]
    pub boundingbox: Vec<String>,
    pub lat: String,
    pub lon: String,
    pub display_name: String,
    #[serde(default)]
    pub class: String,
    /// Serialized as `type` to match the service schema.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Candidate {
    /// First comma-delimited segment of the display name.
    pub fn short_name(&self) -> &str {
        self.display_name.split(',').next().unwrap_or_default()
    }

    /// Last comma-delimited segment of the display name, trimmed.
    ///
    /// For India-scoped searches this is the country itself, not the state.
    pub fn trailing_region(&self) -> &str {
        self.display_name
            .rsplit(',')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::Candidate;

    fn candidate(display_name: &str) -> Candidate {
        Candidate {
            place_id: 1,
            licence: String::new(),
            osm_type: "node".to_string(),
            osm_id: 2,
            boundingbox: Vec::new(),
            lat: "0".to_string(),
            lon: "0".to_string(),
            display_name: display_name.to_string(),
            class: "place".to_string(),
            kind: "city".to_string(),
            importance: 0.5,
            icon: None,
        }
    }

    #[test]
    fn splits_display_name_segments() {
        let item = candidate("Jaipur, Rajasthan, India");
        assert_eq!(item.short_name(), "Jaipur");
        assert_eq!(item.trailing_region(), "India");
    }

    #[test]
    fn single_segment_is_both_name_and_region() {
        let item = candidate("Goa");
        assert_eq!(item.short_name(), "Goa");
        assert_eq!(item.trailing_region(), "Goa");
    }

    #[test]
    fn decodes_service_record_with_missing_optional_fields() {
        let json = r#"{
            "place_id": 42,
            "lat": "26.9124",
            "lon": "75.7873",
            "display_name": "Jaipur, Rajasthan, India",
            "class": "boundary",
            "type": "administrative"
        }"#;
        let item: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(item.place_id, 42);
        assert_eq!(item.kind, "administrative");
        assert!(item.boundingbox.is_empty());
        assert_eq!(item.icon, None);
    }
}
