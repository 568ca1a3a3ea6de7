//! Place domain model.
//!
//! # Responsibility
//! - Define the canonical visited-place record and its wire shape.
//! - Promote a selected `Candidate` into a `Place`.
//!
//! # Invariants
//! - `id` is `"{source place_id}-{addedAt epoch millis}"`.
//! - `kind` is derived once from the candidate classification.
//! - `year`, when present, lies in `[MIN_VISIT_YEAR, year of added_at]`.
//! - `added_at` carries millisecond precision so it survives the string form.

use crate::model::candidate::Candidate;
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Earliest accepted visit year.
pub const MIN_VISIT_YEAR: i32 = 1900;

/// Stable identifier of a place inside the collection.
pub type PlaceId = String;

/// Place category shown by the statistics and list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    City,
    /// Administrative region or boundary.
    State,
    /// Tourism or historic site.
    Landmark,
}

impl PlaceType {
    /// Maps the search-service `class`/`type` pair to a place category.
    ///
    /// - `administrative` type or `boundary` class -> `State`
    /// - `tourism` or `historic` class -> `Landmark`
    /// - anything else -> `City`
    pub fn from_classification(class: &str, kind: &str) -> Self {
        if kind == "administrative" || class == "boundary" {
            return Self::State;
        }
        if class == "tourism" || class == "historic" {
            return Self::Landmark;
        }
        Self::City
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::State => "state",
            Self::Landmark => "landmark",
        }
    }
}

impl Display for PlaceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Validation errors raised while promoting a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceValidationError {
    /// Coordinate text could not be parsed as a number.
    UnparsableCoordinate { field: &'static str, value: String },
    /// Parsed coordinate lies outside its valid range.
    CoordinateOutOfRange { field: &'static str, value: f64 },
    /// Visit year is before `MIN_VISIT_YEAR` or in the future.
    YearOutOfRange { year: i32, max: i32 },
}

impl Display for PlaceValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnparsableCoordinate { field, value } => {
                write!(f, "{field} `{value}` is not a number")
            }
            Self::CoordinateOutOfRange { field, value } => {
                write!(f, "{field} {value} is out of range")
            }
            Self::YearOutOfRange { year, max } => {
                write!(f, "year {year} must be within {MIN_VISIT_YEAR}..={max}")
            }
        }
    }
}

impl Error for PlaceValidationError {}

/// A single visited place.
///
/// Serialized with camelCase keys; `year` is omitted when absent and
/// `addedAt` is an RFC 3339 string with millisecond precision. Unknown keys
/// are carried in `extra` and written back after the known ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    /// Short label (first display-name segment).
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
    /// Trailing display-name segment. Counted as "states" by statistics.
    pub country: String,
    #[serde(rename = "type")]
    pub kind: PlaceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(with = "added_at_format")]
    pub added_at: DateTime<Utc>,
    /// Stored keys this version does not know, kept so saves do not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    /// Promotes a selected candidate into a place created at `added_at`.
    ///
    /// `added_at` is truncated to milliseconds before it is used for the id.
    ///
    /// # Errors
    /// - Coordinates that do not parse or fall outside the valid range.
    /// - A `year` outside `[MIN_VISIT_YEAR, added_at.year()]`.
    pub fn from_candidate(
        candidate: &Candidate,
        year: Option<i32>,
        added_at: DateTime<Utc>,
    ) -> Result<Self, PlaceValidationError> {
        let added_at = added_at.trunc_subsecs(3);
        let lat = parse_coordinate("lat", &candidate.lat, 90.0)?;
        let lng = parse_coordinate("lng", &candidate.lon, 180.0)?;
        if let Some(year) = year {
            validate_year(year, added_at.year())?;
        }

        Ok(Self {
            id: format!("{}-{}", candidate.place_id, added_at.timestamp_millis()),
            name: candidate.short_name().to_string(),
            display_name: candidate.display_name.clone(),
            lat,
            lng,
            country: candidate.trailing_region().to_string(),
            kind: PlaceType::from_classification(&candidate.class, &candidate.kind),
            year,
            added_at,
            extra: Map::new(),
        })
    }
}

/// Coerces free-form year input to an integer.
///
/// Blank input yields `None`. Leading digits are taken and the rest ignored,
/// so `"2023 trip"` yields `Some(2023)` and `"abc"` yields `None`.
pub fn parse_year(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed[..digits_end].parse().ok()
}

/// Checks that `year` lies in `[MIN_VISIT_YEAR, current_year]`.
pub fn validate_year(year: i32, current_year: i32) -> Result<(), PlaceValidationError> {
    if !(MIN_VISIT_YEAR..=current_year).contains(&year) {
        return Err(PlaceValidationError::YearOutOfRange {
            year,
            max: current_year,
        });
    }
    Ok(())
}

fn parse_coordinate(
    field: &'static str,
    value: &str,
    limit: f64,
) -> Result<f64, PlaceValidationError> {
    let parsed = value.trim().parse::<f64>().map_err(|_| {
        PlaceValidationError::UnparsableCoordinate {
            field,
            value: value.to_string(),
        }
    })?;
    if !parsed.is_finite() || parsed.abs() > limit {
        return Err(PlaceValidationError::CoordinateOutOfRange {
            field,
            value: parsed,
        });
    }
    Ok(parsed)
}

/// `addedAt` string codec: RFC 3339, milliseconds, `Z` suffix.
mod added_at_format {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_year, validate_year, PlaceType, PlaceValidationError};

    #[test]
    fn classification_prefers_state_over_landmark() {
        assert_eq!(
            PlaceType::from_classification("boundary", "administrative"),
            PlaceType::State
        );
        assert_eq!(
            PlaceType::from_classification("tourism", "administrative"),
            PlaceType::State
        );
        assert_eq!(
            PlaceType::from_classification("historic", "fort"),
            PlaceType::Landmark
        );
        assert_eq!(
            PlaceType::from_classification("place", "city"),
            PlaceType::City
        );
    }

    #[test]
    fn parse_year_coerces_leading_digits() {
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year(" 2023 trip"), Some(2023));
        assert_eq!(parse_year("abc"), None);
    }

    #[test]
    fn validate_year_enforces_bounds() {
        assert!(validate_year(1900, 2026).is_ok());
        assert!(validate_year(2026, 2026).is_ok());
        assert_eq!(
            validate_year(1899, 2026).unwrap_err(),
            PlaceValidationError::YearOutOfRange {
                year: 1899,
                max: 2026
            }
        );
        assert!(validate_year(2027, 2026).is_err());
    }
}
