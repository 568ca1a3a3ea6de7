use chrono::{Datelike, TimeZone, Utc};
use travelmap_core::{Candidate, Place, PlaceType, PlaceValidationError};

fn candidate(place_id: u64, display_name: &str, class: &str, kind: &str) -> Candidate {
    Candidate {
        place_id,
        licence: "Data © OpenStreetMap contributors".to_string(),
        osm_type: "relation".to_string(),
        osm_id: 7,
        boundingbox: Vec::new(),
        lat: "26.9124336".to_string(),
        lon: "75.7872709".to_string(),
        display_name: display_name.to_string(),
        class: class.to_string(),
        kind: kind.to_string(),
        importance: 0.6,
        icon: None,
    }
}

#[test]
fn from_candidate_splits_display_name() {
    let added_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let source = candidate(12345, "Jaipur, Rajasthan, India", "place", "city");

    let place = Place::from_candidate(&source, Some(2020), added_at).unwrap();

    assert_eq!(place.id, "12345-1700000000000");
    assert_eq!(place.name, "Jaipur");
    assert_eq!(place.display_name, "Jaipur, Rajasthan, India");
    assert_eq!(place.country, "India");
    assert_eq!(place.kind, PlaceType::City);
    assert_eq!(place.year, Some(2020));
    assert_eq!(place.lat, 26.9124336);
    assert_eq!(place.lng, 75.7872709);
    assert_eq!(place.added_at, added_at);
}

#[test]
fn from_candidate_maps_classification() {
    let now = Utc::now();
    let cases = [
        ("boundary", "administrative", PlaceType::State),
        ("boundary", "national_park", PlaceType::State),
        ("place", "administrative", PlaceType::State),
        ("tourism", "attraction", PlaceType::Landmark),
        ("historic", "fort", PlaceType::Landmark),
        ("amenity", "restaurant", PlaceType::City),
        ("place", "village", PlaceType::City),
    ];

    for (class, kind, expected) in cases {
        let place = Place::from_candidate(&candidate(1, "X, India", class, kind), None, now).unwrap();
        assert_eq!(place.kind, expected, "class={class} type={kind}");
    }
}

#[test]
fn from_candidate_truncates_added_at_to_millis() {
    let precise = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let place = Place::from_candidate(&candidate(9, "Goa, India", "boundary", "administrative"), None, precise)
        .unwrap();

    assert_eq!(place.added_at.timestamp_subsec_nanos(), 123_000_000);
    assert_eq!(place.id, "9-1700000000123");
}

#[test]
fn from_candidate_rejects_bad_coordinates() {
    let mut source = candidate(1, "Nowhere, India", "place", "city");
    source.lat = "north".to_string();
    let err = Place::from_candidate(&source, None, Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        PlaceValidationError::UnparsableCoordinate { field: "lat", .. }
    ));

    source.lat = "12.0".to_string();
    source.lon = "181.5".to_string();
    let err = Place::from_candidate(&source, None, Utc::now()).unwrap_err();
    assert!(matches!(
        err,
        PlaceValidationError::CoordinateOutOfRange { field: "lng", .. }
    ));
}

#[test]
fn from_candidate_rejects_future_and_ancient_years() {
    let source = candidate(1, "Leh, Ladakh, India", "place", "town");
    let next_year = Utc::now().year() + 1;

    assert!(Place::from_candidate(&source, Some(next_year), Utc::now()).is_err());
    assert!(Place::from_candidate(&source, Some(1899), Utc::now()).is_err());
    assert!(Place::from_candidate(&source, Some(1900), Utc::now()).is_ok());
}

#[test]
fn year_bound_follows_added_at_not_wall_clock() {
    let source = candidate(1, "Leh, Ladakh, India", "place", "town");
    let added_at = Utc.with_ymd_and_hms(2015, 6, 1, 9, 30, 0).unwrap();

    assert_eq!(
        Place::from_candidate(&source, Some(2020), added_at).unwrap_err(),
        PlaceValidationError::YearOutOfRange {
            year: 2020,
            max: 2015
        }
    );
    let place = Place::from_candidate(&source, Some(2015), added_at).unwrap();
    assert_eq!(place.year, Some(2015));
}

#[test]
fn place_wire_shape_matches_stored_form() {
    let added_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let place = Place::from_candidate(
        &candidate(5, "Taj Mahal, Agra, Uttar Pradesh, India", "tourism", "attraction"),
        Some(2018),
        added_at,
    )
    .unwrap();

    let json = serde_json::to_value(&place).unwrap();
    assert_eq!(json["displayName"], "Taj Mahal, Agra, Uttar Pradesh, India");
    assert_eq!(json["type"], "landmark");
    assert_eq!(json["year"], 2018);
    assert_eq!(json["addedAt"], "2023-11-14T22:13:20.000Z");

    let decoded: Place = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, place);
}
