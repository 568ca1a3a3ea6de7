use chrono::Utc;
use std::collections::HashSet;
use travelmap_core::{compute_statistics, Place, PlaceType, Statistics};

fn place(id: &str, country: &str, kind: PlaceType) -> Place {
    Place {
        id: id.to_string(),
        name: id.to_string(),
        display_name: format!("{id}, {country}"),
        lat: 10.0,
        lng: 77.0,
        country: country.to_string(),
        kind,
        year: None,
        added_at: Utc::now(),
        extra: Default::default(),
    }
}

#[test]
fn empty_collection_is_all_zero() {
    assert_eq!(
        compute_statistics(&[]),
        Statistics {
            total_places: 0,
            states: 0,
            cities: 0,
            landmarks: 0,
            unique_states: Vec::new(),
        }
    );
}

#[test]
fn counts_by_type_and_distinct_regions_in_first_seen_order() {
    let places = vec![
        place("a", "Kerala", PlaceType::City),
        place("b", "India", PlaceType::Landmark),
        place("c", "Kerala", PlaceType::State),
        place("d", "Goa", PlaceType::City),
        place("e", "India", PlaceType::City),
    ];

    let stats = compute_statistics(&places);

    assert_eq!(stats.total_places, 5);
    assert_eq!(stats.cities, 3);
    assert_eq!(stats.landmarks, 1);
    assert_eq!(stats.states, 3);
    assert_eq!(stats.unique_states, vec!["Kerala", "India", "Goa"]);
}

#[test]
fn states_counts_region_labels_not_state_entries() {
    let places = vec![
        place("rajasthan", "India", PlaceType::State),
        place("kerala", "India", PlaceType::State),
    ];

    let stats = compute_statistics(&places);
    assert_eq!(stats.states, 1);
    assert_eq!(stats.cities, 0);
    assert_eq!(stats.landmarks, 0);
}

#[test]
fn totals_match_length_and_distinct_count_for_generated_collections() {
    let regions = ["India", "Kerala", "Goa", "Assam"];
    let kinds = [PlaceType::City, PlaceType::State, PlaceType::Landmark];

    for size in 1..40usize {
        let places: Vec<Place> = (0..size)
            .map(|i| {
                place(
                    &format!("p{i}"),
                    regions[(i * 7 + size) % regions.len()],
                    kinds[(i * 5) % kinds.len()],
                )
            })
            .collect();

        let stats = compute_statistics(&places);
        let distinct: HashSet<&str> = places.iter().map(|p| p.country.as_str()).collect();

        assert_eq!(stats.total_places, places.len());
        assert_eq!(stats.states, distinct.len());
        assert_eq!(
            stats.cities + stats.landmarks
                + places.iter().filter(|p| p.kind == PlaceType::State).count(),
            places.len()
        );
    }
}
