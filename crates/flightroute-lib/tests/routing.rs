mod common;

use std::sync::Arc;

use common::{fixture_catalog, FailingSource, FixtureSource};
use flightroute_lib::{
    find_best_route, route_distance_km, Airport, AirwayCache, AirwayCandidate, AirwayClient,
    AirwayLookup, Coordinate, NoAirways, Waypoint, DIRECT_ROUTE_NAME,
};

struct FixedCandidates(Vec<AirwayCandidate>);

impl AirwayLookup for FixedCandidates {
    fn airways(&self, _from: Coordinate, _to: Coordinate) -> Vec<AirwayCandidate> {
        self.0.clone()
    }
}

fn airport(code: &str, lat: f64, lon: f64) -> Airport {
    Airport::new(code, None, code, Coordinate::new_unchecked(lat, lon))
}

fn waypoint(name: &str, lat: f64, lon: f64) -> Waypoint {
    Waypoint::new(name, Coordinate::new_unchecked(lat, lon))
}

#[test]
fn direct_route_when_no_candidates() {
    let catalog = fixture_catalog();
    let atl = catalog.get("ATL").expect("ATL");
    let jfk = catalog.get("JFK").expect("JFK");

    let route = find_best_route(&NoAirways, atl, jfk);
    assert_eq!(route.name, DIRECT_ROUTE_NAME);
    assert_eq!(route.route_type(), "Direct Route");
    assert!(route.airway_id.is_none());
    assert_eq!(route.waypoints.len(), 2);
    assert_eq!(route.waypoint_chain(), "ATL → JFK");
}

#[test]
fn adapter_failure_falls_back_to_direct() {
    let catalog = fixture_catalog();
    let atl = catalog.get("ATL").expect("ATL");
    let jfk = catalog.get("JFK").expect("JFK");

    let client = AirwayClient::new(FailingSource::default(), Arc::new(AirwayCache::default()));
    let route = find_best_route(&client, atl, jfk);
    assert!(route.is_direct());
}

#[test]
fn picks_shorter_of_two_candidates() {
    let from = airport("AAA", 0.0, 0.0);
    let to = airport("BBB", 0.0, 4.0);
    // Roughly 537 km via the northern dogleg, 445 km along the equator.
    let dogleg = AirwayCandidate::new(
        "A1",
        vec![waypoint("N1", 1.0, 1.0), waypoint("N2", 1.0, 3.0)],
    );
    let straight = AirwayCandidate::new(
        "B2",
        vec![waypoint("E1", 0.0, 1.0), waypoint("E2", 0.0, 3.0)],
    );

    let route = find_best_route(&FixedCandidates(vec![dogleg, straight]), &from, &to);
    assert_eq!(route.airway_id.as_deref(), Some("B2"));
    assert_eq!(route.name, "Airway B2");
    assert_eq!(route.waypoint_chain(), "AAA → E1 → E2 → BBB");
    assert!((route.distance_km() - 444.8).abs() < 1.0);
}

#[test]
fn ties_keep_first_candidate() {
    let from = airport("AAA", 0.0, 0.0);
    let to = airport("BBB", 0.0, 2.0);
    let segment = vec![waypoint("X", 0.0, 0.5), waypoint("Y", 0.0, 1.5)];
    let first = AirwayCandidate::new("FIRST", segment.clone());
    let second = AirwayCandidate::new("SECOND", segment);

    let route = find_best_route(&FixedCandidates(vec![first, second]), &from, &to);
    assert_eq!(route.airway_id.as_deref(), Some("FIRST"));
}

#[test]
fn fixture_airways_choose_j14() {
    let catalog = fixture_catalog();
    let atl = catalog.get("ATL").expect("ATL");
    let jfk = catalog.get("JFK").expect("JFK");

    let client = AirwayClient::new(FixtureSource::from_fixture(), Arc::new(AirwayCache::default()));
    let route = find_best_route(&client, atl, jfk);

    assert_eq!(route.airway_id.as_deref(), Some("J14"));
    assert_eq!(route.route_type(), "Via Airways");
    assert_eq!(
        route.waypoint_chain(),
        "ATL → FOOTHILLS → GREENSBORO → RICHMOND → JFK"
    );
    assert_eq!(route.enroute_waypoints().len(), 3);
    assert_eq!(route.waypoints.first().map(|w| w.name.as_str()), Some("ATL"));
    assert_eq!(route.waypoints.last().map(|w| w.name.as_str()), Some("JFK"));
    assert!((route.distance_km() - route_distance_km(&route.waypoints)).abs() < 1e-9);
    assert!((route.distance_km() - 1244.2).abs() < 1.0);
}
