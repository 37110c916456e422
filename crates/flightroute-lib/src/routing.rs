//! Route building between two airports.
//!
//! [`find_best_route`] asks an [`AirwayLookup`] for candidate airways, wraps
//! each candidate with the departure and arrival airports and keeps the
//! shortest chain. When no candidate is available the route is a direct
//! great-circle leg.

use serde::Serialize;
use tracing::debug;

use crate::airports::Airport;
use crate::airways::{AirwayLookup, Waypoint};
use crate::geo::{route_distance_km, HasCoordinate};

/// Display name of a route without airway segments.
pub const DIRECT_ROUTE_NAME: &str = "Direct Route";

/// Route selected between two airports.
///
/// `waypoints` always starts at the departure airport and ends at the arrival
/// airport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub name: String,
    pub airway_id: Option<String>,
    pub waypoints: Vec<Waypoint>,
}

impl RouteResult {
    /// Two-point great-circle route.
    pub fn direct(from: &Airport, to: &Airport) -> Self {
        Self {
            name: DIRECT_ROUTE_NAME.to_string(),
            airway_id: None,
            waypoints: vec![from.to_waypoint(), to.to_waypoint()],
        }
    }

    pub fn is_direct(&self) -> bool {
        self.airway_id.is_none()
    }

    /// Human-readable route type.
    pub fn route_type(&self) -> &'static str {
        if self.is_direct() {
            DIRECT_ROUTE_NAME
        } else {
            "Via Airways"
        }
    }

    pub fn distance_km(&self) -> f64 {
        route_distance_km(&self.waypoints)
    }

    /// Waypoints between the two airports.
    pub fn enroute_waypoints(&self) -> &[Waypoint] {
        match self.waypoints.len() {
            0..=2 => &[],
            len => &self.waypoints[1..len - 1],
        }
    }

    /// Arrow-separated chain of waypoint names, e.g. `ATL → ODF → JFK`.
    pub fn waypoint_chain(&self) -> String {
        self.waypoints
            .iter()
            .map(|waypoint| waypoint.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Pick the shortest airway route between two airports, falling back to a
/// direct route when the lookup yields no usable candidate.
///
/// Ties keep the first candidate returned by the lookup.
pub fn find_best_route(lookup: &dyn AirwayLookup, from: &Airport, to: &Airport) -> RouteResult {
    let candidates = lookup.airways(from.coordinate(), to.coordinate());

    let mut best: Option<(f64, RouteResult)> = None;
    for candidate in candidates.into_iter().filter(|c| c.is_valid()) {
        let mut waypoints = Vec::with_capacity(candidate.waypoints.len() + 2);
        waypoints.push(from.to_waypoint());
        waypoints.extend(candidate.waypoints);
        waypoints.push(to.to_waypoint());

        let distance = route_distance_km(&waypoints);
        debug!(airway = %candidate.id, distance_km = distance, "evaluated airway candidate");

        let shorter = best
            .as_ref()
            .map_or(true, |(best_distance, _)| distance < *best_distance);
        if shorter {
            best = Some((
                distance,
                RouteResult {
                    name: candidate.name,
                    airway_id: Some(candidate.id),
                    waypoints,
                },
            ));
        }
    }

    match best {
        Some((_, route)) => route,
        None => {
            debug!(from = %from.code, to = %to.code, "no airway candidates; using direct route");
            RouteResult::direct(from, to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airways::{AirwayCandidate, NoAirways};
    use crate::geo::Coordinate;

    struct Fixed(Vec<AirwayCandidate>);

    impl AirwayLookup for Fixed {
        fn airways(&self, _from: Coordinate, _to: Coordinate) -> Vec<AirwayCandidate> {
            self.0.clone()
        }
    }

    fn airport(code: &str, lat: f64, lon: f64) -> Airport {
        Airport::new(code, None, code, Coordinate::new_unchecked(lat, lon))
    }

    #[test]
    fn no_candidates_gives_direct_route() {
        let from = airport("AAA", 0.0, 0.0);
        let to = airport("BBB", 0.0, 1.0);
        let route = find_best_route(&NoAirways, &from, &to);
        assert!(route.is_direct());
        assert_eq!(route.name, DIRECT_ROUTE_NAME);
        assert_eq!(route.waypoint_chain(), "AAA → BBB");
        assert!(route.enroute_waypoints().is_empty());
    }

    #[test]
    fn single_waypoint_candidates_are_ignored() {
        let from = airport("AAA", 0.0, 0.0);
        let to = airport("BBB", 0.0, 1.0);
        let lookup = Fixed(vec![AirwayCandidate::new(
            "J1",
            vec![Waypoint::new("X", Coordinate::new_unchecked(0.0, 0.5))],
        )]);
        assert!(find_best_route(&lookup, &from, &to).is_direct());
    }
}
