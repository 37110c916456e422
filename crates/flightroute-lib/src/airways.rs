//! Airway candidate lookup.
//!
//! [`AirwayClient`] turns a pair of coordinates into named airway candidates:
//! it scopes a navaid query to the leg's bounding box, consults the shared
//! [`AirwayCache`], groups navaids by the airways they sit on, and orders each
//! group by distance from the origin. Lookup failures never escape; they are
//! logged and reported as "no candidates" so routing can fall back to a direct
//! leg.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{AirwayCache, BoxKey};
use crate::geo::{distance_km, BoundingBox, Coordinate, HasCoordinate};
use crate::openaip::{Navaid, NavaidSource};

/// Maximum detour ratio used by the deviation filter.
pub const DEFAULT_MAX_DETOUR: f64 = 0.30;

/// Point along a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airway: Option<String>,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            kind: None,
            airway: None,
        }
    }

    fn from_navaid(navaid: &Navaid, airway: &str) -> Self {
        Self {
            name: navaid.display_name().to_string(),
            coordinate: navaid.coordinate,
            kind: navaid.kind.clone(),
            airway: Some(airway.to_string()),
        }
    }
}

impl HasCoordinate for Waypoint {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// Published airway segment usable between two airports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirwayCandidate {
    pub id: String,
    pub name: String,
    pub waypoints: Vec<Waypoint>,
}

impl AirwayCandidate {
    pub fn new(id: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        let id = id.into();
        Self {
            name: format!("Airway {id}"),
            id,
            waypoints,
        }
    }

    /// Candidates need at least two waypoints to describe a segment.
    pub fn is_valid(&self) -> bool {
        self.waypoints.len() >= 2
    }
}

/// Provider of airway candidates for a leg.
///
/// Implementations must not fail: unavailable data is an empty list.
pub trait AirwayLookup {
    fn airways(&self, from: Coordinate, to: Coordinate) -> Vec<AirwayCandidate>;
}

/// Lookup that never returns candidates, producing direct routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAirways;

impl AirwayLookup for NoAirways {
    fn airways(&self, _from: Coordinate, _to: Coordinate) -> Vec<AirwayCandidate> {
        Vec::new()
    }
}

impl<T: AirwayLookup + ?Sized> AirwayLookup for Box<T> {
    fn airways(&self, from: Coordinate, to: Coordinate) -> Vec<AirwayCandidate> {
        (**self).airways(from, to)
    }
}

/// Airway lookup backed by a [`NavaidSource`] and a shared cache.
#[derive(Debug)]
pub struct AirwayClient<S> {
    source: S,
    cache: Arc<AirwayCache>,
    max_detour: Option<f64>,
}

impl<S: NavaidSource> AirwayClient<S> {
    pub fn new(source: S, cache: Arc<AirwayCache>) -> Self {
        Self {
            source,
            cache,
            max_detour: None,
        }
    }

    /// Drop waypoints whose via-distance exceeds the direct distance by more
    /// than `ratio` (0.30 keeps detours up to 30%).
    pub fn with_max_detour(mut self, ratio: f64) -> Self {
        self.max_detour = Some(ratio);
        self
    }

    pub fn cache(&self) -> &Arc<AirwayCache> {
        &self.cache
    }

    fn navaids_for(&self, key: BoxKey) -> Option<Arc<Vec<Navaid>>> {
        if let Some(cached) = self.cache.get(&key) {
            debug!(?key, count = cached.len(), "navaid cache hit");
            return Some(cached);
        }

        let bbox = key.to_bbox();
        match self.source.fetch_navaids(&bbox) {
            Ok(navaids) if navaids.is_empty() => {
                info!(bbox = %bbox.to_query(), "no navaids returned for leg");
                None
            }
            Ok(navaids) => {
                debug!(bbox = %bbox.to_query(), count = navaids.len(), "fetched navaids");
                Some(self.cache.insert(key, navaids))
            }
            Err(err) => {
                warn!(
                    error = %err,
                    bbox = %bbox.to_query(),
                    "navaid lookup failed; continuing without airways"
                );
                None
            }
        }
    }
}

impl<S: NavaidSource> AirwayLookup for AirwayClient<S> {
    fn airways(&self, from: Coordinate, to: Coordinate) -> Vec<AirwayCandidate> {
        let key = BoxKey::from_bbox(&BoundingBox::for_leg(from, to));
        let Some(navaids) = self.navaids_for(key) else {
            return Vec::new();
        };

        let candidates = match self.max_detour {
            Some(ratio) => {
                let filtered: Vec<Navaid> = navaids
                    .iter()
                    .filter(|navaid| within_detour(from, to, navaid.coordinate, ratio))
                    .cloned()
                    .collect();
                group_into_airways(&filtered, from)
            }
            None => group_into_airways(&navaids, from),
        };
        debug!(count = candidates.len(), "airway candidates built");
        candidates
    }
}

/// Group navaids by airway membership.
///
/// Each navaid contributes one waypoint per airway it lists. Groups with fewer
/// than two waypoints are dropped, and every group is ordered by distance from
/// `origin`. That ordering is a proximity heuristic and does not follow the
/// published sequence of the airway.
pub fn group_into_airways(navaids: &[Navaid], origin: Coordinate) -> Vec<AirwayCandidate> {
    let mut groups: BTreeMap<&str, Vec<Waypoint>> = BTreeMap::new();
    for navaid in navaids {
        let mut seen = BTreeSet::new();
        for airway in &navaid.airways {
            if !seen.insert(airway.as_str()) {
                continue;
            }
            groups
                .entry(airway.as_str())
                .or_default()
                .push(Waypoint::from_navaid(navaid, airway));
        }
    }

    groups
        .into_iter()
        .filter(|(_, waypoints)| waypoints.len() >= 2)
        .map(|(id, mut waypoints)| {
            waypoints.sort_by(|a, b| {
                distance_km(origin, a.coordinate).total_cmp(&distance_km(origin, b.coordinate))
            });
            AirwayCandidate::new(id, waypoints)
        })
        .collect()
}

/// Whether going `from -> point -> to` stays within `ratio` extra distance
/// over the direct leg.
pub fn within_detour(from: Coordinate, to: Coordinate, point: Coordinate, ratio: f64) -> bool {
    let direct = distance_km(from, to);
    let via = distance_km(from, point) + distance_km(point, to);
    via <= direct * (1.0 + ratio)
}
