//! Great-circle geometry helpers.
//!
//! Distances are computed with the Haversine formula on a spherical Earth of
//! radius [`EARTH_RADIUS_KM`]. All angles are decimal degrees.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres per international nautical mile.
pub const KM_PER_NM: f64 = 1.852;

/// Margin added on every side of the leg when building a lookup box.
pub const BOX_MARGIN_DEG: f64 = 2.0;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new_unchecked(latitude, longitude);
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Build a coordinate without range validation.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Anything anchored at a single coordinate.
pub trait HasCoordinate {
    fn coordinate(&self) -> Coordinate;
}

impl HasCoordinate for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: HasCoordinate + ?Sized> HasCoordinate for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

/// Haversine great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total distance along an ordered sequence of points.
///
/// Sequences with fewer than two points have zero length.
pub fn route_distance_km<P: HasCoordinate>(points: &[P]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_km(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NM
}

/// Geographic box used to scope navaid lookups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Box covering both points plus `margin` degrees on each side, clamped to
    /// valid latitude and longitude ranges.
    pub fn around(a: Coordinate, b: Coordinate, margin: f64) -> Self {
        Self {
            north: (a.latitude.max(b.latitude) + margin).min(90.0),
            south: (a.latitude.min(b.latitude) - margin).max(-90.0),
            east: (a.longitude.max(b.longitude) + margin).min(180.0),
            west: (a.longitude.min(b.longitude) - margin).max(-180.0),
        }
    }

    /// Box for a leg using the standard [`BOX_MARGIN_DEG`] margin.
    pub fn for_leg(a: Coordinate, b: Coordinate) -> Self {
        Self::around(a, b, BOX_MARGIN_DEG)
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }

    /// `west,south,east,north` as expected by bbox query parameters.
    pub fn to_query(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}
