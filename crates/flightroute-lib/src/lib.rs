//! Flightroute library entry points.
//!
//! This crate exposes helpers to locate and load the airport dataset, query
//! OpenAIP for navaids along a leg, build airway or direct routes between two
//! airports, and turn a route into a distance and flight time estimate.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod airports;
pub mod airways;
pub mod cache;
pub mod dataset;
pub mod error;
pub mod estimate;
pub mod geo;
pub mod openaip;
pub mod output;
pub mod routing;
pub mod session;

pub use airports::{Airport, AirportCatalog, AirportFilter, CustomAirportStore};
pub use airways::{
    AirwayCandidate, AirwayClient, AirwayLookup, NoAirways, Waypoint, DEFAULT_MAX_DETOUR,
};
pub use cache::{AirwayCache, BoxKey, CacheConfig, CacheStats};
pub use dataset::{default_data_dir, load_airports, resolve_dataset, DatasetPaths};
pub use error::{Error, Result};
pub use estimate::{FlightEstimate, FlightSettings, DEFAULT_SPEED_KNOTS};
pub use geo::{distance_km, km_to_nm, route_distance_km, BoundingBox, Coordinate, HasCoordinate};
pub use openaip::{ClientConfig, Navaid, NavaidSource, OpenAipClient};
pub use output::{RouteRenderMode, RouteSummary};
pub use routing::{find_best_route, RouteResult, DIRECT_ROUTE_NAME};
pub use session::{Role, Session};
