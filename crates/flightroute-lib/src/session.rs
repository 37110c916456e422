//! Interactive planning session.
//!
//! A [`Session`] owns the airport catalogue, the current departure/arrival
//! selection and the last computed route. Each call to
//! [`Session::compute_route`] queries airways once and the resulting route is
//! reused for both the report and [`Session::last_route`]. Changing either
//! selection discards the stored route so a stale result is never reported
//! for the new pair.

use std::fmt;

use tracing::{debug, info};

use crate::airports::{Airport, AirportCatalog, CustomAirportStore};
use crate::airways::AirwayLookup;
use crate::error::{Error, Result};
use crate::estimate::FlightSettings;
use crate::output::RouteSummary;
use crate::routing::{find_best_route, RouteResult};

/// Which end of the leg an airport is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    From,
    To,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Role::From => "from",
            Role::To => "to",
        };
        f.write_str(value)
    }
}

pub struct Session {
    catalog: AirportCatalog,
    lookup: Box<dyn AirwayLookup>,
    store: Option<CustomAirportStore>,
    from: Option<Airport>,
    to: Option<Airport>,
    last_route: Option<RouteResult>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("airports", &self.catalog.len())
            .field("from", &self.from.as_ref().map(|a| a.code.as_str()))
            .field("to", &self.to.as_ref().map(|a| a.code.as_str()))
            .field("has_route", &self.last_route.is_some())
            .finish()
    }
}

impl Session {
    pub fn new(catalog: AirportCatalog, lookup: Box<dyn AirwayLookup>) -> Self {
        Self {
            catalog,
            lookup,
            store: None,
            from: None,
            to: None,
            last_route: None,
        }
    }

    /// Persist airports added through [`Session::add_airport`] to `store`.
    pub fn with_store(mut self, store: CustomAirportStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn catalog(&self) -> &AirportCatalog {
        &self.catalog
    }

    pub fn selection(&self, role: Role) -> Option<&Airport> {
        match role {
            Role::From => self.from.as_ref(),
            Role::To => self.to.as_ref(),
        }
    }

    /// Select the airport with `code` for `role`.
    ///
    /// Unknown codes are rejected and leave the selection unchanged.
    pub fn select_airport(&mut self, role: Role, code: &str) -> Result<&Airport> {
        let airport = self.catalog.resolve(code)?.clone();
        let slot = match role {
            Role::From => &mut self.from,
            Role::To => &mut self.to,
        };
        if slot.as_ref().map(|current| &current.code) != Some(&airport.code) {
            debug!(%role, code = %airport.code, "selection changed");
            self.last_route = None;
        }
        Ok(slot.insert(airport))
    }

    pub fn clear_selection(&mut self, role: Role) {
        match role {
            Role::From => self.from = None,
            Role::To => self.to = None,
        }
        self.last_route = None;
    }

    /// Route computed by the most recent [`Session::compute_route`] for the
    /// current selection.
    pub fn last_route(&self) -> Option<&RouteResult> {
        self.last_route.as_ref()
    }

    /// Build the best route for the current selection and summarise it.
    pub fn compute_route(&mut self, settings: &FlightSettings) -> Result<RouteSummary> {
        settings.validate()?;
        let (Some(from), Some(to)) = (self.from.as_ref(), self.to.as_ref()) else {
            return Err(Error::SelectionIncomplete);
        };

        let route = find_best_route(&*self.lookup, from, to);
        let summary = RouteSummary::from_route(from, to, &route, settings);
        info!(
            from = %from.code,
            to = %to.code,
            route = %route.name,
            distance_km = summary.estimate.distance_km,
            "route computed"
        );
        self.last_route = Some(route);
        Ok(summary)
    }

    /// Case-insensitive search over airport codes and names.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Airport> {
        self.catalog.search(query, limit)
    }

    /// Add a user airport and persist it.
    ///
    /// Duplicate codes and invalid records are rejected before anything is
    /// written, leaving both the catalogue and the store untouched.
    pub fn add_airport(&mut self, airport: Airport) -> Result<&Airport> {
        let airport = airport.normalized();
        self.catalog.check_new(&airport)?;
        if let Some(store) = &self.store {
            store.append(airport.clone())?;
        }
        let code = airport.code.clone();
        self.catalog.add(airport)?;
        info!(%code, "added custom airport");
        self.catalog.resolve(&code)
    }
}
