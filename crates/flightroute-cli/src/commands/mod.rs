//! Subcommand handlers.
//!
//! `main.rs` parses arguments and dispatches here. Every handler loads the
//! airport catalogue through [`DataOptions`] so the dataset location and the
//! country filter are applied the same way everywhere.

use std::path::PathBuf;

use anyhow::{Context, Result};

use flightroute_lib::{
    load_airports, resolve_dataset, AirportCatalog, AirportFilter, DatasetPaths,
};

pub mod airport;
pub mod route;
pub mod search;

/// Global options controlling which airports are loaded.
#[derive(Debug, Clone, Default)]
pub struct DataOptions {
    /// Dataset directory or file override.
    pub data_dir: Option<PathBuf>,
    /// ICAO prefixes to keep; empty keeps every airport.
    pub countries: Vec<String>,
}

impl DataOptions {
    pub fn filter(&self) -> AirportFilter {
        AirportFilter::icao_prefixes(&self.countries)
    }

    /// Resolve the dataset paths and load the filtered catalogue.
    pub fn load(&self) -> Result<(DatasetPaths, AirportCatalog)> {
        let paths = resolve_dataset(self.data_dir.as_deref())
            .context("failed to resolve the airport dataset location")?;
        let catalog = load_airports(&paths, &self.filter())
            .with_context(|| format!("failed to load airports from {}", paths.airports.display()))?;
        Ok((paths, catalog))
    }
}
