use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::airports::{AirportCatalog, AirportFilter, CustomAirportStore};
use crate::error::{Error, Result};

/// Default filename of the static airport dataset.
const AIRPORTS_FILENAME: &str = "airports.json";
/// Filename of the user-added airport list stored next to the dataset.
const CUSTOM_AIRPORTS_FILENAME: &str = "custom_airports.json";
const DATA_DIR_ENV: &str = "FLIGHTROUTE_DATA_DIR";

/// Paths to the airport data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Static airport dataset (JSON array).
    pub airports: PathBuf,
    /// User-added airports, created on first insert.
    pub custom_airports: PathBuf,
}

impl DatasetPaths {
    /// Paths for a dataset file, with the custom list alongside it.
    pub fn for_dataset(airports: PathBuf) -> Self {
        let custom_airports = airports.with_file_name(CUSTOM_AIRPORTS_FILENAME);
        Self {
            airports,
            custom_airports,
        }
    }

    pub fn custom_store(&self) -> CustomAirportStore {
        CustomAirportStore::new(self.custom_airports.clone())
    }
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "flightroute", "flightroute")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Work out where the airport dataset lives.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `FLIGHTROUTE_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// A target with a file extension is taken as the dataset file itself;
/// anything else is treated as a directory containing `airports.json`.
pub fn resolve_dataset(target: Option<&Path>) -> Result<DatasetPaths> {
    if let Some(explicit) = target {
        return Ok(DatasetPaths::for_dataset(canonical_dataset_path(explicit)));
    }

    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        return Ok(DatasetPaths::for_dataset(canonical_dataset_path(
            Path::new(&env_path),
        )));
    }

    let default = default_data_dir()?.join(AIRPORTS_FILENAME);
    Ok(DatasetPaths::for_dataset(default))
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }
    path.join(AIRPORTS_FILENAME)
}

/// Load the airport catalogue, apply `filter`, then merge saved custom
/// airports.
///
/// A missing or malformed dataset is fatal. A broken custom list is logged
/// and ignored so the base catalogue stays usable.
pub fn load_airports(paths: &DatasetPaths, filter: &AirportFilter) -> Result<AirportCatalog> {
    let mut catalog = AirportCatalog::from_path(&paths.airports)?.filtered(filter);
    let base = catalog.len();

    let custom = match paths.custom_store().load() {
        Ok(custom) => custom,
        Err(err) => {
            warn!(
                path = %paths.custom_airports.display(),
                error = %err,
                "failed to read custom airports; continuing without them"
            );
            Vec::new()
        }
    };
    let merged = catalog.merge_custom(custom);

    info!(
        path = %paths.airports.display(),
        base,
        custom = merged,
        "loaded airports"
    );
    Ok(catalog)
}
