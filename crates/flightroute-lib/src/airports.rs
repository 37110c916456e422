//! Airport catalogue loading, lookup and user-added airport persistence.
//!
//! The base catalogue comes from a static JSON array of
//! `{code, icao, name, lat, lon}` records. Users may append airports at
//! runtime; those are kept in a separate [`CustomAirportStore`] file and merged
//! back in at startup.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::airways::Waypoint;
use crate::error::{Error, Result};
use crate::geo::{Coordinate, HasCoordinate};

/// Minimum normalised Damerau-Levenshtein similarity for a code suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Airport record as stored in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    #[serde(
        default,
        alias = "icaoCode",
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub icao: Option<String>,
    pub name: String,
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lon", alias = "longitude")]
    pub longitude: f64,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

impl Airport {
    pub fn new(
        code: impl Into<String>,
        icao: Option<String>,
        name: impl Into<String>,
        coordinate: Coordinate,
    ) -> Self {
        Self {
            code: code.into(),
            icao,
            name: name.into(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }

    /// Normalise user input: upper-case codes and trimmed names.
    pub fn normalized(mut self) -> Self {
        self.code = self.code.trim().to_ascii_uppercase();
        self.icao = self
            .icao
            .map(|icao| icao.trim().to_ascii_uppercase())
            .filter(|icao| !icao.is_empty());
        self.name = self.name.trim().to_string();
        self
    }

    /// Check the record has a code, a name and a valid position.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::InvalidAirport {
                message: "airport code must not be empty".to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidAirport {
                message: format!("airport {} has no name", self.code),
            });
        }
        Coordinate::new(self.latitude, self.longitude).map(|_| ())
    }

    /// Waypoint labelled with the airport code.
    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint {
            name: self.code.clone(),
            coordinate: self.coordinate(),
            kind: Some("airport".to_string()),
            airway: None,
        }
    }

    /// `CODE - ICAO` label used in listings.
    pub fn label(&self) -> String {
        match &self.icao {
            Some(icao) => format!("{} - {}", self.code, icao),
            None => self.code.clone(),
        }
    }
}

impl HasCoordinate for Airport {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new_unchecked(self.latitude, self.longitude)
    }
}

/// Subset of the dataset to keep at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AirportFilter {
    #[default]
    All,
    /// Keep airports whose ICAO code starts with one of these prefixes.
    IcaoPrefixes(Vec<String>),
}

impl AirportFilter {
    pub fn icao_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_ascii_uppercase())
            .filter(|p| !p.is_empty())
            .collect();
        if prefixes.is_empty() {
            AirportFilter::All
        } else {
            AirportFilter::IcaoPrefixes(prefixes)
        }
    }

    pub fn matches(&self, airport: &Airport) -> bool {
        match self {
            AirportFilter::All => true,
            AirportFilter::IcaoPrefixes(prefixes) => airport.icao.as_deref().is_some_and(|icao| {
                let icao = icao.to_ascii_uppercase();
                prefixes.iter().any(|prefix| icao.starts_with(prefix.as_str()))
            }),
        }
    }
}

/// In-memory airport list indexed by code.
#[derive(Debug, Clone, Default)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
    by_code: HashMap<String, usize>,
    /// Codes present in the dataset but hidden by a filter. They cannot be
    /// reused for custom airports.
    hidden_codes: HashSet<String>,
    source: Option<PathBuf>,
}

impl AirportCatalog {
    /// Load a catalogue from a JSON dataset file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file).map_err(|err| match err {
            Error::Json(json) => Error::DatasetParse {
                path: path.to_path_buf(),
                message: json.to_string(),
            },
            other => other,
        })?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalogue from a reader yielding a JSON array.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let airports: Vec<Airport> = serde_json::from_reader(reader)?;
        Ok(Self::from_airports(airports))
    }

    /// Build a catalogue, skipping unusable records and duplicate codes.
    pub fn from_airports(airports: impl IntoIterator<Item = Airport>) -> Self {
        let mut catalog = Self::default();
        for airport in airports {
            if let Err(err) = airport.validate() {
                debug!(code = %airport.code, error = %err, "skipping invalid airport record");
                continue;
            }
            if catalog.contains(&airport.code) {
                debug!(code = %airport.code, "skipping duplicate airport record");
                continue;
            }
            catalog.push(airport);
        }
        catalog
    }

    /// Keep only the airports accepted by `filter`.
    pub fn filtered(self, filter: &AirportFilter) -> Self {
        if *filter == AirportFilter::All {
            return self;
        }
        let (kept, hidden): (Vec<_>, Vec<_>) =
            self.airports.into_iter().partition(|a| filter.matches(a));
        let mut catalog = Self::from_airports(kept);
        catalog.source = self.source;
        catalog.hidden_codes = self.hidden_codes;
        catalog
            .hidden_codes
            .extend(hidden.iter().map(|a| a.code.to_ascii_uppercase()));
        catalog
    }

    fn push(&mut self, airport: Airport) {
        self.by_code
            .insert(airport.code.to_ascii_uppercase(), self.airports.len());
        self.airports.push(airport);
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(&code.trim().to_ascii_uppercase())
    }

    /// Case-insensitive lookup by code.
    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.by_code
            .get(&code.trim().to_ascii_uppercase())
            .map(|&idx| &self.airports[idx])
    }

    /// Lookup by code, returning an error with close matches when missing.
    pub fn resolve(&self, code: &str) -> Result<&Airport> {
        self.get(code).ok_or_else(|| Error::UnknownAirport {
            code: code.to_string(),
            suggestions: self.fuzzy_matches(code, 3),
        })
    }

    /// Codes similar to `code`, best first.
    pub fn fuzzy_matches(&self, code: &str, limit: usize) -> Vec<String> {
        let needle = code.trim().to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .airports
            .iter()
            .map(|airport| {
                let score = strsim::normalized_damerau_levenshtein(&needle, &airport.code);
                (score, airport.code.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }

    /// Case-insensitive substring search over codes and names.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.airports
            .iter()
            .filter(|airport| {
                airport.code.to_lowercase().contains(&query)
                    || airport.name.to_lowercase().contains(&query)
            })
            .take(limit)
            .collect()
    }

    /// Validate an airport for insertion without modifying the catalogue.
    ///
    /// Codes hidden by [`AirportCatalog::filtered`] still count as taken.
    pub fn check_new(&self, airport: &Airport) -> Result<()> {
        airport.validate()?;
        let code = airport.code.trim().to_ascii_uppercase();
        if self.contains(&code) || self.hidden_codes.contains(&code) {
            return Err(Error::DuplicateAirport { code });
        }
        Ok(())
    }

    /// Append a user airport. Duplicate codes are rejected and leave the
    /// catalogue untouched.
    pub fn add(&mut self, airport: Airport) -> Result<()> {
        let airport = airport.normalized();
        self.check_new(&airport)?;
        self.push(airport);
        Ok(())
    }

    /// Merge previously saved user airports, skipping any that clash with
    /// the base dataset. Returns the number merged.
    pub fn merge_custom(&mut self, custom: impl IntoIterator<Item = Airport>) -> usize {
        let mut merged = 0;
        for airport in custom {
            match self.add(airport.clone()) {
                Ok(()) => merged += 1,
                Err(err) => warn!(code = %airport.code, error = %err, "ignoring saved custom airport"),
            }
        }
        merged
    }
}

/// JSON file holding user-added airports.
#[derive(Debug, Clone)]
pub struct CustomAirportStore {
    path: PathBuf,
}

impl CustomAirportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved airports; a missing file means none have been added yet.
    pub fn load(&self) -> Result<Vec<Airport>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|err| Error::DatasetParse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Replace the stored list atomically.
    pub fn save(&self, airports: &[Airport]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), airports)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    pub fn append(&self, airport: Airport) -> Result<()> {
        let mut airports = self.load()?;
        airports.push(airport);
        self.save(&airports)
    }
}
