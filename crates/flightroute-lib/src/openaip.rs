use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinate};

pub const DEFAULT_BASE_URL: &str = "https://api.openaip.net/api/v1";
const API_KEY_ENV: &str = "OPENAIP_API_KEY";
const BASE_URL_ENV: &str = "OPENAIP_BASE_URL";
const API_KEY_HEADER: &str = "X-API-Key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Navigational aid returned by a navaid lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Navaid {
    pub ident: Option<String>,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub coordinate: Coordinate,
    /// Airway identifiers this navaid is published on.
    pub airways: Vec<String>,
}

impl Navaid {
    /// Display name, preferring the long name over the identifier.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.ident.as_deref().filter(|ident| !ident.is_empty()))
            .unwrap_or("UNNAMED")
    }
}

/// Source of navaid data for a geographic box.
///
/// Implemented by [`OpenAipClient`]; tests provide in-memory doubles.
pub trait NavaidSource {
    fn fetch_navaids(&self, bbox: &BoundingBox) -> Result<Vec<Navaid>>;
}

/// Connection settings for the OpenAIP API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: user_agent(),
        }
    }
}

impl ClientConfig {
    /// Read `OPENAIP_API_KEY` and `OPENAIP_BASE_URL` from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            config.api_key = Some(key);
        }
        if let Some(url) = non_empty_env(BASE_URL_ENV) {
            config.base_url = url;
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn user_agent() -> String {
    format!("flightroute-lib/{}", env!("CARGO_PKG_VERSION"))
}

/// Blocking OpenAIP navaid client.
#[derive(Debug, Clone)]
pub struct OpenAipClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAipClient {
    /// Build a client; fails when no API key is configured.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or(Error::MissingApiKey)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn search_url(&self, bbox: &BoundingBox) -> String {
        format!("{}/navaids/search?bbox={}", self.base_url, bbox.to_query())
    }
}

impl NavaidSource for OpenAipClient {
    fn fetch_navaids(&self, bbox: &BoundingBox) -> Result<Vec<Navaid>> {
        let url = self.search_url(bbox);
        debug!(%url, "requesting navaids");

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(ACCEPT, "application/json")
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        parse_navaids(&body)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON position: `[longitude, latitude]`, optionally followed by
    /// elevation.
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    ident: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "string_or_number")]
    kind: Option<String>,
    #[serde(default)]
    airways: Option<Vec<String>>,
}

/// OpenAIP encodes navaid types as integers; older payloads use strings.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse an OpenAIP feature collection into navaids.
///
/// A body without a `features` array yields no navaids. Features without a
/// usable position are skipped individually.
pub fn parse_navaids(body: &str) -> Result<Vec<Navaid>> {
    let collection: FeatureCollection = serde_json::from_str(body)?;
    let navaids = collection
        .features
        .unwrap_or_default()
        .into_iter()
        .filter_map(|feature| {
            let properties = feature.properties;
            let coordinate = match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => Coordinate::new_unchecked(*lat, *lon),
                position => {
                    debug!(
                        ident = ?properties.ident,
                        ?position,
                        "skipping navaid without position"
                    );
                    return None;
                }
            };
            if !coordinate.is_valid() {
                debug!(
                    ident = ?properties.ident,
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "skipping navaid with out-of-range position"
                );
                return None;
            }
            Some(Navaid {
                ident: properties.ident,
                name: properties.name,
                kind: properties.kind,
                coordinate,
                airways: properties.airways.unwrap_or_default(),
            })
        })
        .collect();
    Ok(navaids)
}
