use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the flightroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Airport dataset could not be located at the resolved path.
    #[error("airport dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Airport dataset exists but could not be parsed.
    #[error("failed to parse airport dataset {path}: {message}")]
    DatasetParse { path: PathBuf, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for airport data")]
    ProjectDirsUnavailable,

    /// Raised when an airport code could not be found in the catalogue.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when adding an airport whose code is already present.
    #[error("an airport with code {code} already exists")]
    DuplicateAirport { code: String },

    /// Raised when an airport record is missing required fields.
    #[error("invalid airport data: {message}")]
    InvalidAirport { message: String },

    /// Raised when a latitude/longitude pair falls outside the valid range.
    #[error("invalid coordinate ({latitude}, {longitude}); latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when cruise speed or buffer minutes are unusable.
    #[error("invalid flight settings: {message}")]
    InvalidSettings { message: String },

    /// Raised when a route is requested before both airports are selected.
    #[error("please select both a departure and a destination airport")]
    SelectionIncomplete,

    /// Raised when an airway lookup is attempted without an API key.
    #[error("OpenAIP API key is not configured (set OPENAIP_API_KEY)")]
    MissingApiKey,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON encoding and decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
