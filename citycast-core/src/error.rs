use thiserror::Error;

/// Why a search produced no weather.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The city name was blank; nothing was sent.
    #[error("City name is empty")]
    EmptyQuery,

    /// Geocoding failed or matched nothing.
    #[error("City not found: {0}")]
    NotFound(String),

    /// The weather lookup for resolved coordinates failed.
    #[error("Weather data not available: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::EmptyQuery => "empty_query",
            FetchError::NotFound(_) => "not_found",
            FetchError::Unavailable(_) => "unavailable",
        }
    }
}
