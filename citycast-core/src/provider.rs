use crate::{Config, WeatherResult, error::FetchError, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Resolves a city and fetches its weather.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocode `city`, then fetch weather for the match.
    ///
    /// Blank input fails with [`FetchError::EmptyQuery`] without touching the network.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError>;
}

/// Construct the provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::from_config(config)?;
    Ok(Box::new(provider))
}
