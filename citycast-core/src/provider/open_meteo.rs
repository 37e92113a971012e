use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::FetchError,
    model::{CurrentWeather, DailyForecastEntry, HourlySeries, Location, WeatherResult},
};

use super::WeatherProvider;

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Daily entries kept from the forecast response.
pub const FORECAST_DAYS: usize = 5;

const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,apparent_temperature,surface_pressure,windspeed_10m,weathercode";
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Open-Meteo geocoding + forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    http: Client,
    geocoding_url: String,
    weather_url: String,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_endpoints(GEOCODING_URL, WEATHER_URL)
    }

    pub fn with_endpoints(geocoding_url: impl Into<String>, weather_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            weather_url: weather_url.into(),
        }
    }

    /// Build a provider from settings, applying the request timeout if one is set.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            weather_url: config.weather_url.clone(),
        })
    }

    async fn geocode(&self, city: &str) -> Result<Location, FetchError> {
        debug!(url = %self.geocoding_url, "Resolving city");

        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[("name", city), ("count", "1")])
            .send()
            .await
            .map_err(|e| FetchError::NotFound(format!("geocoding request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::NotFound(format!("failed to read geocoding body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::NotFound(format!(
                "geocoding request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: GeoResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::NotFound(format!("failed to parse geocoding JSON: {e}")))?;

        let first = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(format!("no match for '{city}'")))?;

        Ok(Location {
            name: first.name,
            country: first.country.unwrap_or_default(),
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }

    async fn forecast(&self, location: Location) -> Result<WeatherResult, FetchError> {
        debug!(
            url = %self.weather_url,
            lat = location.latitude,
            lon = location.longitude,
            "Fetching forecast"
        );

        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        let res = self
            .http
            .get(&self.weather_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current_weather", "true"),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Unavailable(format!("forecast request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Unavailable(format!("failed to read forecast body: {e}")))?;

        if !status.is_success() {
            return Err(FetchError::Unavailable(format!(
                "forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Unavailable(format!("failed to parse forecast JSON: {e}")))?;

        let daily = parsed.daily.into_entries()?;

        Ok(WeatherResult {
            location,
            current: CurrentWeather {
                temperature: parsed.current_weather.temperature,
                weather_code: wmo_code(parsed.current_weather.weathercode),
            },
            hourly: parsed.hourly.into_series(),
            daily,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    weathercode: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmHourly {
    temperature_2m: Vec<Option<f64>>,
    relativehumidity_2m: Vec<Option<f64>>,
    apparent_temperature: Vec<Option<f64>>,
    surface_pressure: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
    weathercode: Vec<Option<f64>>,
}

impl OmHourly {
    fn into_series(self) -> HourlySeries {
        HourlySeries {
            temperature: self.temperature_2m,
            apparent_temperature: self.apparent_temperature,
            relative_humidity: self.relativehumidity_2m,
            wind_speed: self.windspeed_10m,
            surface_pressure: self.surface_pressure,
            weather_code: self.weathercode.into_iter().map(|c| c.map(wmo_code)).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmDaily {
    time: Vec<String>,
    weathercode: Vec<Option<f64>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

impl OmDaily {
    /// Zips the parallel arrays (shortest wins) and keeps the first few days.
    fn into_entries(self) -> Result<Vec<DailyForecastEntry>, FetchError> {
        self.time
            .iter()
            .zip(&self.temperature_2m_min)
            .zip(&self.temperature_2m_max)
            .zip(&self.weathercode)
            .take(FORECAST_DAYS)
            .map(|(((day, &min_temp), &max_temp), &code)| -> Result<DailyForecastEntry, FetchError> {
                let date = day.parse::<NaiveDate>().map_err(|e| {
                    FetchError::Unavailable(format!("invalid forecast date '{day}': {e}"))
                })?;
                Ok(DailyForecastEntry { date, min_temp, max_temp, weather_code: code.map(wmo_code) })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: OmCurrentWeather,
    #[serde(default)]
    hourly: OmHourly,
    #[serde(default)]
    daily: OmDaily,
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        // The forecast needs the coordinates, so the two calls stay sequential.
        let location = self.geocode(city).await?;
        self.forecast(location).await
    }
}

// Codes arrive as `3` or `3.0` depending on the API version.
fn wmo_code(raw: f64) -> i32 {
    raw.round() as i32
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
