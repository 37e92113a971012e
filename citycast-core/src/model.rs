use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Place resolved by the geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// `"{name}, {country}"`, or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weather_code: i32,
}

/// Per-hour series as returned upstream, starting at local midnight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub temperature: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub relative_humidity: Vec<Option<f64>>,
    pub wind_speed: Vec<Option<f64>>,
    pub surface_pressure: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
}

impl HourlySeries {
    /// Samples the series at `hour`, clamping to the last element.
    ///
    /// An empty series, or a `null` sample, yields `None`.
    pub fn sample(series: &[Option<f64>], hour: usize) -> Option<f64> {
        let last = series.len().checked_sub(1)?;
        series[hour.min(last)]
    }
}

/// Conditions at the current hour, combining `current_weather` with the
/// hourly series.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub weather_code: i32,
    pub apparent_temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub surface_pressure: Option<f64>,
}

/// One forecast day. Values the upstream sent as `null` are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Everything one search produces. Replaced wholesale by the next search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location: Location,
    pub current: CurrentWeather,
    pub hourly: HourlySeries,
    pub daily: Vec<DailyForecastEntry>,
}

impl WeatherResult {
    pub fn conditions_at(&self, hour: usize) -> CurrentConditions {
        CurrentConditions {
            temperature: self.current.temperature,
            weather_code: self.current.weather_code,
            apparent_temperature: HourlySeries::sample(&self.hourly.apparent_temperature, hour),
            relative_humidity: HourlySeries::sample(&self.hourly.relative_humidity, hour),
            wind_speed: HourlySeries::sample(&self.hourly.wind_speed, hour),
            surface_pressure: HourlySeries::sample(&self.hourly.surface_pressure, hour),
        }
    }
}
