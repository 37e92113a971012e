//! Turns a [`WeatherResult`] into the fields a view displays.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use std::fmt;

use crate::{
    codes::{Icon, describe_code, icon_for},
    model::WeatherResult,
    provider::open_meteo::FORECAST_DAYS,
};

/// Shown in place of a value the upstream did not supply.
pub const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub location_label: String,
    pub date_label: String,
    pub temperature: i64,
    pub description: &'static str,
    pub icon: Icon,
    pub metrics: Metrics,
    pub forecast: Vec<ForecastCard>,
}

impl DisplayFields {
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature)
    }
}

/// Extended metrics for the current hour. `None` when unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metrics {
    pub feels_like: Option<i64>,
    pub humidity: Option<i64>,
    pub wind_speed: Option<i64>,
    pub pressure: Option<i64>,
}

impl Metrics {
    pub fn feels_like_label(&self) -> String {
        with_unit(self.feels_like, "°C")
    }

    pub fn humidity_label(&self) -> String {
        with_unit(self.humidity, "%")
    }

    pub fn wind_speed_label(&self) -> String {
        with_unit(self.wind_speed, " km/h")
    }

    pub fn pressure_label(&self) -> String {
        with_unit(self.pressure, " hPa")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub date: NaiveDate,
    pub day_name: String,
    pub icon: Icon,
    pub min_temp: Option<i64>,
    pub max_temp: Option<i64>,
}

impl ForecastCard {
    /// `"{min}° / {max}°"`, with `--` for a missing bound.
    pub fn range_label(&self) -> String {
        format!("{} / {}", with_unit(self.min_temp, "°"), with_unit(self.max_temp, "°"))
    }
}

impl fmt::Display for ForecastCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day_name, self.range_label())
    }
}

/// Build display fields for `result` as of `now`.
///
/// `now` supplies both the date label and the hour used to sample the hourly
/// series. Indices past the end of a series clamp to its last element.
pub fn present(result: &WeatherResult, now: &DateTime<FixedOffset>) -> DisplayFields {
    let hour = now.hour() as usize;
    let conditions = result.conditions_at(hour);

    let metrics = Metrics {
        feels_like: conditions.apparent_temperature.map(round),
        humidity: conditions.relative_humidity.map(round),
        wind_speed: conditions.wind_speed.map(round),
        pressure: conditions.surface_pressure.map(round),
    };

    let forecast = result
        .daily
        .iter()
        .take(FORECAST_DAYS)
        .map(|day| ForecastCard {
            date: day.date,
            day_name: day.date.format("%a").to_string(),
            icon: day.weather_code.map(icon_for).unwrap_or_default(),
            min_temp: day.min_temp.map(round),
            max_temp: day.max_temp.map(round),
        })
        .collect();

    DisplayFields {
        location_label: result.location.label(),
        date_label: now.format("%A, %B %-d, %Y").to_string(),
        temperature: round(conditions.temperature),
        description: describe_code(conditions.weather_code),
        icon: icon_for(conditions.weather_code),
        metrics,
        forecast,
    }
}

/// Nearest integer, halves toward positive infinity (`-2.5` becomes `-2`).
fn round(value: f64) -> i64 {
    // `f64::round` is exact but sends negative halves down; pull those back up.
    let rounded = value.round();
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

fn with_unit(value: Option<i64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v}{unit}"),
        None => MISSING.to_string(),
    }
}
