//! Core library for the `citycast` weather widget.
//!
//! This crate defines:
//! - Weather code lookup tables
//! - The Open-Meteo fetcher (geocode, then forecast)
//! - The presentation adapter producing display fields
//! - The search controller driving a pluggable view
//!
//! It is used by `citycast-cli`, but any front-end implementing [`RenderPort`] can reuse it.

pub mod clock;
pub mod codes;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;

pub use clock::{Clock, FixedClock, SystemClock};
pub use codes::{Icon, describe_code, icon_for};
pub use config::Config;
pub use controller::{RenderPort, SearchController, SearchOutcome, SearchState};
pub use error::FetchError;
pub use model::{
    CurrentConditions, CurrentWeather, DailyForecastEntry, HourlySeries, Location, WeatherResult,
};
pub use present::{DisplayFields, ForecastCard, Metrics, present};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider, provider_from_config};
