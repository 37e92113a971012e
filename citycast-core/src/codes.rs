//! Static lookup tables for Open-Meteo (WMO) weather codes.
//!
//! Both lookups are total: any code outside the documented set falls back to
//! `"Unknown"` and the clear-sky icon.

use std::fmt;

/// Description returned for codes outside the table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Icon identifiers (Font Awesome names) shown next to a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    Sun,
    CloudSun,
    Smog,
    CloudRain,
    CloudShowersHeavy,
    Snowflake,
    Bolt,
}

impl Icon {
    pub fn id(&self) -> &'static str {
        match self {
            Icon::Sun => "fa-sun",
            Icon::CloudSun => "fa-cloud-sun",
            Icon::Smog => "fa-smog",
            Icon::CloudRain => "fa-cloud-rain",
            Icon::CloudShowersHeavy => "fa-cloud-showers-heavy",
            Icon::Snowflake => "fa-snowflake",
            Icon::Bolt => "fa-bolt",
        }
    }

    /// Full markup class, e.g. `"fas fa-sun"`.
    pub fn class(&self) -> String {
        format!("fas {}", self.id())
    }

    /// Emoji stand-in for terminals.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}\u{FE0F}",
            Icon::CloudSun => "\u{26C5}",
            Icon::Smog => "\u{1F32B}\u{FE0F}",
            Icon::CloudRain => "\u{1F326}\u{FE0F}",
            Icon::CloudShowersHeavy => "\u{1F327}\u{FE0F}",
            Icon::Snowflake => "\u{2744}\u{FE0F}",
            Icon::Bolt => "\u{26A1}",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Human-readable description for a weather code.
pub fn describe_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_DESCRIPTION,
    }
}

/// Icon for a weather code. Unmapped codes get the clear-sky icon.
pub fn icon_for(code: i32) -> Icon {
    match code {
        0 => Icon::Sun,
        1..=3 => Icon::CloudSun,
        45 | 48 => Icon::Smog,
        51..=57 => Icon::CloudRain,
        61..=67 => Icon::CloudShowersHeavy,
        71..=77 => Icon::Snowflake,
        80..=86 => Icon::CloudShowersHeavy,
        95 | 96 | 99 => Icon::Bolt,
        _ => Icon::Sun,
    }
}
