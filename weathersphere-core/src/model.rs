use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::views;

/// Timestamp layout of forecast entries, e.g. `2026-10-19 12:00:00`.
pub const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Current conditions for one city, as resolved by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Provider-resolved display name, e.g. "London" for a query of "london".
    pub city: String,
    pub country: String,
    pub description: String,
    pub icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
}

/// One 3-hour point of the forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Local timestamp in [`FORECAST_TIME_FORMAT`].
    pub time_text: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon: String,
}

impl ForecastEntry {
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time_text, FORECAST_TIME_FORMAT).ok()
    }

    /// Time-of-day part of the textual timestamp (`"12:00:00"`), if present.
    pub fn time_of_day(&self) -> Option<&str> {
        self.time_text.split_once(' ').map(|(_, time)| time.trim())
    }
}

/// Current conditions plus the forecast series; replaced as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<ForecastEntry>,
}

impl WeatherReport {
    /// One entry per day, taken at local noon.
    pub fn daily(&self) -> Vec<&ForecastEntry> {
        views::daily_view(&self.forecast)
    }

    /// The next twelve 3-hour slots.
    pub fn hourly(&self) -> &[ForecastEntry] {
        views::hourly_view(&self.forecast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Used for forecast tiles.
    Medium,
    /// Used for the current-conditions card.
    Large,
}

impl IconSize {
    fn suffix(self) -> &'static str {
        match self {
            IconSize::Medium => "2x",
            IconSize::Large => "4x",
        }
    }
}

pub fn icon_url(icon: &str, size: IconSize) -> String {
    format!("{ICON_BASE_URL}/{icon}@{}.png", size.suffix())
}
