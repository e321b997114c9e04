//! Read-only projections over the forecast series.
//!
//! Both views are recomputed from the underlying slice on every call.

use crate::model::ForecastEntry;

/// Time-of-day that marks the representative entry of each day.
pub const NOON_MARKER: &str = "12:00:00";

/// Number of 3-hour slots in the hourly view (~36 hours).
pub const HOURLY_SLOTS: usize = 12;

/// Entries stamped at local noon, in original order.
pub fn daily_view(forecast: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    forecast
        .iter()
        .filter(|entry| entry.time_of_day() == Some(NOON_MARKER))
        .collect()
}

/// The first [`HOURLY_SLOTS`] entries, or fewer if the series is shorter.
pub fn hourly_view(forecast: &[ForecastEntry]) -> &[ForecastEntry] {
    &forecast[..forecast.len().min(HOURLY_SLOTS)]
}
