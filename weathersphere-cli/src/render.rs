//! Plain-text rendering of the widget state.

use chrono::NaiveDate;
use weathersphere_core::{
    DisplayState, ForecastEntry, IconSize, RecentCities, SearchStatus, WeatherSnapshot, icon_url,
};

const TITLE: &str = "WeatherSphere";

pub fn render(state: &DisplayState, today: NaiveDate) -> String {
    let mut lines = vec![TITLE.to_string(), String::new()];

    if state.sidebar_visible {
        lines.extend(recent_section(&state.recent));
        lines.push(String::new());
    }

    if let SearchStatus::Failed(message) = &state.status {
        lines.push(format!("Search failed: {message}"));
        lines.push(String::new());
    }

    match &state.report {
        None => lines.extend(empty_section()),
        Some(report) => {
            lines.extend(current_section(&report.snapshot, today));

            let daily = report.daily();
            if !daily.is_empty() {
                lines.push(String::new());
                lines.push("5-Day Forecast".to_string());
                lines.extend(daily.into_iter().map(|entry| forecast_row(entry, "%a")));
            }

            let hourly = report.hourly();
            if !hourly.is_empty() {
                lines.push(String::new());
                lines.push("Hourly Forecast".to_string());
                lines.extend(hourly.iter().map(|entry| forecast_row(entry, "%I:%M %p")));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn recent_section(recent: &RecentCities) -> Vec<String> {
    let mut lines = vec!["Recently Searched".to_string()];

    if recent.is_empty() {
        lines.push("  No recent searches".to_string());
    } else {
        lines.extend(recent.iter().map(|city| format!("  - {city}")));
    }

    lines
}

fn empty_section() -> Vec<String> {
    vec![
        "Start typing a city name".to_string(),
        "We'll show you current temperature, humidity, and future forecasts.".to_string(),
    ]
}

fn current_section(snapshot: &WeatherSnapshot, today: NaiveDate) -> Vec<String> {
    let heading = if snapshot.country.is_empty() {
        snapshot.city.clone()
    } else {
        format!("{}, {}", snapshot.city, snapshot.country)
    };

    let mut lines = vec![
        heading,
        today.format("%A, %B %-d, %Y").to_string(),
        format!(
            "  {}°C  {}",
            round_temp(snapshot.temperature_c),
            capitalize_words(&snapshot.description)
        ),
        format!(
            "  Humidity: {}%  Wind: {} m/s  Feels like: {}°C  Pressure: {} hPa",
            snapshot.humidity_pct,
            snapshot.wind_speed_mps,
            round_temp(snapshot.feels_like_c),
            snapshot.pressure_hpa
        ),
    ];

    if !snapshot.icon.is_empty() {
        lines.push(format!("  Icon: {}", icon_url(&snapshot.icon, IconSize::Large)));
    }

    lines
}

fn forecast_row(entry: &ForecastEntry, label_format: &str) -> String {
    let label = entry
        .local_time()
        .map(|t| t.format(label_format).to_string())
        .unwrap_or_else(|| entry.time_text.clone());

    let mut row = format!(
        "  {label:<8} {:>4}°C  {}",
        round_temp(entry.temperature_c),
        capitalize_words(&entry.description)
    );

    if !entry.icon.is_empty() {
        row.push_str(&format!("  {}", icon_url(&entry.icon, IconSize::Medium)));
    }

    row
}

/// Round halves towards positive infinity, so -2.5 becomes -2.
fn round_temp(celsius: f64) -> i64 {
    // -0.0 casts to 0, so "-0°C" never shows.
    (celsius + 0.5).floor() as i64
}

/// Upper-case the first letter of every word.
fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
