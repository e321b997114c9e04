//! Core library for the WeatherSphere weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider contract and its OpenWeather implementation
//! - Forecast fetching, recent-city tracking and the derived forecast views
//! - The widget state machine driven by presentation events
//!
//! It is used by `weathersphere-cli`, but any front end can drive a
//! [`WeatherWidget`] and render its [`DisplayState`].

pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod recent;
pub mod views;
pub mod widget;

pub use config::{Config, EmptyQueryPolicy};
pub use error::FetchError;
pub use fetcher::ForecastFetcher;
pub use model::{ForecastEntry, IconSize, WeatherReport, WeatherSnapshot, icon_url};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use recent::{RECENT_CAPACITY, RecentCities, record_search};
pub use views::{daily_view, hourly_view};
pub use widget::{DisplayState, Phase, SearchOutcome, SearchStatus, UiEvent, WeatherWidget};
