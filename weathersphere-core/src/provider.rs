use crate::{
    error::FetchError,
    model::{ForecastEntry, WeatherSnapshot},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Remote source of current conditions and the 5-day/3-hour forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    /// Forecast series in chronological order, as delivered.
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}
