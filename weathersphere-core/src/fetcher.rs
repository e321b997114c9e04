use tracing::{debug, instrument};

use crate::{error::FetchError, model::WeatherReport, provider::WeatherProvider};

/// Runs the two provider lookups for a city and bundles them into a report.
#[derive(Debug)]
pub struct ForecastFetcher<P> {
    provider: P,
}

impl<P: WeatherProvider> ForecastFetcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[cfg(test)]
    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    /// Current conditions first; the forecast is only requested once they succeed.
    #[instrument(skip(self))]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let snapshot = self.provider.current(city).await?;
        debug!(resolved = %snapshot.city, "current conditions received");

        let forecast = self.provider.forecast(city).await?;
        debug!(entries = forecast.len(), "forecast received");

        Ok(WeatherReport { snapshot, forecast })
    }
}
