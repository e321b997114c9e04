use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    config::Config,
    error::FetchError,
    model::{ForecastEntry, WeatherSnapshot},
};

use super::WeatherProvider;

const SUCCESS_CODE: u16 = 200;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.api_key()?, config.base_url.as_str()))
    }

    /// GET `{base}/{endpoint}` for `city` and decode the body, checking `cod` first.
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "requesting");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let http_status = res.status();
        let body = res.text().await?;

        match serde_json::from_str::<OwStatus>(&body) {
            Ok(status) => {
                let code = status.code().unwrap_or(http_status.as_u16());
                if code != SUCCESS_CODE {
                    return Err(FetchError::Api {
                        code,
                        message: status.message().unwrap_or_else(|| truncate_body(&body)),
                    });
                }
            }
            Err(_) if !http_status.is_success() => {
                return Err(FetchError::Api {
                    code: http_status.as_u16(),
                    message: truncate_body(&body),
                });
            }
            Err(err) => return Err(err.into()),
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let parsed: OwCurrentResponse = self.get("weather", city).await?;
        Ok(parsed.into())
    }

    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get("forecast", city).await?;
        Ok(parsed.list.into_iter().map(ForecastEntry::from).collect())
    }
}

/// `cod` is a number on current-weather success and a string everywhere else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(u16),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    #[serde(default)]
    cod: Option<OwCode>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl OwStatus {
    fn code(&self) -> Option<u16> {
        match self.cod.as_ref()? {
            OwCode::Number(n) => Some(*n),
            OwCode::Text(s) => s.trim().parse().ok(),
        }
    }

    fn message(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
    #[serde(default)]
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (description, icon) = condition(&parsed.weather);

        WeatherSnapshot {
            city: parsed.name,
            country: parsed.sys.country,
            description,
            icon,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
        }
    }
}

impl From<OwForecastEntry> for ForecastEntry {
    fn from(entry: OwForecastEntry) -> Self {
        let (description, icon) = condition(&entry.weather);

        ForecastEntry {
            time_text: entry.dt_txt,
            temperature_c: entry.main.temp,
            description,
            icon,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) fn current_body(name: &str) -> serde_json::Value {
        serde_json::json!({
            "cod": 200,
            "name": name,
            "sys": {"country": "GB"},
            "weather": [{"main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "main": {"temp": 14.6, "feels_like": 13.9, "humidity": 72, "pressure": 1012},
            "wind": {"speed": 4.1}
        })
    }

    pub(crate) fn forecast_body(hours: &[&str]) -> serde_json::Value {
        let list: Vec<_> = hours
            .iter()
            .enumerate()
            .map(|(i, t)| {
                serde_json::json!({
                    "dt_txt": t,
                    "main": {"temp": 10.0 + i as f64, "feels_like": 9.0, "humidity": 80, "pressure": 1010},
                    "weather": [{"description": "light rain", "icon": "10d"}]
                })
            })
            .collect();

        serde_json::json!({"cod": "200", "message": 0, "cnt": list.len(), "list": list})
    }

    #[tokio::test]
    async fn current_maps_provider_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "london"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body("London")))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("KEY", mock_server.uri());
        let snapshot = provider.current("london").await.unwrap();

        assert_eq!(snapshot.city, "London");
        assert_eq!(snapshot.country, "GB");
        assert_eq!(snapshot.description, "broken clouds");
        assert_eq!(snapshot.icon, "04d");
        assert_eq!(snapshot.temperature_c, 14.6);
        assert_eq!(snapshot.feels_like_c, 13.9);
        assert_eq!(snapshot.humidity_pct, 72);
        assert_eq!(snapshot.pressure_hpa, 1012);
        assert_eq!(snapshot.wind_speed_mps, 4.1);
    }

    #[tokio::test]
    async fn forecast_keeps_provider_order() {
        let mock_server = MockServer::start().await;
        let hours = ["2026-10-19 09:00:00", "2026-10-19 12:00:00", "2026-10-19 15:00:00"];

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&hours)))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("KEY", format!("{}/", mock_server.uri()));
        let forecast = provider.forecast("London").await.unwrap();

        let times: Vec<_> = forecast.iter().map(|e| e.time_text.as_str()).collect();
        assert_eq!(times, hours);
        assert_eq!(forecast[1].temperature_c, 11.0);
        assert_eq!(forecast[1].icon, "10d");
    }

    #[tokio::test]
    async fn string_cod_error_becomes_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("KEY", mock_server.uri());
        let err = provider.current("Atlantis").await.unwrap_err();

        match err {
            FetchError::Api { code, message } => {
                assert_eq!(code, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn cod_mismatch_with_http_ok_is_still_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("BAD", mock_server.uri());
        let err = provider.current("London").await.unwrap_err();

        assert!(err.is_api());
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn non_json_error_body_uses_http_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("KEY", mock_server.uri());
        let err = provider.forecast("London").await.unwrap_err();

        match err {
            FetchError::Api { code, message } => {
                assert_eq!(code, 502);
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cod": 200,
                "name": "London"
            })))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new("KEY", mock_server.uri());
        let err = provider.current("London").await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn missing_condition_falls_back_to_unknown() {
        let parsed: OwCurrentResponse = serde_json::from_value(serde_json::json!({
            "name": "Nowhere",
            "main": {"temp": 1.0}
        }))
        .unwrap();

        let snapshot = WeatherSnapshot::from(parsed);
        assert_eq!(snapshot.description, "Unknown");
        assert_eq!(snapshot.icon, "");
        assert_eq!(snapshot.country, "");
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn from_config_requires_api_key() {
        let err = OpenWeatherProvider::from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider = OpenWeatherProvider::new("SECRET", "http://localhost");
        assert!(!format!("{provider:?}").contains("SECRET"));
    }
}
