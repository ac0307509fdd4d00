use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{
    credential::Credential,
    error::QueryFailure,
    model::{CityQuery, WeatherRecord},
};

use super::WeatherProvider;

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    credential: Credential,
    api_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            api_url: DEFAULT_API_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/weather", self.api_url)
    }

    /// Validate raw input and fetch; blank input never reaches the network.
    pub async fn fetch(&self, raw_city: &str) -> Result<WeatherRecord, QueryFailure> {
        let city = CityQuery::parse(raw_city)?;
        self.fetch_current(&city).await
    }

    #[instrument(skip_all, fields(city = %city))]
    async fn fetch_current(&self, city: &CityQuery) -> Result<WeatherRecord, QueryFailure> {
        debug!(url = %self.endpoint(), "requesting current weather");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("q", city.as_str()),
                ("appid", self.credential.expose()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(network_failure)?;

        let status = res.status();

        if !status.is_success() {
            // Body is only logged; an unreadable one must not change the failure kind.
            let body = res.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(QueryFailure::Transport {
                status: status.as_u16(),
            });
        }

        let body = res.text().await.map_err(network_failure)?;

        parse_current(&body)
            .inspect_err(|err| warn!(error = %err, "OpenWeather payload rejected"))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_weather(&self, city: &CityQuery) -> Result<WeatherRecord, QueryFailure> {
        self.fetch_current(city).await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Decode a current-weather payload into a record.
pub fn parse_current(body: &str) -> Result<WeatherRecord, QueryFailure> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| QueryFailure::Parse(e.to_string()))?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| QueryFailure::Parse("weather list is empty".to_string()))?;

    let humidity = parsed.main.humidity;
    if !humidity.is_finite() || !(0.0..=100.0).contains(&humidity) {
        return Err(QueryFailure::Parse(format!(
            "humidity out of range: {humidity}"
        )));
    }

    Ok(WeatherRecord {
        location_name: parsed.name,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: humidity.round() as u8,
        wind_speed: parsed.wind.speed,
        condition,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

// The request URL carries the API key, so it is stripped before the error
// text can reach logs or the user.
fn network_failure(err: reqwest::Error) -> QueryFailure {
    let err = err.without_url();
    warn!(error = %err, "OpenWeather request did not complete");
    QueryFailure::Network(err.to_string())
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;

    const LAGOS: &str = r#"{
        "coord": {"lon": 3.75, "lat": 6.5833},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 29.18, "feels_like": 33.42, "temp_min": 29.18, "temp_max": 29.18, "pressure": 1011, "humidity": 74},
        "wind": {"speed": 4.63, "deg": 230},
        "dt": 1700000000,
        "name": "Lagos",
        "cod": 200
    }"#;

    #[test]
    fn decodes_lagos_fixture_exactly() {
        let record = parse_current(LAGOS).expect("fixture should decode");

        assert_eq!(record.location_name, "Lagos");
        assert_eq!(record.temperature_c, 29.18);
        assert_eq!(record.feels_like_c, 33.42);
        assert_eq!(record.humidity_pct, 74);
        assert_eq!(record.wind_speed, 4.63);
        assert_eq!(record.condition, "broken clouds");
        assert_eq!(record.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn missing_main_is_parse_failure() {
        let body = r#"{"name": "Lagos", "weather": [{"description": "rain"}], "wind": {"speed": 1.0}}"#;
        let err = parse_current(body).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
        assert!(err.to_string().contains("main"));
    }

    #[test]
    fn empty_weather_list_is_parse_failure() {
        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": 10},
                       "weather": [], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap_err().kind(), FailureKind::Parse);
    }

    #[test]
    fn wrong_field_type_is_parse_failure() {
        let body = r#"{"name": "X", "main": {"temp": "hot", "feels_like": 0.5, "humidity": 10},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap_err().kind(), FailureKind::Parse);
    }

    #[test]
    fn humidity_above_hundred_is_parse_failure() {
        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": 150},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap_err().kind(), FailureKind::Parse);
    }

    #[test]
    fn fractional_humidity_is_accepted_and_rounded() {
        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": 74.0},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap().humidity_pct, 74);

        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": 99.6},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap().humidity_pct, 100);
    }

    #[test]
    fn negative_humidity_is_parse_failure() {
        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": -1},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap_err().kind(), FailureKind::Parse);
    }

    #[test]
    fn non_json_is_parse_failure() {
        assert_eq!(parse_current("<html>").unwrap_err().kind(), FailureKind::Parse);
    }

    #[test]
    fn missing_dt_leaves_observation_empty() {
        let body = r#"{"name": "X", "main": {"temp": 1.0, "feels_like": 0.5, "humidity": 10},
                       "weather": [{"description": "clear"}], "wind": {"speed": 1.0}}"#;
        assert_eq!(parse_current(body).unwrap().observed_at, None);
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = OpenWeatherClient::new(Credential::new("KEY").unwrap())
            .with_api_url("http://localhost:1234/data/2.5/");
        assert_eq!(client.endpoint(), "http://localhost:1234/data/2.5/weather");
    }

    #[test]
    fn default_endpoint_is_public_api() {
        let client = OpenWeatherClient::new(Credential::new("KEY").unwrap());
        assert_eq!(
            client.endpoint(),
            "https://api.openweathermap.org/data/2.5/weather"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn blank_city_fails_without_network() {
        // Unroutable URL: any request attempt would surface as a network failure.
        let client = OpenWeatherClient::new(Credential::new("KEY").unwrap())
            .with_api_url("http://127.0.0.1:9");
        let err = client.fetch("   ").await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Validation);
    }
}
