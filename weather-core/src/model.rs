use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QueryFailure;

/// A city name as typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(raw: &str) -> Result<Self, QueryFailure> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryFailure::Validation(
                "City name cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = QueryFailure;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Current conditions for one location, as returned by a successful query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    /// Upstream units; metres per second for metric requests.
    pub wind_speed: f64,
    pub condition: String,
    pub observed_at: Option<DateTime<Utc>>,
}
