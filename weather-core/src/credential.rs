use crate::error::QueryFailure;

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// OpenWeather API key. Resolved once at startup and handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(api_key: impl Into<String>) -> Result<Self, QueryFailure> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(QueryFailure::Configuration("API key not found".to_string()));
        }
        Ok(Self(api_key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}
