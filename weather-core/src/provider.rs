use crate::{
    Config, QueryFailure,
    model::{CityQuery, WeatherRecord},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a validated city.
///
/// Implementations issue at most one upstream request per call and never
/// retry; every failure is classified into a [`QueryFailure`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_weather(&self, city: &CityQuery) -> Result<WeatherRecord, QueryFailure>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for std::sync::Arc<P> {
    async fn fetch_weather(&self, city: &CityQuery) -> Result<WeatherRecord, QueryFailure> {
        (**self).fetch_weather(city).await
    }
}

/// Construct the OpenWeather client from config, resolving the credential once.
pub fn client_from_config(config: &Config) -> Result<OpenWeatherClient, QueryFailure> {
    let credential = config.resolve_credential()?;

    let client = match config.api_url() {
        Some(url) => OpenWeatherClient::new(credential).with_api_url(url),
        None => OpenWeatherClient::new(credential),
    };

    Ok(client)
}
