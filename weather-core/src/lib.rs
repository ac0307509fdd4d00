//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Credential and configuration handling
//! - The OpenWeather query client behind the [`WeatherProvider`] trait
//! - The query state controller that owns the displayed snapshot
//! - The feels-like icon classifier
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod icon;
pub mod model;
pub mod provider;

pub use config::{Config, OpenWeatherConfig};
pub use controller::{QueryController, QueryOutcome, QueryPhase, QuerySnapshot};
pub use credential::Credential;
pub use error::{FailureKind, QueryFailure};
pub use icon::{IconCategory, classify};
pub use model::{CityQuery, WeatherRecord};
pub use provider::{WeatherProvider, client_from_config, openweather::OpenWeatherClient};
