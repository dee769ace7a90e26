//! Core library for the scheduled weather report mailer.
//!
//! This crate defines:
//! - Configuration & credentials handling (environment or Secrets Manager)
//! - Clients for the two weather providers (OpenWeather, Weatherbit)
//! - The pure report composer
//! - The SES mailer
//!
//! It is used by `weather-report-lambda`, but can also be reused by other
//! binaries or services.

pub mod config;
pub mod mailer;
pub mod model;
pub mod provider;
pub mod report;
pub mod secrets;

pub use config::Config;
pub use mailer::Mailer;
pub use model::{Coordinate, DailyForecast, HourlyTemperature, LOCATION};
pub use provider::{CurrentWeatherProvider, ForecastProvider};
pub use report::{compose_report, pair_hourly_temperatures};
pub use secrets::SecretBundle;
