use anyhow::{Context, Result};
use std::env;

use crate::secrets::SecretBundle;

/// AWS region the mail and secret services live in.
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Everything the job needs, resolved once at startup and passed down
/// explicitly. Nothing below this struct reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verified SES sender address.
    pub sender_email: String,
    /// Address the report is delivered to.
    pub receiver_email: String,
    /// OpenWeather API key (current observation).
    pub owm_api_key: String,
    /// Weatherbit API key (daily + hourly forecast).
    pub weatherbit_api_key: String,
    /// Secrets Manager secret id holding the provider keys, if the
    /// secret-backed configuration path is in use.
    pub secret_id: Option<String>,
    pub region: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Required: `SENDER_EMAIL`, `RECEIVER_EMAIL`, `OWM_API_KEY`,
    /// `WEATHERBIT_API_KEY`. Optional: `API_KEYS` (secret id), `AWS_REGION`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            sender_email: required_var("SENDER_EMAIL")?,
            receiver_email: required_var("RECEIVER_EMAIL")?,
            owm_api_key: required_var("OWM_API_KEY")?,
            weatherbit_api_key: required_var("WEATHERBIT_API_KEY")?,
            secret_id: env::var("API_KEYS").ok(),
            region: env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
        })
    }

    /// Replace the provider API keys with values from a secret bundle.
    ///
    /// Optional alternative to plain environment variables: addresses still
    /// come from the environment, only the provider credentials move into
    /// Secrets Manager under the same logical names.
    pub fn with_secret_keys(mut self, bundle: &SecretBundle) -> Result<Self> {
        let keys = bundle.values_for(&["OWM_API_KEY", "WEATHERBIT_API_KEY"])?;
        self.owm_api_key = keys[0].clone();
        self.weatherbit_api_key = keys[1].clone();
        Ok(self)
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("Missing required environment variable {name}"))
}
