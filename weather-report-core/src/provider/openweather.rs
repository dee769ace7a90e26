use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::Coordinate;
use crate::provider::truncate_body;

use super::CurrentWeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather client, used only for the current observation.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
}

#[async_trait]
impl CurrentWeatherProvider for OpenWeatherProvider {
    async fn current_temperature(&self, location: &Coordinate) -> Result<f64> {
        let url = format!("{}/weather", self.base_url);
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        Ok(parsed.main.temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LOCATION;
    use httpmock::prelude::*;

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), server.base_url())
    }

    #[tokio::test]
    async fn parses_current_temperature() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/weather")
                .query_param("appid", "TEST_KEY")
                .query_param("units", "metric");
            then.status(200).json_body(serde_json::json!({
                "name": "Kecskemét",
                "main": {"temp": 15.3, "feels_like": 14.1, "humidity": 61},
                "weather": [{"description": "clear sky"}]
            }));
        });

        let temp = provider_for(&server)
            .current_temperature(&LOCATION)
            .await
            .expect("fetch should succeed");

        mock.assert();
        assert_eq!(temp, 15.3);
    }

    #[tokio::test]
    async fn surfaces_http_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/weather");
            then.status(401).body(r#"{"cod":401,"message":"Invalid API key"}"#);
        });

        let err = provider_for(&server)
            .current_temperature(&LOCATION)
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn fails_on_missing_temperature_field() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/weather");
            then.status(200).json_body(serde_json::json!({"main": {}}));
        });

        let err = provider_for(&server)
            .current_temperature(&LOCATION)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to parse OpenWeather current JSON"));
    }
}
