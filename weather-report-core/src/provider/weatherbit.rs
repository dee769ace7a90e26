use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::model::{Coordinate, DailyForecast};
use crate::provider::truncate_body;

use super::ForecastProvider;

const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0";

/// Weatherbit client covering both forecast endpoints.
#[derive(Debug, Clone)]
pub struct WeatherbitProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherbitProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    async fn fetch(&self, url: &str, query: &[(&str, &str)], what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Weatherbit ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Weatherbit {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Weatherbit {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

/// Weatherbit is loose about numeric types; `pop` in particular shows up as
/// integer, float or quoted number depending on the plan. Accept all three.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(v) => Ok(v),
        NumOrStr::Str(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
struct WbDailyEntry {
    #[serde(deserialize_with = "lenient_f64")]
    high_temp: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pop: f64,
    #[serde(deserialize_with = "lenient_f64")]
    precip: f64,
}

#[derive(Debug, Deserialize)]
struct WbDailyResponse {
    data: Vec<WbDailyEntry>,
}

#[derive(Debug, Deserialize)]
struct WbHourlyEntry {
    #[serde(deserialize_with = "lenient_f64")]
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WbHourlyResponse {
    data: Vec<WbHourlyEntry>,
}

#[async_trait]
impl ForecastProvider for WeatherbitProvider {
    async fn daily_forecast(&self, location: &Coordinate) -> Result<DailyForecast> {
        let url = format!("{}/forecast/daily", self.base_url);
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        let body = self
            .fetch(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("days", "1"),
                    ("key", self.api_key.as_str()),
                ],
                "daily",
            )
            .await?;

        let parsed: WbDailyResponse =
            serde_json::from_str(&body).context("Failed to parse Weatherbit daily JSON")?;

        let first = parsed
            .data
            .first()
            .ok_or_else(|| anyhow!("Weatherbit daily response contained no data"))?;

        Ok(DailyForecast {
            max_temp: first.high_temp,
            pop: first.pop,
            precip: first.precip,
        })
    }

    async fn hourly_temperatures(&self, location: &Coordinate, hours: u32) -> Result<Vec<f64>> {
        let url = format!("{}/forecast/hourly", self.base_url);
        let lat = location.lat.to_string();
        let lon = location.lon.to_string();
        let hours = hours.to_string();

        let body = self
            .fetch(
                &url,
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("key", self.api_key.as_str()),
                    ("hours", hours.as_str()),
                ],
                "hourly",
            )
            .await?;

        let parsed: WbHourlyResponse =
            serde_json::from_str(&body).context("Failed to parse Weatherbit hourly JSON")?;

        Ok(parsed.data.into_iter().map(|entry| entry.temp).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LOCATION;
    use httpmock::prelude::*;

    fn provider_for(server: &MockServer) -> WeatherbitProvider {
        WeatherbitProvider::with_base_url("TEST_KEY".to_string(), server.base_url())
    }

    #[tokio::test]
    async fn parses_first_daily_entry() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/forecast/daily")
                .query_param("days", "1")
                .query_param("key", "TEST_KEY");
            then.status(200).json_body(serde_json::json!({
                "data": [
                    {"high_temp": 21.4, "pop": 30, "precip": 0.8125, "low_temp": 9.0},
                    {"high_temp": 25.0, "pop": 0, "precip": 0.0}
                ]
            }));
        });

        let forecast = provider_for(&server)
            .daily_forecast(&LOCATION)
            .await
            .expect("fetch should succeed");

        mock.assert();
        assert_eq!(forecast, DailyForecast { max_temp: 21.4, pop: 30.0, precip: 0.8125 });
    }

    #[tokio::test]
    async fn coerces_quoted_numbers() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forecast/daily");
            then.status(200).json_body(serde_json::json!({
                "data": [{"high_temp": "21.4", "pop": "30", "precip": "0.5"}]
            }));
        });

        let forecast = provider_for(&server)
            .daily_forecast(&LOCATION)
            .await
            .expect("quoted numbers must coerce");

        assert_eq!(forecast.pop, 30.0);
        assert_eq!(forecast.precip, 0.5);
    }

    #[tokio::test]
    async fn empty_daily_data_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forecast/daily");
            then.status(200).json_body(serde_json::json!({"data": []}));
        });

        let err = provider_for(&server).daily_forecast(&LOCATION).await.unwrap_err();
        assert!(err.to_string().contains("contained no data"));
    }

    #[tokio::test]
    async fn non_numeric_field_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forecast/daily");
            then.status(200).json_body(serde_json::json!({
                "data": [{"high_temp": 21.4, "pop": "n/a", "precip": 0.0}]
            }));
        });

        let err = provider_for(&server).daily_forecast(&LOCATION).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse Weatherbit daily JSON"));
    }

    #[tokio::test]
    async fn hourly_temperatures_keep_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/forecast/hourly")
                .query_param("key", "TEST_KEY")
                .query_param("hours", "12");
            then.status(200).json_body(serde_json::json!({
                "data": [
                    {"temp": 16.0, "app_temp": 15.2},
                    {"temp": 17.5},
                    {"temp": 17.1}
                ]
            }));
        });

        let temps = provider_for(&server)
            .hourly_temperatures(&LOCATION, 12)
            .await
            .expect("fetch should succeed");

        mock.assert();
        assert_eq!(temps, vec![16.0, 17.5, 17.1]);
    }

    #[tokio::test]
    async fn hourly_error_status_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/forecast/hourly");
            then.status(429).body("rate limit exceeded");
        });

        let err = provider_for(&server)
            .hourly_temperatures(&LOCATION, 12)
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limit"));
    }
}
