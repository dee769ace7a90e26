use crate::model::{Coordinate, DailyForecast};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;
pub mod weatherbit;

/// Source of the current observed temperature at a coordinate.
#[async_trait]
pub trait CurrentWeatherProvider: Send + Sync + Debug {
    /// Current temperature in Celsius.
    async fn current_temperature(&self, location: &Coordinate) -> anyhow::Result<f64>;
}

/// Source of predicted weather at a coordinate.
///
/// Daily and hourly lookups are independent network calls against the same
/// provider; neither caches nor depends on the other.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// First-day forecast summary.
    async fn daily_forecast(&self, location: &Coordinate) -> anyhow::Result<DailyForecast>;

    /// Per-hour temperatures in chronological order, starting from the next
    /// hour. The provider may return fewer entries than requested.
    async fn hourly_temperatures(
        &self,
        location: &Coordinate,
        hours: u32,
    ) -> anyhow::Result<Vec<f64>>;
}

/// Keep provider error bodies readable in logs.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_passes_through() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
