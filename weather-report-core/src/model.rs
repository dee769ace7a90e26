use serde::{Deserialize, Serialize};

/// Geographic point queried on every invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// The one location this job reports on. Fixed for the life of the process.
pub const LOCATION: Coordinate = Coordinate { lat: 46.703321, lon: 19.851507 };

/// First-day forecast summary parsed from the Weatherbit daily endpoint.
///
/// `pop` is the probability of precipitation in percent, `precip` the
/// expected amount in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecast {
    pub max_temp: f64,
    pub pop: f64,
    pub precip: f64,
}

impl DailyForecast {
    /// Whether any rain is forecast at all.
    pub fn expects_rain(&self) -> bool {
        self.pop > 0.0 || self.precip > 0.0
    }
}

/// One forecast temperature labelled with the wall-clock hour it falls on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyTemperature {
    /// Hour of day, always 0–23.
    pub hour: u32,
    pub temp: f64,
}
