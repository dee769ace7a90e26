//! Pure text composition. No I/O happens here; the composer takes the three
//! fetched values and returns the finished email body.

use chrono::{Local, Timelike};
use std::fmt::Write;

use crate::model::{DailyForecast, HourlyTemperature};

/// Upper bound on hourly lines in the report, regardless of how many entries
/// the provider returns.
pub const MAX_HOURLY_ENTRIES: usize = 11;

/// Wall-clock hour (0–23) at the machine's local time.
pub fn local_hour() -> u32 {
    Local::now().hour()
}

/// Label each forecast temperature with the hour it falls on, starting at
/// `current_hour` and wrapping past midnight.
///
/// The first hourly entry from the provider corresponds to the hour after
/// "now"; any skew between fetch time and composition time is not corrected.
pub fn pair_hourly_temperatures(current_hour: u32, temps: &[f64]) -> Vec<HourlyTemperature> {
    temps
        .iter()
        .take(MAX_HOURLY_ENTRIES)
        .enumerate()
        .map(|(i, &temp)| HourlyTemperature { hour: (current_hour + i as u32) % 24, temp })
        .collect()
}

/// Build the plain-text report body.
///
/// Output is deterministic for fixed inputs; the exact byte layout (CRLF on
/// the temperature lines, trailing spaces on the rain line) is part of the
/// contract with existing recipients.
pub fn compose_report(
    current_temp: f64,
    forecast: &DailyForecast,
    hourly: &[HourlyTemperature],
) -> String {
    let mut body = format!("Current temperature is {}°C\r\n", fmt_float(current_temp));
    let _ = write!(body, "Max temperature today is {}°C\r\n", fmt_float(forecast.max_temp));

    if forecast.expects_rain() {
        let _ = write!(
            body,
            "Rain pop: {}%, Rain precip: {}mm \n",
            fmt_float(forecast.pop),
            fmt_float(forecast.precip)
        );
    } else {
        body.push_str("Rain is not expected for today. \n");
    }

    if !hourly.is_empty() {
        body.push_str("Temperature for the next hours:\n");
        for entry in hourly {
            let _ = write!(body, "\t \t{}:00 - {}°C\n", entry.hour, fmt_float(entry.temp));
        }
    }

    body
}

/// Render a float the way the report has always shown them: integral values
/// keep one decimal place (`15.0`), fractional values render shortest.
fn fmt_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
