use anyhow::Result;
use aws_config::BehaviorVersion;
use aws_sdk_ses::config::Region;
use lambda_runtime::LambdaEvent;
use serde::Serialize;
use serde_json::Value;

use weather_report_core::{
    compose_report, pair_hourly_temperatures,
    provider::{openweather::OpenWeatherProvider, weatherbit::WeatherbitProvider},
    report, Config, CurrentWeatherProvider, ForecastProvider, Mailer, SecretBundle, LOCATION,
};

/// Hours of forecast requested from the provider. Only the first eleven end
/// up in the report.
const FORECAST_HOURS: u32 = 12;

#[derive(Debug, Serialize)]
pub struct Response {
    pub message: String,
}

/// Entry point invoked by the scheduler. The event payload carries nothing
/// the job needs, so it is ignored.
pub async fn function_handler(
    _event: LambdaEvent<Value>,
) -> Result<Response, lambda_runtime::Error> {
    tracing::info!("starting weather report run");
    let response = run_report().await?;
    tracing::info!("weather report run completed");
    Ok(response)
}

async fn run_report() -> Result<Response> {
    let mut config = Config::from_env()?;

    let aws = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;

    // Optional Secrets Manager path: only taken when a secret id is
    // configured, otherwise the plain environment keys are used as-is.
    if let Some(secret_id) = config.secret_id.clone() {
        tracing::info!(%secret_id, "resolving provider keys from Secrets Manager");
        let secrets_client = aws_sdk_secretsmanager::Client::new(&aws);
        let bundle = SecretBundle::fetch(&secrets_client, &secret_id).await?;
        config = config.with_secret_keys(&bundle)?;
    }

    let observation = OpenWeatherProvider::new(config.owm_api_key.clone());
    let forecast = WeatherbitProvider::new(config.weatherbit_api_key.clone());

    // The three fetches are independent, so they run joined rather than
    // back to back.
    let (current_temp, daily, hourly_temps) = tokio::try_join!(
        observation.current_temperature(&LOCATION),
        forecast.daily_forecast(&LOCATION),
        forecast.hourly_temperatures(&LOCATION, FORECAST_HOURS),
    )?;

    let hourly = pair_hourly_temperatures(report::local_hour(), &hourly_temps);
    let body = compose_report(current_temp, &daily, &hourly);

    let mailer = Mailer::new(aws_sdk_ses::Client::new(&aws), config.sender_email.clone());
    mailer.send(&config.receiver_email, &body).await?;

    Ok(Response {
        message: format!("weather report sent to {}", config.receiver_email),
    })
}
