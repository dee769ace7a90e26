//! Lambda binary for the scheduled weather report.
//!
//! This crate focuses on:
//! - Runtime and telemetry initialization
//! - Wiring configuration, providers and the mailer together

use lambda_runtime::{run, service_fn, Error};

mod handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    run(service_fn(handler::function_handler)).await
}
