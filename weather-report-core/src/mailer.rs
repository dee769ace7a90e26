use anyhow::{Context, Result};
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client;

/// Subject line of every report email.
pub const SUBJECT: &str = "weather forecast";

const CHARSET: &str = "UTF-8";

/// Thin wrapper over SES `SendEmail`. One message per invocation, no retry;
/// a rejection from the service propagates to the caller.
#[derive(Debug, Clone)]
pub struct Mailer {
    client: Client,
    sender: String,
}

impl Mailer {
    pub fn new(client: Client, sender: String) -> Self {
        Self { client, sender }
    }

    /// Send `body_text` as a plain-text email to `recipient`.
    pub async fn send(&self, recipient: &str, body_text: &str) -> Result<()> {
        let subject = Content::builder()
            .data(SUBJECT)
            .charset(CHARSET)
            .build()
            .context("Failed to build email subject")?;

        let text = Content::builder()
            .data(body_text)
            .charset(CHARSET)
            .build()
            .context("Failed to build email body")?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        let destination = Destination::builder().to_addresses(recipient).build();

        let output = self
            .client
            .send_email()
            .source(&self.sender)
            .destination(destination)
            .message(message)
            .send()
            .await
            .context("Failed to send report email via SES")?;

        tracing::info!(?output, "report email accepted by SES");

        Ok(())
    }
}
