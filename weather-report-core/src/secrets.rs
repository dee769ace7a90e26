use anyhow::{anyhow, Context, Result};
use aws_sdk_secretsmanager::Client;
use serde_json::Value;

/// One secret bundle fetched from Secrets Manager: a JSON object mapping
/// logical names to credential values.
///
/// This is an optional alternative to plain environment variables; see
/// [`crate::Config::with_secret_keys`].
#[derive(Debug, Clone)]
pub struct SecretBundle {
    values: serde_json::Map<String, Value>,
}

impl SecretBundle {
    /// Fetch the bundle identified by `secret_id`.
    pub async fn fetch(client: &Client, secret_id: &str) -> Result<Self> {
        let output = client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .with_context(|| format!("Failed to fetch secret bundle '{secret_id}'"))?;

        let raw = output
            .secret_string()
            .ok_or_else(|| anyhow!("Secret '{secret_id}' has no string payload"))?;

        Self::from_json_str(raw)
    }

    /// Parse a bundle from its JSON payload. Split out so the lookup logic
    /// is testable without the network.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let values: serde_json::Map<String, Value> =
            serde_json::from_str(raw).context("Failed to parse secret bundle JSON")?;

        Ok(Self { values })
    }

    /// Resolve the named secrets, in the same order they were requested.
    /// Fails if any name is absent from the bundle.
    pub fn values_for(&self, names: &[&str]) -> Result<Vec<String>> {
        names
            .iter()
            .map(|name| {
                let value = self
                    .values
                    .get(*name)
                    .ok_or_else(|| anyhow!("Secret bundle has no entry for '{name}'"))?;

                match value {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(anyhow!("Secret '{name}' is not a string: {other}")),
                }
            })
            .collect()
    }
}
