use anyhow::{Context, Result};
use reqwest::Client;

pub const TRIGGER_ACK: &str = "Update triggered\n";

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    pub async fn health(&self) -> Result<String> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach health endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("Health check failed: {}", response.status());
        }

        Ok(response.text().await?)
    }

    /// Fires the update trigger and returns the acknowledgement body.
    pub async fn trigger_update(&self) -> Result<String> {
        let url = format!("{}/trigger-update", self.base_url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .context("Failed to trigger update")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            anyhow::bail!("Failed to trigger update: {} - Response: {}", status, body);
        }

        Ok(response.text().await?)
    }
}
