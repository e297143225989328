use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{config::DEFAULT_BASE_URL, error::FetchError, model::WeatherSnapshot};

use super::WeatherProvider;

/// Client for WeatherAPI.com's `current.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// The key must never reach the logs.
impl std::fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at another host, e.g. a mock server. Without a
    /// timeout the reqwest defaults apply.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    fn current_url(&self) -> String {
        format!("{}/v1/current.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaResponse> for WeatherSnapshot {
    fn from(parsed: WaResponse) -> Self {
        WeatherSnapshot::celsius(
            parsed.current.temp_c,
            parsed.current.condition.text,
            parsed.location.name,
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn current(&self, location: &str) -> Result<WeatherSnapshot, FetchError> {
        debug!("requesting current weather");

        // `query` percent-encodes the location.
        let res = self
            .http
            .get(self.current_url())
            .query(&[("key", self.api_key.as_str()), ("q", location)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "WeatherAPI current request failed"
            );
            return Err(FetchError::NotFound(status.as_u16()));
        }

        let parsed: WaResponse = serde_json::from_str(&body).inspect_err(|err| {
            warn!(error = %err, "Failed to parse WeatherAPI current JSON");
        })?;

        let snapshot = WeatherSnapshot::from(parsed);
        debug!(resolved = %snapshot.location, "weather received");

        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
