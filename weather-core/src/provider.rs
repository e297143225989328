use crate::{
    Config, error::FetchError, model::WeatherSnapshot, provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

pub mod weatherapi;

/// Source of current weather for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions for an already-trimmed, non-empty location.
    /// Implementations issue exactly one request and never retry.
    async fn current(&self, location: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the WeatherAPI.com provider from config.
///
/// A missing API key is only logged: the provider rejects the request instead.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().unwrap_or_default();
    if api_key.is_empty() {
        warn!(
            "No API key configured; requests will fail. \
             Hint: run `weather configure` or set {}.",
            crate::config::API_KEY_ENV
        );
    }

    let provider = WeatherApiProvider::with_base_url(
        api_key.to_owned(),
        config.base_url.clone(),
        config.timeout_secs.map(std::time::Duration::from_secs),
    )?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_accepts_missing_api_key() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.timeout_secs = Some(3);

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
