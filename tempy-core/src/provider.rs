use crate::{
    config::ResolvedConfig,
    error::{Result, TempyError},
    model::RawWeatherPayload,
    provider::{proxy::ProxyProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::{fmt::Debug, time::Duration};

pub mod proxy;
pub mod weatherapi;

/// weatherapi.com REST base.
pub const API_BASE: &str = "https://api.weatherapi.com/v1";

/// Public relay used when the user has no API key of their own.
pub const PROXY_URL: &str = "http://noprobelm.dev:80";

/// Today plus two days.
pub const FORECAST_DAYS: u8 = 3;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    WeatherApi,
    Proxy,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::Proxy => "proxy",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Fetch the raw forecast payload for `location`.
    ///
    /// Fails with [`TempyError::Upstream`] when the body carries an `error` object.
    async fn fetch(&self, location: &str) -> Result<RawWeatherPayload>;
}

/// Pick the authenticated endpoint when an API key is configured, the proxy otherwise.
pub fn provider_for(config: &ResolvedConfig) -> Result<Box<dyn WeatherProvider>> {
    let boxed: Box<dyn WeatherProvider> = match config.api_key.as_deref() {
        Some(key) => Box::new(WeatherApiProvider::new(key.to_owned())?),
        None => Box::new(ProxyProvider::new()?),
    };

    tracing::debug!(provider = %boxed.id(), "selected weather provider");
    Ok(boxed)
}

pub(crate) fn http_client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Decode a response body as JSON and surface provider error objects.
///
/// The HTTP status is not checked here: weatherapi.com reports bad locations as a
/// 400 with an `error` body, which should reach the user verbatim.
pub(crate) async fn read_payload(res: Response, location: &str) -> Result<RawWeatherPayload> {
    let status = res.status();
    let body = res.text().await?;

    let value = serde_json::from_str(&body).map_err(|err| {
        TempyError::MalformedResponse(format!(
            "status {status}, invalid JSON ({err}): {}",
            truncate_body(&body)
        ))
    })?;

    let payload = RawWeatherPayload(value);
    if let Some(message) = payload.error_message() {
        return Err(TempyError::Upstream {
            message: message.to_string(),
            location: location.to_string(),
        });
    }

    Ok(payload)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;

    fn config(api_key: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            location: "nyc".into(),
            units: Units::Imperial,
            api_key: api_key.map(str::to_owned),
        }
    }

    #[test]
    fn api_key_selects_weatherapi() {
        let provider = provider_for(&config(Some("KEY"))).unwrap();
        assert_eq!(provider.id(), ProviderId::WeatherApi);
    }

    #[test]
    fn missing_api_key_selects_proxy() {
        let provider = provider_for(&config(None)).unwrap();
        assert_eq!(provider.id(), ProviderId::Proxy);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "°".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
