use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{
    error::{Result, TempyError},
    model::RawWeatherPayload,
};

use super::{PROXY_URL, ProviderId, WeatherProvider, http_client, read_payload};

/// Keyless access through the public relay. The relay adds the API key itself
/// and reads the location from a request header.
#[derive(Debug, Clone)]
pub struct ProxyProvider {
    base_url: String,
    http: Client,
}

impl ProxyProvider {
    pub fn new() -> Result<Self> {
        Self::with_base_url(PROXY_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), http: http_client()? })
    }
}

#[async_trait]
impl WeatherProvider for ProxyProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Proxy
    }

    async fn fetch(&self, location: &str) -> Result<RawWeatherPayload> {
        let url = format!("{}/", self.base_url);

        tracing::debug!(%url, location, "requesting forecast through proxy");

        let res = self.http.get(&url).header("location", location).send().await?;

        if res.status() == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("proxy rate limit hit");
            return Err(TempyError::RateLimited);
        }

        read_payload(res, location).await
    }
}
