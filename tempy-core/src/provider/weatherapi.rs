use async_trait::async_trait;
use reqwest::Client;

use crate::{error::Result, model::RawWeatherPayload};

use super::{API_BASE, FORECAST_DAYS, ProviderId, WeatherProvider, http_client, read_payload};

/// Direct access to weatherapi.com with the user's own key.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, API_BASE)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        Ok(Self { api_key, base_url: base_url.trim_end_matches('/').to_string(), http: http_client()? })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    async fn fetch(&self, location: &str) -> Result<RawWeatherPayload> {
        let url = format!("{}/forecast.json", self.base_url);
        let days = FORECAST_DAYS.to_string();

        tracing::debug!(%url, location, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", days.as_str()),
                ("aqi", "yes"),
                ("alerts", "yes"),
            ])
            .send()
            .await?;

        read_payload(res, location).await
    }
}
