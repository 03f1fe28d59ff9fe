use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Kelvin, ProviderError, provider::ProviderId};

use super::{TemperatureProvider, trim_base_url};

/// OpenWeatherMap current-weather endpoint. Reports Kelvin natively.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: ProviderId::OpenWeatherMap.default_base_url().to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    fn url(&self, city: &str) -> String {
        format!(
            "{}/data/2.5/weather?APPID={}&q={}",
            trim_base_url(&self.base_url),
            self.api_key,
            city
        )
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
}

#[async_trait]
impl TemperatureProvider for OpenWeatherProvider {
    async fn temperature(&self, city: &str) -> Result<Kelvin, ProviderError> {
        let res = self.http.get(self.url(city)).send().await?;
        let body = res.bytes().await?;

        let parsed: OwCurrentResponse = serde_json::from_slice(&body)?;
        let kelvin = Kelvin(parsed.main.temp);

        tracing::info!(provider = %ProviderId::OpenWeatherMap, city, kelvin = kelvin.value(), "temperature");
        Ok(kelvin)
    }
}
