use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{Kelvin, ProviderError, provider::ProviderId};

use super::{TemperatureProvider, trim_base_url};

/// Weather Underground conditions endpoint. Reports Celsius, converted to Kelvin.
#[derive(Debug, Clone)]
pub struct WundergroundProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WundergroundProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: ProviderId::WeatherUnderground.default_base_url().to_string(),
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

    // Key sits in the path, city is the last segment with a `.json` suffix.
    fn url(&self, city: &str) -> String {
        format!(
            "{}/api/{}/conditions/q/{}.json",
            trim_base_url(&self.base_url),
            self.api_key,
            city
        )
    }
}

#[derive(Debug, Deserialize)]
struct WuObservation {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct WuConditionsResponse {
    current_observation: WuObservation,
}

#[async_trait]
impl TemperatureProvider for WundergroundProvider {
    async fn temperature(&self, city: &str) -> Result<Kelvin, ProviderError> {
        let res = self.http.get(self.url(city)).send().await?;
        let body = res.bytes().await?;

        let parsed: WuConditionsResponse = serde_json::from_slice(&body)?;
        let kelvin = Kelvin::from_celsius(parsed.current_observation.temp_c);

        tracing::info!(provider = %ProviderId::WeatherUnderground, city, kelvin = kelvin.value(), "temperature");
        Ok(kelvin)
    }
}
