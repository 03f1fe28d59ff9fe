use crate::{
    Config, Kelvin, ProviderError,
    provider::{openweather::OpenWeatherProvider, wunderground::WundergroundProvider},
};
use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;
pub mod wunderground;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeatherMap,
    WeatherUnderground,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "openweathermap",
            ProviderId::WeatherUnderground => "wunderground",
        }
    }

    /// Every provider, in the order the aggregator queries them.
    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeatherMap, ProviderId::WeatherUnderground]
    }

    /// Environment variable consulted for the API key when the config file has none.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "OPENWEATHER_API_KEY",
            ProviderId::WeatherUnderground => "WEATHERUNDERGROUND_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::OpenWeatherMap => "http://api.openweathermap.org",
            ProviderId::WeatherUnderground => "http://api.wunderground.com",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweathermap" => Ok(ProviderId::OpenWeatherMap),
            "wunderground" => Ok(ProviderId::WeatherUnderground),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweathermap, wunderground."
            )),
        }
    }
}

/// A source of current temperature for a city, normalized to Kelvin.
#[async_trait]
pub trait TemperatureProvider: Send + Sync + Debug {
    /// Performs exactly one upstream request. `city` is forwarded verbatim.
    async fn temperature(&self, city: &str) -> Result<Kelvin, ProviderError>;
}

/// Construct a provider from config. The API key is resolved now, so calling
/// this per request picks up environment changes.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
    http: &Client,
) -> Arc<dyn TemperatureProvider> {
    let api_key = config.provider_api_key(id);
    let base_url = config.provider_base_url(id).to_owned();

    match id {
        ProviderId::OpenWeatherMap => Arc::new(
            OpenWeatherProvider::new(api_key)
                .with_base_url(base_url)
                .with_client(http.clone()),
        ),
        ProviderId::WeatherUnderground => Arc::new(
            WundergroundProvider::new(api_key)
                .with_base_url(base_url)
                .with_client(http.clone()),
        ),
    }
}

/// All providers, in [`ProviderId::all`] order.
pub fn providers_from_config(config: &Config, http: &Client) -> Vec<Arc<dyn TemperatureProvider>> {
    ProviderId::all()
        .iter()
        .map(|id| provider_from_config(*id, config, http))
        .collect()
}

pub(crate) fn trim_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
