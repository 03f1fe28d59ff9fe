//! Core library for the `weather` temperature service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over upstream weather providers, normalized to Kelvin
//! - The concurrent aggregator that averages every provider's reading
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use aggregate::Aggregator;
pub use config::{Config, ProviderConfig};
pub use error::{AggregateError, ProviderError};
pub use model::{Kelvin, TemperatureReport};
pub use provider::{ProviderId, TemperatureProvider, provider_from_config, providers_from_config};
