//! Concurrent fan-out over a set of providers with a short-circuiting mean.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{AggregateError, Kelvin, ProviderError, TemperatureProvider};

/// Queries every provider concurrently and averages their readings.
///
/// Each call spawns one task per provider. Every task reports exactly one
/// outcome into a channel sized to the provider count, so no task ever waits
/// on the reader. The first error ends the call; tasks still in flight keep
/// running to completion and their outcomes are dropped with the channel.
#[derive(Debug, Clone)]
pub struct Aggregator {
    providers: Vec<Arc<dyn TemperatureProvider>>,
}

impl Aggregator {
    pub fn new(providers: Vec<Arc<dyn TemperatureProvider>>) -> Result<Self, AggregateError> {
        if providers.is_empty() {
            return Err(AggregateError::NoProviders);
        }
        Ok(Self { providers })
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Mean temperature across all providers, or the first error observed.
    pub async fn temperature(&self, city: &str) -> Result<Kelvin, AggregateError> {
        let n = self.providers.len();
        let (tx, mut rx) = mpsc::channel::<Result<Kelvin, ProviderError>>(n);

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let city = city.to_owned();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = provider.temperature(&city).await;
                // Receiver is gone once the caller has short-circuited.
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        let mut sum = 0.0;
        for _ in 0..n {
            match rx.recv().await {
                Some(Ok(kelvin)) => sum += kelvin.value(),
                Some(Err(err)) => return Err(err.into()),
                None => return Err(AggregateError::TaskLost),
            }
        }

        Ok(Kelvin(sum / n as f64))
    }
}
