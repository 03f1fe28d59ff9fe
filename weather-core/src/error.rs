use thiserror::Error;

/// Failure of a single provider call.
///
/// Both variants display the underlying error unchanged.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The upstream could not be reached or the body could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The upstream body was not JSON or lacked the temperature field.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AggregateError {
    /// The first provider failure observed, passed through as-is.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("aggregator requires at least one provider")]
    NoProviders,

    /// A provider task ended without reporting, which only happens if it panicked.
    #[error("provider task exited before reporting a temperature")]
    TaskLost,
}
