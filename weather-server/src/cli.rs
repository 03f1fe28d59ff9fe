use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_core::{Aggregator, Config, ProviderId, providers_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Multi-provider temperature service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service until ctrl-c.
    Serve {
        /// Listen address; overrides `bind` from the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Query every provider once and print the mean temperature.
    Show {
        /// City name, passed to the providers as-is.
        city: String,
    },

    /// Store an API key for a provider in the config file.
    Configure {
        /// Provider short name, e.g. "openweathermap" or "wunderground".
        provider: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config_path = self.config;
        let config = load_config(config_path.as_deref())?;

        match self.command {
            Command::Serve { bind } => {
                let bind = bind.unwrap_or_else(|| config.bind_address().to_string());
                let handle = weather_server::serve(config, &bind).await?;

                tokio::signal::ctrl_c()
                    .await
                    .context("Failed to install ctrl-c handler")?;
                handle.shutdown().await?;
                tracing::info!("weather service shut down");
            }
            Command::Show { city } => {
                let aggregator =
                    Aggregator::new(providers_from_config(&config, &reqwest::Client::new()))?;
                let temp = aggregator.temperature(&city).await?;
                println!("{city}: {temp} ({:.2}°C)", temp.to_celsius());
            }
            Command::Configure { provider } => {
                let id = ProviderId::try_from(provider.as_str())?;
                let api_key = Password::new(&format!("API key for {id}:"))
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                let mut config = config;
                config.set_provider_api_key(id, api_key);
                save_config(config_path.as_deref(), &config)?;
                println!("Saved API key for {id}.");
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn save_config(path: Option<&Path>, config: &Config) -> Result<()> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
}
