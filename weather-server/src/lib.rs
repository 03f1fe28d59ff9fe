//! HTTP surface for the `weather` service.
//!
//! Routes:
//! - `GET /hello` returns a plain greeting
//! - `GET /weather/{city}` returns the mean Kelvin temperature across every provider

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::{net::TcpListener, sync::oneshot};
use weather_core::{Aggregator, Config, TemperatureReport, providers_from_config};

/// Shared, read-only state. Providers and the aggregator are built per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/weather/", get(weather_without_city))
        .route("/weather/{*city}", get(weather))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn weather(State(state): State<AppState>, Path(city): Path<String>) -> Response {
    respond(&state, city).await
}

// An empty segment is forwarded as an empty city; the upstreams decide what that means.
async fn weather_without_city(State(state): State<AppState>) -> Response {
    respond(&state, String::new()).await
}

async fn respond(state: &AppState, city: String) -> Response {
    let begin = Instant::now();

    let providers = providers_from_config(&state.config, &state.http);
    let result = match Aggregator::new(providers) {
        Ok(aggregator) => aggregator.temperature(&city).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(temp) => {
            let took = begin.elapsed();
            tracing::info!(city = %city, %temp, ?took, "weather request served");

            let report = TemperatureReport {
                city,
                temp,
                took: format!("{took:?}"),
            };
            match serde_json::to_string(&report) {
                Ok(body) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                    body,
                )
                    .into_response(),
                Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
            }
        }
        Err(err) => {
            tracing::warn!(city = %city, error = %err, "weather request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// Handle returned by [`serve`]: the bound port and a shutdown trigger.
pub struct ServeHandle {
    pub port: u16,
    shutdown_tx: Option<oneshot::Sender<()>>,
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Bind `bind` and start serving in a spawned task.
pub async fn serve(config: Config, bind: &str) -> Result<ServeHandle> {
    let app = router(AppState::new(config));

    let listener = TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("weather service listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
