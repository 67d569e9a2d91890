//! Cumulus - conversational weather agent
//!
//! A webhook service implementing a multi-turn slot-filling dialog over
//! forecast and historical-climate backends.

mod api;
mod config;
mod dialog;
mod nlu;
mod phrases;
mod runtime;
mod store;
mod weather;

use api::{create_router, AppState};
use config::Config;
use nlu::LuisClient;
use runtime::{Collaborators, HttpConnector, RuntimeManager};
use std::net::SocketAddr;
use std::sync::Arc;
use store::MemoryStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather::{ForecastApi, HistoryApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cumulus=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    if !config.nlu_configured() {
        tracing::warn!(
            "No NLU credentials configured. Set CUMULUS_NLU_APP_ID and CUMULUS_NLU_KEY."
        );
    }

    // One HTTP client for every collaborator; the timeout is the only retry
    // policy there is.
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let collaborators = Collaborators {
        nlu: Arc::new(LuisClient::new(
            http.clone(),
            config.nlu_url.clone(),
            config.nlu_app_id.clone(),
            config.nlu_key.clone(),
        )),
        forecast: Arc::new(ForecastApi::new(http.clone(), config.forecast_url.clone())),
        history: Arc::new(HistoryApi::new(http.clone(), config.history_url.clone())),
        sink: Arc::new(HttpConnector::new(http, config.reply_url.clone())),
        store: Arc::new(MemoryStore::new()),
    };

    let runtime = Arc::new(RuntimeManager::new(collaborators));
    let state = AppState::new(runtime);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("cumulus listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
