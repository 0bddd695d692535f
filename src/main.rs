//! House Price Predictor - Main Entry Point
//!
//! Loads the scaler and model artifacts once, then serves the prediction form
//! and JSON API over HTTP.

use anyhow::{Context, Result};
use house_price_predictor::{
    api::{self, AppState},
    config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH},
    metrics::{MetricsReporter, PipelineMetrics},
    models::inference::PricePredictor,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (optional path as first argument)
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load_from_path(&config_path)?;

    init_logging(&config.logging)?;
    info!(path = %config_path, "Configuration loaded successfully");
    info!("Starting House Price Predictor");

    // Artifacts are loaded once and shared read-only by every request
    let predictor = Arc::new(PricePredictor::from_config(&config)?);
    info!(
        model = %predictor.model_name(),
        features = predictor.feature_count(),
        "Artifacts loaded"
    );

    let metrics = Arc::new(PipelineMetrics::new());

    if config.metrics.report_interval_secs > 0 {
        let reporter = MetricsReporter::new(metrics.clone(), config.metrics.report_interval_secs);
        tokio::spawn(reporter.start());
    }

    let app = api::router(AppState::new(predictor, metrics.clone()));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // Print final summary
    info!("Server shutting down...");
    metrics.print_summary();

    Ok(())
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(format!(
            "house_price_predictor={level},tower_http={level}",
            level = logging.level
        )),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
