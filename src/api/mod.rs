//! HTTP surface: HTML form, JSON API, health and metrics

pub mod handlers;
pub mod templates;

use crate::metrics::PipelineMetrics;
use crate::models::inference::PricePredictor;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<PricePredictor>,
    pub metrics: Arc<PipelineMetrics>,
}

impl AppState {
    pub fn new(predictor: Arc<PricePredictor>, metrics: Arc<PipelineMetrics>) -> Self {
        Self { predictor, metrics }
    }
}

/// Create the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict_form))
        .route("/api/v1/predict", post(handlers::predict_json))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
