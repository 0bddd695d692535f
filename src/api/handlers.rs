//! Request handlers

use super::templates;
use super::AppState;
use crate::error::PredictionError;
use crate::types::listing::RawListing;
use crate::types::prediction::{outcome_text, PricePrediction};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{info, warn};

/// GET / - input form
pub async fn index() -> Html<String> {
    Html(templates::render_index())
}

/// POST /predict - form submission
///
/// Always renders the result page; failures show up as `Error: <message>`.
pub async fn predict_form(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Html<String> {
    let started = Instant::now();

    let outcome = match form {
        Ok(Form(fields)) => state.predictor.predict_form(&fields),
        Err(rejection) => Err(PredictionError::Validation(rejection.body_text())),
    };
    observe(&state, started, &outcome);

    Html(templates::render_result(&outcome_text(&outcome)))
}

/// POST /api/v1/predict - JSON object with the same fields as the form
pub async fn predict_json(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let started = Instant::now();

    let outcome = match body {
        Ok(Json(fields)) => {
            RawListing::from_json(&fields).and_then(|listing| state.predictor.predict(&listing))
        }
        Err(rejection) => Err(PredictionError::Validation(rejection.body_text())),
    };
    observe(&state, started, &outcome);

    match outcome {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let body = json!({
                "error": e.kind(),
                "message": e.to_string(),
            });
            (status, Json(body)).into_response()
        }
    }
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.predictor.model_name(),
        "features": state.predictor.feature_count(),
    }))
}

/// GET /metrics - JSON snapshot of request metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

fn observe(
    state: &AppState,
    started: Instant,
    outcome: &Result<PricePrediction, PredictionError>,
) {
    let elapsed = started.elapsed();

    match outcome {
        Ok(prediction) => {
            state.metrics.record_prediction(elapsed);
            info!(
                prediction = prediction.prediction,
                age = prediction.age,
                renovated = prediction.renovated_or_not,
                processing_time_us = elapsed.as_micros() as u64,
                "Prediction served"
            );
        }
        Err(e) => {
            state.metrics.record_error(e.kind(), elapsed);
            warn!(kind = e.kind(), error = %e, "Prediction failed");
        }
    }
}
