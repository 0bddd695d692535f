use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use house_price_predictor::{
    api::{self, AppState},
    feature_extractor::{current_year, FEATURE_COUNT},
    metrics::PipelineMetrics,
    models::{inference::round_to_cents, LinearRegressor, PricePredictor, StandardScaler},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

const SAMPLE_FORM: &str = "bedrooms=3&bathrooms=2&living_area=1800&lot_area=5000&floors=1\
&waterfront=0&views=0&condition=3&grade=7&basement_area=0&built_year=1995&renovation_year=0\
&postal_code=98001&latitude=47.5&longitude=-122.3&lot_area_renov=5000&schools_nearby=2\
&airport_distance=10.0";

/// Model whose output is `50 + Age`, so the price is `(50 + Age)^3`.
fn test_app() -> (Router, Arc<PipelineMetrics>) {
    let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]);
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[10] = 1.0;
    let model = LinearRegressor::new(coefficients, 50.0);

    let predictor = Arc::new(PricePredictor::new(scaler, Box::new(model)).unwrap());
    let metrics = Arc::new(PipelineMetrics::new());
    (api::router(AppState::new(predictor, metrics.clone())), metrics)
}

fn expected_price() -> f64 {
    let output = 50.0 + (current_year() - 1995) as f64;
    round_to_cents(output.powi(3))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"airport_distance\""));
}

#[tokio::test]
async fn test_form_prediction() {
    let (app, metrics) = test_app();

    let response = app.oneshot(form_request(SAMPLE_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(&format!("{:.2}", expected_price())), "{}", html);
    assert!(!html.contains("Error:"));
    assert_eq!(metrics.snapshot().predictions_served, 1);
}

#[tokio::test]
async fn test_form_invalid_value_renders_error() {
    let (app, metrics) = test_app();
    let body = SAMPLE_FORM.replace("bedrooms=3", "bedrooms=abc");

    let response = app.oneshot(form_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Error: could not convert"), "{}", html);
    assert!(html.contains("bedrooms"));
    assert_eq!(metrics.snapshot().errors_by_kind.get("validation"), Some(&1));
}

#[tokio::test]
async fn test_form_out_of_range_built_year_renders_error() {
    let (app, metrics) = test_app();
    let body = SAMPLE_FORM.replace("built_year=1995", "built_year=-9223372036854775808");

    let response = app.oneshot(form_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Error: built_year out of range"), "{}", html);
    assert_eq!(metrics.snapshot().errors_by_kind.get("validation"), Some(&1));
}

#[tokio::test]
async fn test_form_missing_field_renders_error() {
    let (app, _) = test_app();
    let body = SAMPLE_FORM.replace("&schools_nearby=2", "");

    let response = app.oneshot(form_request(&body)).await.unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Error: missing field"), "{}", html);
}

#[tokio::test]
async fn test_form_wrong_content_type_renders_error() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("Content-Type", "text/plain")
                .body(Body::from(SAMPLE_FORM))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Error:"));
}

#[tokio::test]
async fn test_json_prediction() {
    let (app, _) = test_app();
    let body = json!({
        "bedrooms": 3, "bathrooms": 2, "living_area": 1800, "lot_area": 5000,
        "floors": 1, "waterfront": 0, "views": 0, "condition": 3, "grade": 7,
        "basement_area": 0, "built_year": 1995, "renovation_year": 2005,
        "postal_code": 98001, "lattitude": 47.5, "longitude": -122.3,
        "lot_area_renov": 5000, "schools_nearby": 2, "airport_distance": "10.0"
    });

    let response = app.oneshot(json_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let result: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(result["prediction"].as_f64(), Some(expected_price()));
    assert_eq!(result["age"].as_i64(), Some(current_year() - 1995));
    assert_eq!(result["renovated_or_not"].as_i64(), Some(1));
}

#[tokio::test]
async fn test_json_validation_error_is_422() {
    let (app, _) = test_app();

    let response = app
        .oneshot(json_request(&json!({ "bedrooms": "abc" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let result: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(result["error"], "validation");
}

#[tokio::test]
async fn test_json_artifact_error_is_500() {
    let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]);
    // Wrong width: the model was exported for a different feature layout
    let model = LinearRegressor::new(vec![0.0; 16], 50.0);
    let predictor = Arc::new(PricePredictor::new(scaler, Box::new(model)).unwrap());
    let app = api::router(AppState::new(predictor, Arc::new(PipelineMetrics::new())));

    let fields: Value = SAMPLE_FORM
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect::<serde_json::Map<_, _>>()
        .into();

    let response = app.oneshot(json_request(&fields)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let result: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(result["error"], "feature");
}

#[tokio::test]
async fn test_health_and_metrics() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(health["model"], "linear");
    assert_eq!(health["features"], 18);

    app.clone().oneshot(form_request(SAMPLE_FORM)).await.unwrap();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let snapshot: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(snapshot["requests_received"], 1);
    assert_eq!(snapshot["predictions_served"], 1);
}
