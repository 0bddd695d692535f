//! Inference pipeline: raw listing to price prediction

use crate::config::AppConfig;
use crate::error::PredictionError;
use crate::feature_extractor::{current_year, FeatureExtractor, FEATURE_NAMES};
use crate::models::loader::ModelLoader;
use crate::models::regressor::Regressor;
use crate::models::scaler::StandardScaler;
use crate::types::listing::RawListing;
use crate::types::prediction::PricePrediction;
use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::{debug, info};

/// Undo the cube-root transform applied to prices at training time.
pub fn invert_target(model_output: f64) -> f64 {
    model_output.powi(3)
}

/// Round to 2 decimal places, ties to even on the exact binary value.
///
/// Float formatting rounds the exact value, so `15.625` becomes `15.62`
/// where `(x * 100.0).round()` would give `15.63`.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Scaler and model loaded once at startup and shared read-only across requests.
pub struct PricePredictor {
    extractor: FeatureExtractor,
    scaler: StandardScaler,
    model: Box<dyn Regressor>,
}

impl PricePredictor {
    /// Build a predictor from already loaded artifacts.
    ///
    /// Fails if the scaler was fitted on a different column layout.
    pub fn new(scaler: StandardScaler, model: Box<dyn Regressor>) -> Result<Self> {
        scaler
            .validate(&FEATURE_NAMES)
            .context("Scaler does not match the model feature layout")?;

        Ok(Self {
            extractor: FeatureExtractor::new(),
            scaler,
            model,
        })
    }

    /// Load both artifacts from the configured paths.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.models.onnx_threads);
        let scaler = loader.load_scaler(config.models.scaler_path())?;
        let model = loader.load_regressor(config.models.model_path())?;

        let predictor = Self::new(scaler, model)?;
        info!(
            model = %predictor.model_name(),
            features = predictor.feature_count(),
            "Price predictor initialized"
        );
        Ok(predictor)
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn feature_count(&self) -> usize {
        self.extractor.feature_count()
    }

    /// Parse a submitted form and predict its price.
    pub fn predict_form(
        &self,
        form: &HashMap<String, String>,
    ) -> Result<PricePrediction, PredictionError> {
        let listing = RawListing::from_form(form)?;
        self.predict(&listing)
    }

    /// Predict the price of a listing as of the current calendar year.
    pub fn predict(&self, listing: &RawListing) -> Result<PricePrediction, PredictionError> {
        self.predict_for_year(listing, current_year())
    }

    /// Predict the price of a listing with `Age` computed against `year`.
    pub fn predict_for_year(
        &self,
        listing: &RawListing,
        year: i64,
    ) -> Result<PricePrediction, PredictionError> {
        let features = self.extractor.extract(listing, year)?;
        let scaled = self.scaler.transform(&features)?;
        let model_output = self.model.predict(&scaled)?;

        let price = invert_target(model_output);
        if !price.is_finite() {
            return Err(PredictionError::Artifact(format!(
                "model produced a non-finite output ({})",
                model_output
            )));
        }

        let prediction = PricePrediction {
            prediction: round_to_cents(price),
            model_output,
            age: FeatureExtractor::age(listing, year)?,
            renovated_or_not: FeatureExtractor::renovated_or_not(listing),
        };

        debug!(
            model = %self.model.name(),
            model_output = model_output,
            prediction = prediction.prediction,
            age = prediction.age,
            "Prediction complete"
        );

        Ok(prediction)
    }
}
