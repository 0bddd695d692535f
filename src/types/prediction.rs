//! Prediction result returned by the pipeline

use crate::error::PredictionError;
use serde::Serialize;

/// Successful price prediction with the engineered values that fed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePrediction {
    /// Price in original target units, rounded to 2 decimal places
    pub prediction: f64,
    /// Raw model output (cube root of the price)
    pub model_output: f64,
    /// Age of the house in years at request time
    pub age: i64,
    /// 1 when the house has been renovated
    pub renovated_or_not: i64,
}

impl PricePrediction {
    /// Formatted price as shown on the result page.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.prediction)
    }
}

/// Text shown to the user: the rounded price, or `Error: <message>`.
pub fn outcome_text(outcome: &Result<PricePrediction, PredictionError>) -> String {
    match outcome {
        Ok(prediction) => prediction.display_price(),
        Err(e) => format!("Error: {}", e),
    }
}
