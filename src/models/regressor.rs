//! Regression models that map a scaled feature row to a single output

use crate::error::PredictionError;
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::debug;

/// A fitted regression model.
pub trait Regressor: Send + Sync {
    /// Name used in logs and the health endpoint.
    fn name(&self) -> &str;

    /// Predict the target for a single scaled row.
    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError>;
}

/// Linear model exported as coefficients plus intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    #[serde(alias = "coef_")]
    pub coefficients: Vec<f64>,
    #[serde(alias = "intercept_")]
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn name(&self) -> &str {
        "linear"
    }

    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        if row.len() != self.coefficients.len() {
            return Err(PredictionError::Feature(format!(
                "row has {} features, but the model expects {}",
                row.len(),
                self.coefficients.len()
            )));
        }

        let dot: f64 = row
            .iter()
            .zip(&self.coefficients)
            .map(|(x, w)| x * w)
            .sum();

        Ok(self.intercept + dot)
    }
}

/// ONNX regression graph run through ONNX Runtime.
pub struct OnnxRegressor {
    /// Model name
    pub name: String,
    /// ONNX Runtime session (`run` needs exclusive access)
    session: Mutex<Session>,
    /// Input name for the model
    pub input_name: String,
    /// Output holding the prediction
    pub output_name: String,
}

impl OnnxRegressor {
    pub fn new(name: &str, session: Session) -> Self {
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .unwrap_or_else(|| "variable".to_string());

        Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_name,
            output_name,
        }
    }
}

impl Regressor for OnnxRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &[f64]) -> Result<f64, PredictionError> {
        // Prepare input tensor - shape [1, num_features]
        let features: Vec<f32> = row.iter().map(|&v| v as f32).collect();
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features)).map_err(artifact_error)?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| PredictionError::Artifact(format!("session lock poisoned: {}", e)))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(artifact_error)?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            PredictionError::Artifact(format!("model has no output named '{}'", self.output_name))
        })?;

        // skl2onnx exports float32 by default, double when converted with double inputs
        let value = if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            data.first().map(|&v| v as f64)
        } else {
            let (_, data) = output.try_extract_tensor::<f64>().map_err(artifact_error)?;
            data.first().copied()
        };

        let value = value
            .ok_or_else(|| PredictionError::Artifact("model returned an empty output".to_string()))?;

        debug!(model = %self.name, output = value, "ONNX inference complete");
        Ok(value)
    }
}

fn artifact_error(e: ort::Error) -> PredictionError {
    PredictionError::Artifact(e.to_string())
}
