//! Loader for the scaler and regression model artifacts

use crate::models::regressor::{LinearRegressor, OnnxRegressor, Regressor};
use crate::models::scaler::StandardScaler;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::fs;
use std::path::Path;
use tracing::info;

/// Loader for the artifacts exported by the training pipeline
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load fitted scaler parameters from a JSON file
    pub fn load_scaler<P: AsRef<Path>>(&self, path: P) -> Result<StandardScaler> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading scaler");

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler from {:?}", path))?;
        let scaler: StandardScaler = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse scaler from {:?}", path))?;

        info!(
            features = scaler.n_features().unwrap_or(0),
            named = scaler.feature_names_in.is_some(),
            "Scaler loaded successfully"
        );

        Ok(scaler)
    }

    /// Load the regression model, picking the format from the file extension
    pub fn load_regressor<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn Regressor>> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("onnx") => Ok(Box::new(self.load_onnx(path)?)),
            Some("json") => Ok(Box::new(self.load_linear(path)?)),
            _ => anyhow::bail!(
                "Unsupported model format for {:?} (expected .onnx or .json)",
                path
            ),
        }
    }

    /// Load a linear model exported as JSON coefficients
    pub fn load_linear<P: AsRef<Path>>(&self, path: P) -> Result<LinearRegressor> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading linear model");

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model from {:?}", path))?;
        let model: LinearRegressor = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse model from {:?}", path))?;

        info!(
            coefficients = model.coefficients.len(),
            intercept = model.intercept,
            "Model loaded successfully"
        );

        Ok(model)
    }

    /// Load an ONNX regression model
    pub fn load_onnx<P: AsRef<Path>>(&self, path: P) -> Result<OnnxRegressor> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
            .to_string();

        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        let model = OnnxRegressor::new(&name, session);

        info!(
            model = %name,
            input = %model.input_name,
            output = %model.output_name,
            "Model loaded successfully"
        );

        Ok(model)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
