//! Pre-fitted standard scaler

use crate::error::PredictionError;
use serde::{Deserialize, Serialize};

/// Per-column affine standardization, `(x - mean) / scale`.
///
/// Parameters come from a scaler fitted at training time and exported as JSON.
/// A missing `mean` disables centering and a missing `scale` disables scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default, alias = "feature_names_in_")]
    pub feature_names_in: Option<Vec<String>>,
    #[serde(default, alias = "mean_")]
    pub mean: Option<Vec<f64>>,
    #[serde(default, alias = "scale_")]
    pub scale: Option<Vec<f64>>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names_in: None,
            mean: Some(mean),
            scale: Some(scale),
        }
    }

    /// Attach the column names the scaler was fitted on.
    pub fn with_feature_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.feature_names_in = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Number of columns the scaler was fitted on, if it records one.
    pub fn n_features(&self) -> Option<usize> {
        self.mean
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.scale.as_ref().map(Vec::len))
            .or_else(|| self.feature_names_in.as_ref().map(Vec::len))
    }

    /// Check the fitted parameters against the expected column layout.
    pub fn validate(&self, expected: &[&str]) -> Result<(), PredictionError> {
        for (label, params) in [("mean", &self.mean), ("scale", &self.scale)] {
            if let Some(values) = params {
                if values.len() != expected.len() {
                    return Err(PredictionError::Feature(format!(
                        "scaler {} has {} columns, expected {}",
                        label,
                        values.len(),
                        expected.len()
                    )));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(PredictionError::Artifact(format!(
                        "scaler {} contains non-finite values",
                        label
                    )));
                }
            }
        }

        if let Some(scale) = &self.scale {
            if let Some(idx) = scale.iter().position(|&s| s == 0.0) {
                return Err(PredictionError::Artifact(format!(
                    "scaler scale is zero for column '{}'",
                    expected[idx]
                )));
            }
        }

        if let Some(names) = &self.feature_names_in {
            if names.len() != expected.len() || names.iter().zip(expected).any(|(a, b)| a != b) {
                return Err(PredictionError::Feature(format!(
                    "scaler was fitted on columns {:?}, expected {:?}",
                    names, expected
                )));
            }
        }

        Ok(())
    }

    /// Scale a single row.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PredictionError> {
        for params in [&self.mean, &self.scale].into_iter().flatten() {
            if params.len() != row.len() {
                return Err(PredictionError::Feature(format!(
                    "row has {} features, but the scaler expects {}",
                    row.len(),
                    params.len()
                )));
            }
        }

        let scaled: Vec<f64> = row
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let centered = match &self.mean {
                    Some(mean) => x - mean[i],
                    None => x,
                };
                match &self.scale {
                    Some(scale) => centered / scale[i],
                    None => centered,
                }
            })
            .collect();

        if scaled.iter().any(|v| !v.is_finite()) {
            return Err(PredictionError::Artifact(
                "scaler produced non-finite values".to_string(),
            ));
        }

        Ok(scaled)
    }
}
