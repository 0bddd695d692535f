//! House Price Predictor Library
//!
//! Serves price predictions for real-estate listings from a pre-trained
//! regression model: form fields are engineered into the training feature
//! layout, standardized with a fitted scaler, and the model's cube-root
//! output is inverted back to price units.

pub mod api;
pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod types;

pub use config::AppConfig;
pub use error::PredictionError;
pub use feature_extractor::{FeatureExtractor, FEATURE_NAMES};
pub use models::inference::PricePredictor;
pub use types::{listing::RawListing, prediction::PricePrediction};
