//! Type definitions for the house price predictor

pub mod listing;
pub mod prediction;

pub use listing::RawListing;
pub use prediction::{outcome_text, PricePrediction};
