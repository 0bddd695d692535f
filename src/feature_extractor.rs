//! Feature engineering for house price model inference.
//!
//! Turns a raw listing into the row the scaler and regression model were
//! fitted on: the two year fields are replaced by `Age` and `RenovatedOrNot`
//! and the columns are laid out in training order.

use crate::error::PredictionError;
use crate::types::listing::RawListing;
use chrono::{Datelike, Local};

/// Final column order the model was trained on.
///
/// Fixed at training time; any artifact upgrade that changes it must change this too.
pub const FEATURE_NAMES: [&str; 18] = [
    "number of bedrooms",
    "number of bathrooms",
    "living area",
    "lot area",
    "number of floors",
    "waterfront present",
    "number of views",
    "condition of the house",
    "grade of the house",
    "Area of the basement",
    "Age",
    "RenovatedOrNot",
    "Postal Code",
    "Lattitude",
    "Longitude",
    "lot_area_renov",
    "Number of schools nearby",
    "Distance from the airport",
];

/// Number of columns in the model input row.
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Calendar year of the local wall clock.
///
/// `Age` depends on it, so predictions for the same listing shift when the year turns.
pub fn current_year() -> i64 {
    Local::now().year() as i64
}

/// Feature extractor that transforms listings into model input rows.
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Years since the house was built.
    pub fn age(listing: &RawListing, current_year: i64) -> Result<i64, PredictionError> {
        current_year
            .checked_sub(listing.built_year)
            .ok_or_else(|| PredictionError::Validation("built_year out of range".to_string()))
    }

    /// 1 if the house has a renovation year on record, else 0.
    pub fn renovated_or_not(listing: &RawListing) -> i64 {
        if listing.renovation_year > 0 {
            1
        } else {
            0
        }
    }

    /// Build the model input row for `listing` as of `current_year`.
    ///
    /// Order matches [`FEATURE_NAMES`].
    pub fn extract(
        &self,
        listing: &RawListing,
        current_year: i64,
    ) -> Result<Vec<f64>, PredictionError> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);

        features.push(listing.bedrooms);
        features.push(listing.bathrooms);
        features.push(listing.living_area);
        features.push(listing.lot_area);
        features.push(listing.floors);
        features.push(listing.waterfront as f64);
        features.push(listing.views as f64);
        features.push(listing.condition as f64);
        features.push(listing.grade as f64);
        features.push(listing.basement_area);

        // Engineered (replace built_year / renovation_year)
        features.push(Self::age(listing, current_year)? as f64);
        features.push(Self::renovated_or_not(listing) as f64);

        features.push(listing.postal_code as f64);
        features.push(listing.latitude);
        features.push(listing.longitude);
        features.push(listing.lot_area_renov);
        features.push(listing.schools_nearby as f64);
        features.push(listing.airport_distance);

        Ok(features)
    }

    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::listing::tests::sample_form;

    fn sample_listing() -> RawListing {
        RawListing::from_form(&sample_form()).unwrap()
    }

    #[test]
    fn test_feature_order_is_fixed() {
        assert_eq!(FEATURE_COUNT, 18);
        assert_eq!(FEATURE_NAMES[0], "number of bedrooms");
        assert_eq!(FEATURE_NAMES[9], "Area of the basement");
        assert_eq!(FEATURE_NAMES[10], "Age");
        assert_eq!(FEATURE_NAMES[11], "RenovatedOrNot");
        assert_eq!(FEATURE_NAMES[12], "Postal Code");
        assert_eq!(FEATURE_NAMES[17], "Distance from the airport");
        assert!(!FEATURE_NAMES.contains(&"built_year"));
        assert!(!FEATURE_NAMES.contains(&"renovation_year"));
    }

    #[test]
    fn test_feature_extraction() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract(&sample_listing(), 2025).unwrap();

        assert_eq!(features.len(), extractor.feature_count());
        assert_eq!(
            features,
            vec![
                3.0, 2.0, 1800.0, 5000.0, 1.0, 0.0, 0.0, 3.0, 7.0, 0.0, 30.0, 0.0, 98001.0, 47.5,
                -122.3, 5000.0, 2.0, 10.0,
            ]
        );
    }

    #[test]
    fn test_age_uses_given_year() {
        let listing = sample_listing();
        assert_eq!(FeatureExtractor::age(&listing, 2025).unwrap(), 30);
        assert_eq!(FeatureExtractor::age(&listing, 1995).unwrap(), 0);
        assert_eq!(
            FeatureExtractor::age(&listing, current_year()).unwrap(),
            current_year() - 1995
        );
    }

    #[test]
    fn test_renovated_flag() {
        let mut listing = sample_listing();
        assert_eq!(FeatureExtractor::renovated_or_not(&listing), 0);

        listing.renovation_year = 2010;
        assert_eq!(FeatureExtractor::renovated_or_not(&listing), 1);
        let features = FeatureExtractor::new().extract(&listing, 2025).unwrap();
        assert_eq!(features[11], 1.0);

        listing.renovation_year = -1;
        assert_eq!(FeatureExtractor::renovated_or_not(&listing), 0);
    }

    #[test]
    fn test_feature_count_independent_of_values() {
        let extractor = FeatureExtractor::new();
        let mut listing = sample_listing();
        listing.bedrooms = 0.0;
        listing.built_year = 2100;
        listing.renovation_year = 1;

        let features = extractor.extract(&listing, 2025).unwrap();
        assert_eq!(features.len(), 18);
        assert_eq!(features[10], -75.0);
        assert_eq!(extractor.feature_names().len(), 18);
    }

    #[test]
    fn test_extreme_built_year() {
        let extractor = FeatureExtractor::new();
        let mut listing = sample_listing();

        listing.built_year = i64::MIN;
        let err = extractor.extract(&listing, 2025).unwrap_err();
        assert_eq!(err, PredictionError::Validation("built_year out of range".to_string()));

        listing.built_year = i64::MAX;
        let features = extractor.extract(&listing, 2025).unwrap();
        assert_eq!(features[10], (2025 - i64::MAX) as f64);
    }

    #[test]
    fn test_extreme_renovation_year() {
        let extractor = FeatureExtractor::new();
        let mut listing = sample_listing();

        listing.renovation_year = i64::MAX;
        assert_eq!(extractor.extract(&listing, 2025).unwrap()[11], 1.0);

        listing.renovation_year = i64::MIN;
        assert_eq!(extractor.extract(&listing, 2025).unwrap()[11], 0.0);
    }
}
