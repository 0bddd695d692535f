//! Scaler and regression model components

pub mod inference;
pub mod loader;
pub mod regressor;
pub mod scaler;

pub use inference::PricePredictor;
pub use loader::ModelLoader;
pub use regressor::{LinearRegressor, OnnxRegressor, Regressor};
pub use scaler::StandardScaler;
