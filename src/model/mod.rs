pub mod metadata;
pub mod scorer;
pub mod types;

pub use metadata::ModelMetadata;
pub use scorer::ThresholdModel;
pub use types::{FailureLabel, Feature, Prediction, PredictionResult, ReadingError, SensorReading};
