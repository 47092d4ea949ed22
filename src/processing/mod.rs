//! Estimate processing for the geolocation stream

pub mod estimator;

pub use estimator::{LocationEstimator, SceneLocationEstimate};
