//! External prediction collaborator
//!
//! An optional, best-effort label about the vehicle (for example
//! `high_maintenance_vehicle`) from an outside model. Every failure mode maps
//! to `ExternalPredictionUnavailable` so the engine can fall back to the
//! rule-based plan.
//!
//! # Architecture
//!
//! - [`predictor`] - The [`Predictor`] trait plus disabled and config-selected predictors
//! - [`command`] - Subprocess predictor speaking JSON over stdin/stdout
//! - [`summary`] - Request payload built from the service history

pub mod command;
pub mod predictor;
pub mod summary;

#[cfg(test)]
pub mod tests;

pub use command::{CommandPredictor, parse_prediction_output};
pub use predictor::{ConfiguredPredictor, DisabledPredictor, Predictor};
pub use summary::{PredictionRequest, ServiceSummary};
