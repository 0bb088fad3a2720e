//! Maintenance engine
//!
//! Ties the services together for one vehicle:
//!
//! 1. Filter the history and select a baseline
//! 2. Validate the submitted mileage against it (terminal on failure)
//! 3. Analyze parts, estimate cost
//! 4. Ask the external predictor once, with a timeout
//! 5. Build the recommendation and the report
//!
//! A vehicle with no history at all is reported as newly tracked instead of
//! failing.

pub mod engine;
pub mod request;

#[cfg(test)]
pub mod tests;

pub use engine::MaintenanceEngine;
pub use request::EvaluationRequest;
