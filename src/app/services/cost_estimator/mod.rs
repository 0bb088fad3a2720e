//! Cost estimation for parts that need attention
//!
//! Only overdue and due-soon parts are priced. The minimum service charge
//! always applies, so a vehicle with nothing due still gets an inspection
//! price rather than zero.

pub mod estimator;

#[cfg(test)]
pub mod tests;

pub use estimator::CostEstimator;
