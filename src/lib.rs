//! Fleet Maintenance Library
//!
//! A Rust library for reconciling messy fleet odometer histories and turning them
//! into a prioritized maintenance plan.
//!
//! This library provides tools for:
//! - Cleaning and classifying free-text odometer readings
//! - Selecting a trustworthy mileage baseline and flagging conflicts with the latest entry
//! - Validating newly submitted mileage against that baseline
//! - Finding overdue, due-soon and scheduled maintenance per part category
//! - Estimating cost and labor for items that need attention
//! - Building a prioritized action plan, optionally informed by an external prediction

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod baseline;
        pub mod cost_estimator;
        pub mod maintenance_engine;
        pub mod mileage_validator;
        pub mod part_schedule;
        pub mod prediction;
        pub mod reading_filter;
        pub mod recommendation;
    }
    pub mod adapters {
        pub mod history_file;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Baseline, MaintenanceReport, PartDefinition, PartStatus, RawReading, Recommendation,
    ValidationResult,
};
pub use app::services::maintenance_engine::MaintenanceEngine;
pub use config::EngineConfig;

/// Result type alias for the fleet maintenance engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for reconciliation, scheduling and the surrounding plumbing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No reading in the history passed the validity checks
    #[error(
        "No reliable mileage baseline for vehicle '{vehicle_id}': all {rejected} readings were rejected"
    )]
    NoReliableBaseline { vehicle_id: String, rejected: usize },

    /// Submitted mileage is below the baseline
    #[error("Mileage went backwards: baseline {baseline:.0}, submitted {submitted}")]
    BackwardsMileage { baseline: f64, submitted: u64 },

    /// Implied daily usage is implausible
    #[error(
        "Extreme usage rate: {daily_rate:.0} km/day over {days} day(s) exceeds the {limit:.0} km/day limit"
    )]
    ExtremeUsageRate {
        daily_rate: f64,
        limit: f64,
        days: i64,
    },

    /// Vehicle has no history at all
    #[error("Unknown vehicle '{vehicle_id}': no service history recorded")]
    UnknownVehicle { vehicle_id: String },

    /// External prediction could not be obtained (never fatal for a report)
    #[error("External prediction unavailable: {reason}")]
    ExternalPredictionUnavailable { reason: String },

    /// Caller asked for a baseline candidate that cannot be used
    #[error("Baseline choice unavailable: {reason}")]
    BaselineChoiceUnavailable { reason: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a no-reliable-baseline error
    pub fn no_reliable_baseline(vehicle_id: impl Into<String>, rejected: usize) -> Self {
        Self::NoReliableBaseline {
            vehicle_id: vehicle_id.into(),
            rejected,
        }
    }

    /// Create a backwards mileage error
    pub fn backwards_mileage(baseline: f64, submitted: u64) -> Self {
        Self::BackwardsMileage {
            baseline,
            submitted,
        }
    }

    /// Create an extreme usage rate error
    pub fn extreme_usage_rate(daily_rate: f64, limit: f64, days: i64) -> Self {
        Self::ExtremeUsageRate {
            daily_rate,
            limit,
            days,
        }
    }

    /// Create an unknown vehicle error
    pub fn unknown_vehicle(vehicle_id: impl Into<String>) -> Self {
        Self::UnknownVehicle {
            vehicle_id: vehicle_id.into(),
        }
    }

    /// Create an external prediction unavailable error
    pub fn prediction_unavailable(reason: impl Into<String>) -> Self {
        Self::ExternalPredictionUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a baseline choice unavailable error
    pub fn baseline_choice_unavailable(reason: impl Into<String>) -> Self {
        Self::BaselineChoiceUnavailable {
            reason: reason.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Whether the error ends the request rather than degrading it
    ///
    /// Validation failures are terminal: downstream scheduling depends on a
    /// trustworthy current mileage.
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::UnknownVehicle { .. } | Self::ExternalPredictionUnavailable { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}
