//! Application constants for the fleet maintenance engine
//!
//! This module contains default thresholds, catalog values and service type
//! codes used throughout the engine. Every threshold here is only a default:
//! the live value always comes from [`crate::config::EngineConfig`].

// =============================================================================
// Odometer Reading Bounds
// =============================================================================

/// Readings below this value are treated as data entry errors (km)
pub const DEFAULT_MIN_VALID_KM: f64 = 1_000.0;

/// Readings above this value are treated as data entry errors (km)
pub const DEFAULT_MAX_VALID_KM: f64 = 2_000_000.0;

// =============================================================================
// Baseline And Validation Thresholds
// =============================================================================

/// Difference between automatic and latest candidates that needs a human look (km)
pub const DEFAULT_CONFLICT_THRESHOLD_KM: f64 = 10_000.0;

/// Daily usage above this produces a non-fatal warning (km/day)
pub const DEFAULT_HIGH_USAGE_KM_PER_DAY: f64 = 200.0;

/// Daily usage above this is rejected as implausible (km/day)
pub const DEFAULT_EXTREME_USAGE_KM_PER_DAY: f64 = 500.0;

// =============================================================================
// Scheduling And Cost Defaults
// =============================================================================

/// Share of a part interval that counts as "due soon"
pub const DEFAULT_DUE_SOON_FRACTION: f64 = 0.1;

/// Minimum service charge applied to every estimate
pub const DEFAULT_MINIMUM_CHARGE_MIN: f64 = 80.0;
pub const DEFAULT_MINIMUM_CHARGE_MAX: f64 = 150.0;

/// Currency of the default catalog prices
pub const DEFAULT_CURRENCY: &str = "MYR";

/// Days per month used when comparing elapsed time to month intervals
pub const DAYS_PER_MONTH: i64 = 30;

// =============================================================================
// External Prediction Defaults
// =============================================================================

/// Single-attempt timeout for the external prediction collaborator
pub const DEFAULT_PREDICTION_TIMEOUT_MS: u64 = 5_000;

/// Predictions below this confidence are ignored
pub const DEFAULT_PREDICTION_MIN_CONFIDENCE: f64 = 0.3;

/// Labels that describe the regular schedule rather than a distinct category
pub const GENERIC_PREDICTION_LABELS: &[&str] = &["routine_service", "routine_maintenance"];

// =============================================================================
// Service Type Codes
// =============================================================================

/// Maintenance request type codes as stored in the service history
pub mod service_type {
    pub const REPAIR: u8 = 1;
    pub const CLEANING: u8 = 2;
    pub const MAINTENANCE: u8 = 3;
    pub const INSPECTION: u8 = 4;
}

/// Keywords that identify tire work in the service summary
pub const TIRE_KEYWORDS: &[&str] = &["tayar", "tire", "tyre", "tukar tayar"];

// =============================================================================
// Processing Configuration Defaults
// =============================================================================

/// Default number of vehicles evaluated concurrently by the fleet command
pub const DEFAULT_PARALLEL_WORKERS: usize = 8;

/// Config directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "fleet-maintenance";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";
