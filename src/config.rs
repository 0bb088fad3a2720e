//! Configuration management and validation.
//!
//! Every threshold the engine uses lives here as an explicit, immutable
//! structure handed to the services, including the part catalog. Values are
//! layered: built-in defaults, then an optional JSON file, then CLI overrides.

use crate::app::models::{CostRange, ServiceType};
use crate::app::services::part_schedule::PartCatalog;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CONFLICT_THRESHOLD_KM, DEFAULT_CURRENCY,
    DEFAULT_DUE_SOON_FRACTION, DEFAULT_EXTREME_USAGE_KM_PER_DAY, DEFAULT_HIGH_USAGE_KM_PER_DAY,
    DEFAULT_MAX_VALID_KM, DEFAULT_MIN_VALID_KM, DEFAULT_MINIMUM_CHARGE_MAX,
    DEFAULT_MINIMUM_CHARGE_MIN, DEFAULT_PARALLEL_WORKERS, DEFAULT_PREDICTION_MIN_CONFIDENCE,
    DEFAULT_PREDICTION_TIMEOUT_MS, GENERIC_PREDICTION_LABELS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Bounds for classifying raw odometer values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingFilterConfig {
    /// Lowest plausible odometer value (km)
    pub min_valid_km: f64,
    /// Highest plausible odometer value (km)
    pub max_valid_km: f64,
}

impl Default for ReadingFilterConfig {
    fn default() -> Self {
        Self {
            min_valid_km: DEFAULT_MIN_VALID_KM,
            max_valid_km: DEFAULT_MAX_VALID_KM,
        }
    }
}

/// Baseline conflict detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Automatic/latest difference above which a human should choose (km)
    pub conflict_threshold_km: f64,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            conflict_threshold_km: DEFAULT_CONFLICT_THRESHOLD_KM,
        }
    }
}

/// Usage-rate thresholds for submitted mileage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Warn above this daily rate (km/day)
    pub high_usage_km_per_day: f64,
    /// Reject above this daily rate (km/day)
    pub extreme_usage_km_per_day: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            high_usage_km_per_day: DEFAULT_HIGH_USAGE_KM_PER_DAY,
            extreme_usage_km_per_day: DEFAULT_EXTREME_USAGE_KM_PER_DAY,
        }
    }
}

/// Part schedule classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Remaining share of the interval that counts as due soon
    pub due_soon_fraction: f64,
    /// Service types that never count as a part service
    pub excluded_service_types: Vec<ServiceType>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            due_soon_fraction: DEFAULT_DUE_SOON_FRACTION,
            excluded_service_types: vec![ServiceType::Cleaning],
        }
    }
}

/// Cost estimation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Floor applied to every estimate
    pub minimum_charge: CostRange,
    pub currency: String,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            minimum_charge: CostRange::new(DEFAULT_MINIMUM_CHARGE_MIN, DEFAULT_MINIMUM_CHARGE_MAX),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// External prediction collaborator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub enabled: bool,
    /// Executable receiving the request on stdin
    pub command: Option<String>,
    pub args: Vec<String>,
    /// Single-attempt timeout
    pub timeout_ms: u64,
    pub min_confidence: f64,
    /// Labels already covered by the regular schedule
    pub generic_labels: Vec<String>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: None,
            args: Vec::new(),
            timeout_ms: DEFAULT_PREDICTION_TIMEOUT_MS,
            min_confidence: DEFAULT_PREDICTION_MIN_CONFIDENCE,
            generic_labels: GENERIC_PREDICTION_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }
}

impl PredictionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Concurrency settings for fleet-wide evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub parallel_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_workers: DEFAULT_PARALLEL_WORKERS.min(num_cpus::get().max(1)),
        }
    }
}

/// Global configuration for the maintenance engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub reading_filter: ReadingFilterConfig,
    pub baseline: BaselineConfig,
    pub validation: ValidationConfig,
    pub schedule: ScheduleConfig,
    pub cost: CostConfig,
    pub prediction: PredictionConfig,
    pub performance: PerformanceConfig,
    /// Tracked parts with intervals, keywords and prices
    pub catalog: PartCatalog,
}

impl EngineConfig {
    /// Set the automatic/latest conflict threshold
    pub fn with_conflict_threshold_km(mut self, threshold_km: f64) -> Self {
        self.baseline.conflict_threshold_km = threshold_km;
        self
    }

    /// Set warning and rejection daily-rate thresholds
    pub fn with_usage_thresholds(mut self, high_km_per_day: f64, extreme_km_per_day: f64) -> Self {
        self.validation.high_usage_km_per_day = high_km_per_day;
        self.validation.extreme_usage_km_per_day = extreme_km_per_day;
        self
    }

    /// Replace the part catalog
    pub fn with_catalog(mut self, catalog: PartCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the minimum service charge
    pub fn with_minimum_charge(mut self, minimum_charge: CostRange) -> Self {
        self.cost.minimum_charge = minimum_charge;
        self
    }

    /// Enable the external prediction command
    pub fn with_prediction_command(
        mut self,
        command: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        self.prediction.enabled = true;
        self.prediction.command = Some(command.into());
        self.prediction.args = args;
        self
    }

    /// Set the prediction timeout
    pub fn with_prediction_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.prediction.timeout_ms = timeout_ms;
        self
    }

    /// Set the number of vehicles evaluated concurrently
    pub fn with_parallel_workers(mut self, workers: usize) -> Self {
        self.performance.parallel_workers = workers;
        self
    }

    /// Default config file location (`<config_dir>/fleet-maintenance/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing sections keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: EngineConfig = serde_json::from_str(&contents).map_err(|e| {
            Error::json(format!("Failed to parse config file {}", path.display()), e)
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults overlaid with an optional file
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check that thresholds are consistent and the catalog is usable
    pub fn validate(&self) -> Result<()> {
        let filter = &self.reading_filter;
        if !(filter.min_valid_km > 0.0 && filter.min_valid_km < filter.max_valid_km) {
            return Err(Error::configuration(format!(
                "Reading bounds must satisfy 0 < min < max (got {} and {})",
                filter.min_valid_km, filter.max_valid_km
            )));
        }

        if self.baseline.conflict_threshold_km < 0.0 {
            return Err(Error::configuration(
                "Baseline conflict threshold cannot be negative",
            ));
        }

        let validation = &self.validation;
        if validation.high_usage_km_per_day <= 0.0
            || validation.high_usage_km_per_day > validation.extreme_usage_km_per_day
        {
            return Err(Error::configuration(format!(
                "Usage thresholds must satisfy 0 < high <= extreme (got {} and {})",
                validation.high_usage_km_per_day, validation.extreme_usage_km_per_day
            )));
        }

        if !(0.0..1.0).contains(&self.schedule.due_soon_fraction) {
            return Err(Error::configuration(format!(
                "Due-soon fraction must be in [0, 1) (got {})",
                self.schedule.due_soon_fraction
            )));
        }

        let floor = &self.cost.minimum_charge;
        if floor.min < 0.0 || floor.min > floor.max {
            return Err(Error::configuration(format!(
                "Minimum charge must satisfy 0 <= min <= max (got {} and {})",
                floor.min, floor.max
            )));
        }

        let prediction = &self.prediction;
        if prediction.enabled && prediction.command.is_none() {
            return Err(Error::configuration(
                "Prediction is enabled but no command is configured",
            ));
        }
        if !(0.0..=1.0).contains(&prediction.min_confidence) {
            return Err(Error::configuration(format!(
                "Prediction confidence threshold must be in [0, 1] (got {})",
                prediction.min_confidence
            )));
        }

        if self.performance.parallel_workers == 0 {
            return Err(Error::configuration("Parallel workers must be at least 1"));
        }

        self.catalog.validate()
    }
}
