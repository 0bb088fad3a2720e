//! Core data models for mileage reconciliation and maintenance scheduling
//!
//! Raw service records come in from the history store, get classified into
//! parsed readings, reduced to a baseline, and finally turned into part
//! statuses, a cost estimate and a recommendation. Everything derived here is
//! recomputed per request and never persisted.

use crate::constants::service_type;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maintenance request type attached to every service record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Repair,
    Cleaning,
    Maintenance,
    Inspection,
    Other(u8),
    Unknown,
}

impl ServiceType {
    /// Parse a free-text type code such as `"3"` or `" 1 "`
    pub fn from_code(code: &str) -> Self {
        match code.trim().parse::<u8>() {
            Ok(service_type::REPAIR) => ServiceType::Repair,
            Ok(service_type::CLEANING) => ServiceType::Cleaning,
            Ok(service_type::MAINTENANCE) => ServiceType::Maintenance,
            Ok(service_type::INSPECTION) => ServiceType::Inspection,
            Ok(other) => ServiceType::Other(other),
            Err(_) => ServiceType::Unknown,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Repair => write!(f, "Repair"),
            ServiceType::Cleaning => write!(f, "Cleaning/Washing"),
            ServiceType::Maintenance => write!(f, "Maintenance"),
            ServiceType::Inspection => write!(f, "Inspection"),
            ServiceType::Other(code) => write!(f, "Other ({})", code),
            ServiceType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One service record exactly as it was entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub vehicle_id: String,
    /// Odometer value as free text
    pub raw_value: String,
    /// `None` when the source row had no usable date
    pub recorded_at: Option<DateTime<Utc>>,
    pub record_id: String,
    pub description: String,
    pub response_text: String,
    pub service_type: ServiceType,
}

impl RawReading {
    /// Lower-cased description and response, used for keyword matching
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.description, self.response_text).to_lowercase()
    }
}

/// Classification of a raw odometer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidityVerdict {
    Valid,
    ZeroOrEmpty,
    NonNumeric,
    TooLow,
    TooHigh,
}

impl ValidityVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidityVerdict::Valid)
    }
}

impl fmt::Display for ValidityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidityVerdict::Valid => write!(f, "valid"),
            ValidityVerdict::ZeroOrEmpty => write!(f, "zero or empty"),
            ValidityVerdict::NonNumeric => write!(f, "non-numeric"),
            ValidityVerdict::TooLow => write!(f, "too low"),
            ValidityVerdict::TooHigh => write!(f, "too high"),
        }
    }
}

/// A reading whose odometer value parsed and passed the validity bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReading {
    pub mileage: f64,
    pub recorded_at: DateTime<Utc>,
    pub record_id: String,
    pub source: RawReading,
}

/// A reading that was excluded from the Valid set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedReading {
    pub verdict: ValidityVerdict,
    pub reading: RawReading,
}

/// Why a baseline candidate was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionReason {
    HighestValidReading,
    LatestEntry,
}

impl fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionReason::HighestValidReading => write!(f, "highest valid reading"),
            SelectionReason::LatestEntry => write!(f, "latest entry selected by caller"),
        }
    }
}

/// Reference mileage for one vehicle and history snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub mileage: f64,
    pub recorded_at: DateTime<Utc>,
    pub record_id: String,
    pub selection_reason: SelectionReason,
    pub conflicts_with_latest: bool,
}

/// One of the two readings the baseline can be taken from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineCandidate {
    /// `None` when the raw value did not parse
    pub mileage: Option<f64>,
    pub recorded_at: DateTime<Utc>,
    pub record_id: String,
    /// Rejection reason when the candidate failed validation
    pub issue: Option<ValidityVerdict>,
}

/// Outcome code of a mileage submission check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationCode {
    Normal,
    HighUsageWarning,
    NoMovementRecorded,
    BackwardsMileage,
    ExtremeUsageRate,
    NewVehicle,
}

impl ValidationCode {
    /// Whether the caller may continue to scheduling
    pub fn is_acceptable(&self) -> bool {
        !matches!(
            self,
            ValidationCode::BackwardsMileage | ValidationCode::ExtremeUsageRate
        )
    }

    /// Whether the submission is accepted but deserves a second look
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ValidationCode::HighUsageWarning | ValidationCode::NoMovementRecorded
        )
    }
}

impl fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCode::Normal => write!(f, "NORMAL"),
            ValidationCode::HighUsageWarning => write!(f, "HIGH_USAGE_WARNING"),
            ValidationCode::NoMovementRecorded => write!(f, "NO_MOVEMENT_RECORDED"),
            ValidationCode::BackwardsMileage => write!(f, "MILEAGE_BACKWARDS"),
            ValidationCode::ExtremeUsageRate => write!(f, "EXTREME_USAGE_RATE"),
            ValidationCode::NewVehicle => write!(f, "NEW_VEHICLE"),
        }
    }
}

/// Result of checking a submitted mileage against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason_code: ValidationCode,
    pub submitted: u64,
    /// Baseline mileage the submission was compared to
    pub baseline_used: f64,
    pub difference_km: f64,
    pub days_elapsed: i64,
    pub daily_rate: f64,
    pub message: String,
}

/// Monetary range for a part or an estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
}

impl CostRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Labor time range in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaborRange {
    pub min: u32,
    pub max: u32,
}

impl LaborRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// A tracked maintenance item in the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    pub name: String,
    pub interval_km: f64,
    /// Calendar interval, when the part also ages by time
    #[serde(default)]
    pub interval_months: Option<u32>,
    pub keywords: Vec<String>,
    pub cost_range: CostRange,
    #[serde(default)]
    pub labor_minutes: LaborRange,
    /// 1 is the most important
    pub priority: u8,
    #[serde(default)]
    pub is_critical: bool,
}

impl PartDefinition {
    /// Whether lower-cased service text mentions any of this part's keywords
    pub fn matches(&self, searchable_text: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| searchable_text.contains(&keyword.to_lowercase()))
    }
}

/// Urgency of a part relative to its interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartState {
    Overdue,
    DueSoon,
    Scheduled,
}

impl fmt::Display for PartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartState::Overdue => write!(f, "overdue"),
            PartState::DueSoon => write!(f, "due soon"),
            PartState::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// Service position of one catalog part for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartStatus {
    pub part: PartDefinition,
    pub last_service: Option<RawReading>,
    pub last_service_km: f64,
    pub km_since_service: f64,
    /// Negative when overdue
    pub km_remaining: f64,
    pub status: PartState,
    pub days_since_service: Option<i64>,
    /// Calendar interval elapsed; informational only
    pub time_interval_elapsed: bool,
}

/// Part statuses split by urgency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBuckets {
    pub immediate: Vec<PartStatus>,
    pub soon: Vec<PartStatus>,
    pub routine: Vec<PartStatus>,
}

impl ScheduleBuckets {
    pub fn total(&self) -> usize {
        self.immediate.len() + self.soon.len() + self.routine.len()
    }

    /// Items that are overdue or due soon
    pub fn attention_items(&self) -> impl Iterator<Item = &PartStatus> {
        self.immediate.iter().chain(self.soon.iter())
    }

    pub fn needs_attention(&self) -> bool {
        !self.immediate.is_empty() || !self.soon.is_empty()
    }
}

/// How much the estimate can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateConfidence {
    High,
    Medium,
}

impl fmt::Display for EstimateConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateConfidence::High => write!(f, "high"),
            EstimateConfidence::Medium => write!(f, "medium"),
        }
    }
}

/// One line of the itemized cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub item: String,
    pub urgency: PartState,
    pub cost_range: CostRange,
    pub labor_minutes: LaborRange,
}

/// Aggregated cost of the items that need attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub total_min: f64,
    pub total_max: f64,
    pub breakdown: Vec<CostLine>,
    pub confidence: EstimateConfidence,
    pub labor_minutes: LaborRange,
    /// Whether the minimum service charge raised the totals
    pub floor_applied: bool,
    pub currency: String,
}

/// Overall urgency of the action plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecommendationPriority {
    Immediate,
    High,
    Medium,
    Routine,
}

impl fmt::Display for RecommendationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationPriority::Immediate => write!(f, "Immediate"),
            RecommendationPriority::High => write!(f, "High"),
            RecommendationPriority::Medium => write!(f, "Medium"),
            RecommendationPriority::Routine => write!(f, "Routine"),
        }
    }
}

/// Prioritized, human-readable maintenance plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: RecommendationPriority,
    pub action_plan: Vec<String>,
    pub cost_estimate: CostRange,
    pub time_estimate: String,
}

/// Label returned by the external prediction collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalPrediction {
    pub label: String,
    /// 0.0 to 1.0
    pub confidence: f64,
}

/// Whether the external prediction took part in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredictionStatus {
    Used(ExternalPrediction),
    Unavailable { reason: String },
    Disabled,
}

/// Whether the vehicle had any history to reconcile against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Tracked,
    NewlyTracked,
}

/// Everything produced for one vehicle and one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub vehicle_id: String,
    pub vehicle_status: VehicleStatus,
    pub current_mileage: f64,
    pub baseline: Option<Baseline>,
    /// Surfaced when the automatic and latest candidates disagree
    pub latest_candidate: Option<BaselineCandidate>,
    pub validation: ValidationResult,
    pub schedule: ScheduleBuckets,
    pub cost_estimate: CostEstimate,
    pub recommendation: Recommendation,
    pub prediction: PredictionStatus,
    pub generated_at: DateTime<Utc>,
}
