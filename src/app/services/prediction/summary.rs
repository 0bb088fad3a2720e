//! Request payload sent to the external predictor

use crate::app::models::{RawReading, ServiceType};
use crate::constants::TIRE_KEYWORDS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recent-service summary for one vehicle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub total_records: usize,
    /// Records typed as maintenance
    pub service_count: usize,
    pub cleaning_count: usize,
    pub tire_services_count: usize,
    pub days_since_last_service: Option<i64>,
    pub days_since_last_maintenance: Option<i64>,
}

impl ServiceSummary {
    /// Summarize a history as of `now`; undated records only count towards totals
    pub fn from_history(history: &[RawReading], now: DateTime<Utc>) -> Self {
        let days_since = |at: DateTime<Utc>| (now - at).num_days().max(0);

        let last_service = history.iter().filter_map(|r| r.recorded_at).max();
        let last_maintenance = history
            .iter()
            .filter(|r| r.service_type == ServiceType::Maintenance)
            .filter_map(|r| r.recorded_at)
            .max();

        Self {
            total_records: history.len(),
            service_count: history
                .iter()
                .filter(|r| r.service_type == ServiceType::Maintenance)
                .count(),
            cleaning_count: history
                .iter()
                .filter(|r| r.service_type == ServiceType::Cleaning)
                .count(),
            tire_services_count: history
                .iter()
                .filter(|r| {
                    let text = r.searchable_text();
                    TIRE_KEYWORDS.iter().any(|keyword| text.contains(keyword))
                })
                .count(),
            days_since_last_service: last_service.map(days_since),
            days_since_last_maintenance: last_maintenance.map(days_since),
        }
    }
}

/// Everything the predictor receives on stdin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub vehicle_id: String,
    pub mileage: f64,
    pub summary: ServiceSummary,
}

impl PredictionRequest {
    pub fn new(vehicle_id: impl Into<String>, mileage: f64, summary: ServiceSummary) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            mileage,
            summary,
        }
    }
}
