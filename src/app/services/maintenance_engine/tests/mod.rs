//! Tests for the maintenance engine


use crate::Result;
use crate::app::models::{ExternalPrediction, RawReading, ServiceType};
use crate::app::services::prediction::{PredictionRequest, Predictor};
use chrono::{DateTime, TimeZone, Utc};
use std::time::Duration;

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn create_record(
    record_id: &str,
    raw_value: &str,
    recorded_at: DateTime<Utc>,
    description: &str,
) -> RawReading {
    RawReading {
        vehicle_id: "BKT5521".to_string(),
        raw_value: raw_value.to_string(),
        recorded_at: Some(recorded_at),
        record_id: record_id.to_string(),
        description: description.to_string(),
        response_text: String::new(),
        service_type: ServiceType::Maintenance,
    }
}

/// History from the reconciliation scenario, with oil changed at 645000
pub fn create_scenario_history() -> Vec<RawReading> {
    vec![
        create_record("r0", "645000", date(2023, 10, 1), "Tukar minyak enjin"),
        create_record("r1", "650000", date(2024, 1, 1), "Servis brek"),
        create_record("r2", "0", date(2024, 6, 1), "Cuci"),
        create_record("r3", "655000", date(2024, 7, 1), "Tukar tayar"),
    ]
}

/// Predictor returning a fixed label
#[derive(Debug)]
pub struct FixedPredictor {
    pub label: &'static str,
    pub confidence: f64,
}

impl Predictor for FixedPredictor {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn predict(&self, _request: &PredictionRequest) -> Result<ExternalPrediction> {
        Ok(ExternalPrediction {
            label: self.label.to_string(),
            confidence: self.confidence,
        })
    }
}

/// Predictor that never answers in time
#[derive(Debug)]
pub struct SlowPredictor;

impl Predictor for SlowPredictor {
    fn name(&self) -> &str {
        "slow"
    }

    async fn predict(&self, _request: &PredictionRequest) -> Result<ExternalPrediction> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ExternalPrediction {
            label: "too_late".to_string(),
            confidence: 1.0,
        })
    }
}
