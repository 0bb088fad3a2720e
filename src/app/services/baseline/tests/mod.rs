//! Tests for baseline selection


use crate::app::models::{RawReading, ServiceType};
use chrono::{DateTime, TimeZone, Utc};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn create_reading(record_id: &str, raw_value: &str, recorded_at: DateTime<Utc>) -> RawReading {
    RawReading {
        vehicle_id: "BKT5521".to_string(),
        raw_value: raw_value.to_string(),
        recorded_at: Some(recorded_at),
        record_id: record_id.to_string(),
        description: "Pemeriksaan kenderaan".to_string(),
        response_text: String::new(),
        service_type: ServiceType::Inspection,
    }
}

/// History from the reference scenario: one zero entry between two good ones
pub fn create_scenario_history() -> Vec<RawReading> {
    vec![
        create_reading("r1", "650000", date(2024, 1, 1)),
        create_reading("r2", "0", date(2024, 6, 1)),
        create_reading("r3", "655000", date(2024, 7, 1)),
    ]
}
