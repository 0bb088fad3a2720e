//! Tests for the reading filter
//!
//! Shared fixtures live here; behaviour tests are split per component.

pub mod classify_tests;

use crate::app::models::{RawReading, ServiceType};
use chrono::{DateTime, TimeZone, Utc};

/// Midnight UTC on the given date
pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Create a maintenance reading with the given raw odometer text
pub fn create_reading(record_id: &str, raw_value: &str, recorded_at: DateTime<Utc>) -> RawReading {
    RawReading {
        vehicle_id: "WXY1234".to_string(),
        raw_value: raw_value.to_string(),
        recorded_at: Some(recorded_at),
        record_id: record_id.to_string(),
        description: "Servis berkala".to_string(),
        response_text: String::new(),
        service_type: ServiceType::Maintenance,
    }
}

/// Create a reading whose source row had no date
pub fn create_undated_reading(record_id: &str, raw_value: &str) -> RawReading {
    RawReading {
        recorded_at: None,
        ..create_reading(record_id, raw_value, date(2024, 1, 1))
    }
}
