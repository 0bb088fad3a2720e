//! Tests for the prediction collaborator


use crate::app::models::{RawReading, ServiceType};
use chrono::{DateTime, TimeZone, Utc};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn create_record(
    record_id: &str,
    recorded_at: Option<DateTime<Utc>>,
    description: &str,
    service_type: ServiceType,
) -> RawReading {
    RawReading {
        vehicle_id: "BKT5521".to_string(),
        raw_value: "650000".to_string(),
        recorded_at,
        record_id: record_id.to_string(),
        description: description.to_string(),
        response_text: String::new(),
        service_type,
    }
}
