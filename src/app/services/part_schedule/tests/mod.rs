//! Tests for the part catalog and schedule analyzer

pub mod analyzer_tests;

use crate::app::models::{CostRange, LaborRange, PartDefinition, RawReading, ServiceType};
use chrono::{DateTime, TimeZone, Utc};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn create_service(
    record_id: &str,
    raw_value: &str,
    recorded_at: Option<DateTime<Utc>>,
    description: &str,
) -> RawReading {
    RawReading {
        vehicle_id: "BKT5521".to_string(),
        raw_value: raw_value.to_string(),
        recorded_at,
        record_id: record_id.to_string(),
        description: description.to_string(),
        response_text: String::new(),
        service_type: ServiceType::Maintenance,
    }
}

pub fn create_part(
    name: &str,
    interval_km: f64,
    keywords: &[&str],
    priority: u8,
) -> PartDefinition {
    PartDefinition {
        name: name.to_string(),
        interval_km,
        interval_months: None,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        cost_range: CostRange::new(50.0, 100.0),
        labor_minutes: LaborRange::new(30, 60),
        priority,
        is_critical: false,
    }
}
