//! Tests for the mileage validator


use crate::app::models::{Baseline, SelectionReason};
use chrono::{DateTime, TimeZone, Utc};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn create_baseline(mileage: f64, recorded_at: DateTime<Utc>) -> Baseline {
    Baseline {
        mileage,
        recorded_at,
        record_id: "base".to_string(),
        selection_reason: SelectionReason::HighestValidReading,
        conflicts_with_latest: false,
    }
}
