//! Tests for the recommendation engine

pub mod engine_tests;

use crate::app::models::{
    CostRange, LaborRange, PartDefinition, PartState, PartStatus, ScheduleBuckets,
};

pub fn create_status(
    name: &str,
    keywords: &[&str],
    km_remaining: f64,
    state: PartState,
    is_critical: bool,
) -> PartStatus {
    PartStatus {
        part: PartDefinition {
            name: name.to_string(),
            interval_km: 10_000.0,
            interval_months: Some(6),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            cost_range: CostRange::new(100.0, 200.0),
            labor_minutes: LaborRange::new(30, 60),
            priority: 1,
            is_critical,
        },
        last_service: None,
        last_service_km: 0.0,
        km_since_service: 10_000.0 - km_remaining,
        km_remaining,
        status: state,
        days_since_service: None,
        time_interval_elapsed: false,
    }
}

pub fn overdue(name: &str, is_critical: bool) -> PartStatus {
    create_status(name, &[], -2_000.0, PartState::Overdue, is_critical)
}

pub fn due_soon(name: &str) -> PartStatus {
    create_status(name, &[], 800.0, PartState::DueSoon, false)
}

pub fn scheduled(name: &str, km_remaining: f64) -> PartStatus {
    create_status(name, &[], km_remaining, PartState::Scheduled, false)
}

pub fn buckets(
    immediate: Vec<PartStatus>,
    soon: Vec<PartStatus>,
    routine: Vec<PartStatus>,
) -> ScheduleBuckets {
    ScheduleBuckets {
        immediate,
        soon,
        routine,
    }
}
