//! Tests for the cost estimator


use crate::app::models::{
    CostRange, LaborRange, PartDefinition, PartState, PartStatus, ScheduleBuckets,
};

pub fn create_status(name: &str, cost: (f64, f64), state: PartState) -> PartStatus {
    let km_remaining = match state {
        PartState::Overdue => -1_000.0,
        PartState::DueSoon => 500.0,
        PartState::Scheduled => 8_000.0,
    };
    PartStatus {
        part: PartDefinition {
            name: name.to_string(),
            interval_km: 10_000.0,
            interval_months: None,
            keywords: vec![name.to_lowercase()],
            cost_range: CostRange::new(cost.0, cost.1),
            labor_minutes: LaborRange::new(30, 60),
            priority: 1,
            is_critical: false,
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

pub fn create_buckets(statuses: Vec<PartStatus>) -> ScheduleBuckets {
    let mut buckets = ScheduleBuckets::default();
    for status in statuses {
        match status.status {
            PartState::Overdue => buckets.immediate.push(status),
            PartState::DueSoon => buckets.soon.push(status),
            PartState::Scheduled => buckets.routine.push(status),
        }
    }
    buckets
}
