//! Tests for last-service matching and urgency classification

use super::*;
use crate::app::models::{PartState, ServiceType};
use crate::app::services::part_schedule::{PartCatalog, PartScheduleAnalyzer};
use crate::config::ScheduleConfig;

fn analyzer_for(parts: Vec<crate::app::models::PartDefinition>) -> PartScheduleAnalyzer {
    PartScheduleAnalyzer::new(PartCatalog::new(parts).unwrap(), ScheduleConfig::default())
}

#[test]
fn test_scenario_engine_oil_overdue() {
    let analyzer = analyzer_for(vec![create_part(
        "Engine Oil",
        10_000.0,
        &["engine oil"],
        1,
    )]);
    let history = vec![
        create_service("r1", "635000", Some(date(2023, 6, 1)), "Engine oil change"),
        create_service("r2", "645000", Some(date(2024, 1, 1)), "Engine oil change"),
        create_service("r3", "655000", Some(date(2024, 7, 1)), "Aircond check"),
    ];

    let buckets = analyzer.analyze(&history, 660_000.0, date(2024, 10, 1));

    assert_eq!(buckets.immediate.len(), 1);
    let status = &buckets.immediate[0];
    assert_eq!(status.last_service_km, 645_000.0);
    assert_eq!(status.km_since_service, 15_000.0);
    assert_eq!(status.km_remaining, -5_000.0);
    assert_eq!(status.status, PartState::Overdue);
    assert_eq!(status.last_service.as_ref().unwrap().record_id, "r2");
}

#[test]
fn test_classification_boundaries() {
    let analyzer = analyzer_for(vec![create_part("Oil", 10_000.0, &["oil"], 1)]);
    let history = vec![create_service("r1", "100000", Some(date(2024, 1, 1)), "oil")];
    let now = date(2024, 2, 1);

    // Exactly at the interval is overdue
    let at_interval = analyzer.analyze(&history, 110_000.0, now);
    assert_eq!(at_interval.immediate.len(), 1);

    // Exactly 10% remaining is due soon
    let at_fraction = analyzer.analyze(&history, 109_000.0, now);
    assert_eq!(at_fraction.soon.len(), 1);
    assert_eq!(at_fraction.soon[0].km_remaining, 1_000.0);

    let just_above = analyzer.analyze(&history, 108_999.0, now);
    assert_eq!(just_above.routine.len(), 1);
}

#[test]
fn test_no_matching_service_counts_from_zero() {
    let analyzer = analyzer_for(vec![create_part("Coolant", 40_000.0, &["coolant"], 2)]);
    let history = vec![create_service("r1", "30000", Some(date(2024, 1, 1)), "brake pads")];

    let buckets = analyzer.analyze(&history, 30_000.0, date(2024, 2, 1));
    let status = &buckets.routine[0];
    assert!(status.last_service.is_none());
    assert_eq!(status.last_service_km, 0.0);
    assert_eq!(status.km_remaining, 10_000.0);
    assert_eq!(status.days_since_service, None);
}

#[test]
fn test_unparseable_service_odometer_counts_from_zero() {
    let analyzer = analyzer_for(vec![create_part("Oil", 10_000.0, &["oil"], 1)]);
    let history = vec![create_service("r1", "n/a", Some(date(2024, 1, 1)), "oil change")];

    let buckets = analyzer.analyze(&history, 50_000.0, date(2024, 2, 1));
    let status = &buckets.immediate[0];
    assert_eq!(status.last_service.as_ref().unwrap().record_id, "r1");
    assert_eq!(status.last_service_km, 0.0);
}

#[test]
fn test_keywords_match_response_text_case_insensitively() {
    let analyzer = analyzer_for(vec![create_part("Tires", 25_000.0, &["tayar"], 1)]);
    let mut service = create_service("r1", "90000", Some(date(2024, 1, 1)), "Servis am");
    service.response_text = "TUKAR TAYAR depan".to_string();

    let buckets = analyzer.analyze(&[service], 95_000.0, date(2024, 2, 1));
    assert_eq!(buckets.routine[0].last_service_km, 90_000.0);
}

#[test]
fn test_cleaning_records_never_count() {
    let analyzer = analyzer_for(vec![create_part("Oil", 10_000.0, &["oil"], 1)]);
    let mut wash = create_service("r2", "119000", Some(date(2024, 6, 1)), "wash and oil spray");
    wash.service_type = ServiceType::Cleaning;
    let history = vec![
        create_service("r1", "100000", Some(date(2024, 1, 1)), "oil change"),
        wash,
    ];

    let buckets = analyzer.analyze(&history, 120_000.0, date(2024, 7, 1));
    assert_eq!(buckets.immediate[0].last_service_km, 100_000.0);
}

#[test]
fn test_undated_records_searched_after_dated() {
    let analyzer = analyzer_for(vec![create_part("Oil", 10_000.0, &["oil"], 1)]);
    let history = vec![
        create_service("undated-1", "118000", None, "oil change"),
        create_service("dated", "100000", Some(date(2024, 1, 1)), "oil change"),
        create_service("undated-2", "119000", None, "oil change"),
    ];

    let buckets = analyzer.analyze(&history, 120_000.0, date(2024, 7, 1));
    assert_eq!(
        buckets.immediate[0].last_service.as_ref().unwrap().record_id,
        "dated"
    );

    // Without a dated match the later undated record wins
    let undated_only = vec![history[0].clone(), history[2].clone()];
    let buckets = analyzer.analyze(&undated_only, 120_000.0, date(2024, 7, 1));
    let status = &buckets.routine[0];
    assert_eq!(status.last_service.as_ref().unwrap().record_id, "undated-2");
    assert_eq!(status.km_remaining, 9_000.0);
    assert_eq!(status.days_since_service, None);
}

#[test]
fn test_every_part_lands_in_exactly_one_bucket() {
    let analyzer = PartScheduleAnalyzer::default();
    let history = vec![
        create_service("r1", "640000", Some(date(2024, 1, 1)), "Engine oil, brake pad"),
        create_service("r2", "652000", Some(date(2024, 5, 1)), "Tukar tayar"),
    ];

    let buckets = analyzer.analyze(&history, 660_000.0, date(2024, 7, 1));
    assert_eq!(buckets.total(), analyzer.catalog().len());

    for status in buckets
        .immediate
        .iter()
        .chain(&buckets.soon)
        .chain(&buckets.routine)
    {
        assert_eq!(
            status.km_remaining,
            status.part.interval_km - status.km_since_service
        );
    }
}

#[test]
fn test_buckets_sorted_by_priority_then_remaining() {
    let analyzer = analyzer_for(vec![
        create_part("Low priority", 10_000.0, &["alpha"], 2),
        create_part("Very overdue", 10_000.0, &["beta"], 1),
        create_part("Slightly overdue", 10_000.0, &["gamma"], 1),
    ]);
    let history = vec![
        create_service("r1", "50000", Some(date(2024, 1, 1)), "alpha"),
        create_service("r2", "40000", Some(date(2024, 1, 2)), "beta"),
        create_service("r3", "55000", Some(date(2024, 1, 3)), "gamma"),
    ];

    let buckets = analyzer.analyze(&history, 70_000.0, date(2024, 2, 1));
    let names: Vec<&str> = buckets
        .immediate
        .iter()
        .map(|status| status.part.name.as_str())
        .collect();
    assert_eq!(names, vec!["Very overdue", "Slightly overdue", "Low priority"]);
}

#[test]
fn test_time_interval_is_informational() {
    let mut part = create_part("Oil", 10_000.0, &["oil"], 1);
    part.interval_months = Some(6);
    let analyzer = analyzer_for(vec![part]);
    let history = vec![create_service("r1", "100000", Some(date(2023, 1, 1)), "oil")];

    let buckets = analyzer.analyze(&history, 101_000.0, date(2024, 1, 1));
    let status = &buckets.routine[0];
    assert_eq!(status.days_since_service, Some(365));
    assert!(status.time_interval_elapsed);
    assert_eq!(status.status, PartState::Scheduled);
}
