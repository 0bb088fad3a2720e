//! End-to-end tests for the maintenance engine
//!
//! Loads histories through the JSON adapter and runs the full async pipeline:
//! filtering, baseline selection, validation, scheduling, costing and the
//! recommendation.

use chrono::{DateTime, TimeZone, Utc};
use fleet_maintenance::app::adapters::history_file::{group_by_vehicle, load_history};
use fleet_maintenance::app::models::{
    PartState, PredictionStatus, RecommendationPriority, ValidationCode, VehicleStatus,
};
use fleet_maintenance::app::services::baseline::BaselineChoice;
use fleet_maintenance::app::services::maintenance_engine::EvaluationRequest;
use fleet_maintenance::app::services::prediction::ConfiguredPredictor;
use fleet_maintenance::{EngineConfig, Error, MaintenanceEngine};
use std::fs;
use tempfile::TempDir;

const FLEET_HISTORY: &str = r#"[
  {"record_id": "a1", "vehicle_id": "BKT5521", "raw_odometer": "645000", "recorded_at": "2023-10-01", "description": "Tukar minyak enjin", "service_type_code": 3},
  {"record_id": "a2", "vehicle_id": "BKT5521", "raw_odometer": "650000", "recorded_at": "2024-01-01", "description": "Servis brek", "service_type_code": 3},
  {"record_id": "a3", "vehicle_id": "BKT5521", "raw_odometer": "0", "recorded_at": "2024-06-01", "description": "Cuci kereta", "service_type_code": 2},
  {"record_id": "a4", "vehicle_id": "BKT5521", "raw_odometer": "655000", "recorded_at": "2024-07-01", "description": "Tukar tayar", "service_type_code": 3},
  {"record_id": "b1", "vehicle_id": "WXY1234", "raw_odometer": "480000", "recorded_at": "2024-01-01", "description": "Servis"},
  {"record_id": "b2", "vehicle_id": "WXY1234", "raw_odometer": "48000", "recorded_at": "2024-03-01", "description": "Servis"},
  {"record_id": "c1", "vehicle_id": "JKL9", "raw_odometer": "-", "recorded_at": "2024-03-01", "description": "Servis"}
]"#;

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn load_fleet() -> std::collections::BTreeMap<String, Vec<fleet_maintenance::RawReading>> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fleet.json");
    fs::write(&path, FLEET_HISTORY).unwrap();
    group_by_vehicle(load_history(&path).unwrap())
}

#[tokio::test]
async fn test_evaluate_from_history_file() {
    let fleet = load_fleet();
    let engine = MaintenanceEngine::new(EngineConfig::default()).unwrap();

    let request = EvaluationRequest::new("BKT5521", fleet["BKT5521"].clone(), 660_000)
        .at(date(2024, 10, 1));
    let report = engine.evaluate(&request).await.unwrap();

    assert_eq!(report.vehicle_status, VehicleStatus::Tracked);
    assert_eq!(report.baseline.as_ref().unwrap().mileage, 655_000.0);
    assert_eq!(report.validation.reason_code, ValidationCode::Normal);

    // Oil, 15000 km since the last change on a 10000 km interval
    let oil = report
        .schedule
        .immediate
        .iter()
        .find(|status| status.part.name == "Engine Oil & Filter")
        .unwrap();
    assert_eq!(oil.km_since_service, 15_000.0);
    assert_eq!(oil.km_remaining, -5_000.0);
    assert_eq!(oil.status, PartState::Overdue);

    // The washing record never counts as a service
    assert!(
        report
            .schedule
            .immediate
            .iter()
            .chain(&report.schedule.soon)
            .chain(&report.schedule.routine)
            .all(|status| status.last_service.as_ref().is_none_or(|r| r.record_id != "a3"))
    );

    assert_eq!(report.recommendation.priority, RecommendationPriority::Immediate);
    assert!(report.recommendation.action_plan[0].starts_with("Urgent: service"));
    assert!(report.cost_estimate.total_min <= report.cost_estimate.total_max);
    assert!(report.cost_estimate.total_min >= 80.0);
}

#[tokio::test]
async fn test_backwards_submission_reports_both_values() {
    let fleet = load_fleet();
    let engine = MaintenanceEngine::new(EngineConfig::default()).unwrap();

    let request = EvaluationRequest::new("BKT5521", fleet["BKT5521"].clone(), 600_000)
        .at(date(2024, 10, 1));
    let error = engine.evaluate(&request).await.unwrap_err();

    assert!(error.is_terminal());
    assert!(error.to_string().contains("baseline 655000, submitted 600000"));
}

#[tokio::test]
async fn test_conflicting_latest_entry_is_surfaced() {
    let fleet = load_fleet();
    let engine = MaintenanceEngine::new(EngineConfig::default()).unwrap();
    let history = fleet["WXY1234"].clone();

    let (_, selection) = engine.reconcile("WXY1234", &history).unwrap();
    assert!(selection.choice_needed);
    assert_eq!(selection.baseline.mileage, 480_000.0);

    let request = EvaluationRequest::new("WXY1234", history, 48_500)
        .with_baseline_choice(BaselineChoice::Latest)
        .at(date(2024, 3, 11));
    let report = engine.evaluate(&request).await.unwrap();

    assert_eq!(report.baseline.as_ref().unwrap().mileage, 48_000.0);
    assert_eq!(report.latest_candidate.as_ref().unwrap().record_id, "b2");
    assert_eq!(report.validation.reason_code, ValidationCode::Normal);
}

#[tokio::test]
async fn test_fleet_overview_covers_every_vehicle() {
    let fleet = load_fleet();
    let engine = MaintenanceEngine::new(EngineConfig::default()).unwrap();
    let now = date(2024, 10, 1);

    let mut scheduled = 0;
    let mut failed = Vec::new();
    for (vehicle_id, history) in &fleet {
        match engine.fleet_overview(vehicle_id, history, now).await {
            Ok(report) => {
                scheduled += 1;
                assert_eq!(report.schedule.total(), engine.config().catalog.len());
            }
            Err(e) => failed.push(e),
        }
    }

    assert_eq!(scheduled, 2);
    assert_eq!(failed.len(), 1);
    assert!(matches!(failed[0], Error::NoReliableBaseline { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_predictor_feeds_monitoring_line() {
    let fleet = load_fleet();
    let config = EngineConfig::default().with_prediction_command(
        "sh",
        vec![
            "-c".to_string(),
            r#"cat > /dev/null; echo '{"prediction_label": "electrical_issue", "confidence": 0.9}'"#
                .to_string(),
        ],
    );
    let predictor = ConfiguredPredictor::from_config(&config.prediction);
    let engine = MaintenanceEngine::with_predictor(config, predictor).unwrap();

    let request = EvaluationRequest::new("BKT5521", fleet["BKT5521"].clone(), 660_000)
        .at(date(2024, 10, 1));
    let report = engine.evaluate(&request).await.unwrap();

    assert!(matches!(report.prediction, PredictionStatus::Used(_)));
    assert!(
        report
            .recommendation
            .action_plan
            .iter()
            .any(|line| line.starts_with("Monitor: electrical issue"))
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_failing_predictor_degrades_to_rules() {
    let fleet = load_fleet();
    let config = EngineConfig::default()
        .with_prediction_command("sh", vec!["-c".to_string(), "exit 3".to_string()]);
    let predictor = ConfiguredPredictor::from_config(&config.prediction);
    let engine = MaintenanceEngine::with_predictor(config, predictor).unwrap();

    let request = EvaluationRequest::new("BKT5521", fleet["BKT5521"].clone(), 660_000)
        .at(date(2024, 10, 1));
    let report = engine.evaluate(&request).await.unwrap();

    assert!(matches!(report.prediction, PredictionStatus::Unavailable { .. }));
    assert_eq!(report.recommendation.priority, RecommendationPriority::Immediate);
}
