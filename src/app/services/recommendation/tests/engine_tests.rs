//! Tests for priority rules, action plan content and prediction handling

use super::*;
use crate::app::models::{
    CostEstimate, EstimateConfidence, ExternalPrediction, LaborRange, PartState,
    RecommendationPriority,
};
use crate::app::services::recommendation::{RecommendationEngine, select_priority};

fn estimate(min: f64, max: f64) -> CostEstimate {
    CostEstimate {
        total_min: min,
        total_max: max,
        breakdown: Vec::new(),
        confidence: EstimateConfidence::High,
        labor_minutes: LaborRange::default(),
        floor_applied: false,
        currency: "MYR".to_string(),
    }
}

fn engine() -> RecommendationEngine {
    RecommendationEngine::new(0.3, vec!["routine_service".to_string()], 10_000.0)
}

fn prediction(label: &str, confidence: f64) -> ExternalPrediction {
    ExternalPrediction {
        label: label.to_string(),
        confidence,
    }
}

#[test]
fn test_priority_rules() {
    assert_eq!(
        select_priority(&buckets(vec![overdue("Brakes", true)], vec![], vec![])),
        RecommendationPriority::Immediate
    );
    assert_eq!(
        select_priority(&buckets(
            vec![overdue("Air Filter", false)],
            vec![due_soon("Oil")],
            vec![]
        )),
        RecommendationPriority::High
    );
    assert_eq!(
        select_priority(&buckets(vec![], vec![due_soon("Oil")], vec![])),
        RecommendationPriority::Medium
    );
    assert_eq!(
        select_priority(&buckets(vec![], vec![], vec![scheduled("Oil", 5_000.0)])),
        RecommendationPriority::Routine
    );
}

#[test]
fn test_action_plan_order() {
    let schedule = buckets(
        vec![overdue("Brake System", true)],
        vec![due_soon("Engine Oil")],
        vec![scheduled("Coolant", 12_000.0), scheduled("Tires", 4_000.0)],
    );

    let recommendation = engine().recommend(&schedule, &estimate(230.0, 550.0), 660_000.0, None);

    assert_eq!(recommendation.priority, RecommendationPriority::Immediate);
    assert_eq!(recommendation.time_estimate, "Same day");
    assert_eq!(recommendation.cost_estimate.min, 230.0);
    assert_eq!(recommendation.cost_estimate.max, 550.0);

    let plan = &recommendation.action_plan;
    assert_eq!(plan[0], "Urgent: service Brake System (overdue by 2000 km)");
    assert_eq!(plan[1], "Plan service for Engine Oil within 800 km");
    assert_eq!(plan[2], "Contact the manager to schedule maintenance");
    assert_eq!(plan[3], "Follow recommended maintenance procedures");
    assert_eq!(plan[4], "Schedule next check at 664000 km");
    assert_eq!(plan.len(), 5);
}

#[test]
fn test_routine_only_plan() {
    let schedule = buckets(vec![], vec![], vec![scheduled("Oil", 6_000.0)]);
    let recommendation = engine().recommend(&schedule, &estimate(80.0, 150.0), 100_000.0, None);

    assert_eq!(recommendation.priority, RecommendationPriority::Routine);
    assert_eq!(recommendation.time_estimate, "2-4 hours");
    assert_eq!(
        recommendation.action_plan.last().unwrap(),
        "Schedule next check at 106000 km"
    );
}

#[test]
fn test_next_check_falls_back_to_smallest_interval() {
    let schedule = buckets(vec![overdue("Oil", false)], vec![], vec![]);
    assert_eq!(engine().next_check_mileage(&schedule, 50_000.0), 60_000.0);
}

#[test]
fn test_high_priority_time_estimate_scales_with_items() {
    let few = buckets(vec![overdue("A", false)], vec![], vec![]);
    let many = buckets(
        vec![overdue("A", false), overdue("B", false)],
        vec![due_soon("C"), due_soon("D")],
        vec![],
    );

    assert_eq!(
        engine().recommend(&few, &estimate(80.0, 150.0), 1.0, None).time_estimate,
        "4-6 hours"
    );
    assert_eq!(
        engine().recommend(&many, &estimate(80.0, 150.0), 1.0, None).time_estimate,
        "Full day"
    );
}

#[test]
fn test_elapsed_time_interval_adds_inspection() {
    let mut aged = scheduled("Coolant System", 30_000.0);
    aged.time_interval_elapsed = true;
    aged.days_since_service = Some(800);
    let schedule = buckets(vec![], vec![], vec![aged]);

    let recommendation = engine().recommend(&schedule, &estimate(80.0, 150.0), 1_000.0, None);
    assert_eq!(recommendation.priority, RecommendationPriority::Routine);
    assert_eq!(
        recommendation.action_plan[0],
        "Inspect Coolant System: last serviced 800 days ago"
    );
}

#[test]
fn test_distinct_prediction_is_monitoring_only() {
    let schedule = buckets(vec![], vec![due_soon("Engine Oil")], vec![]);
    let predicted = prediction("high_maintenance_vehicle", 0.72);

    let recommendation = engine().recommend(
        &schedule,
        &estimate(80.0, 150.0),
        100_000.0,
        Some(&predicted),
    );

    assert_eq!(recommendation.priority, RecommendationPriority::Medium);
    assert_eq!(
        recommendation.action_plan.last().unwrap(),
        "Monitor: high maintenance vehicle (predicted with 72% confidence), consider more frequent inspections"
    );
}

#[test]
fn test_prediction_filters() {
    let brakes = create_status("Brake System", &["brake"], 300.0, PartState::DueSoon, true);
    let schedule = buckets(vec![], vec![brakes], vec![]);
    let engine = engine();
    let base_len = engine
        .recommend(&schedule, &estimate(150.0, 400.0), 1_000.0, None)
        .action_plan
        .len();

    for ignored in [
        prediction("electrical_fault", 0.1),
        prediction("routine_service", 0.9),
        prediction("brake_wear", 0.9),
        prediction("brake system", 0.9),
        prediction("  ", 0.9),
    ] {
        let recommendation =
            engine.recommend(&schedule, &estimate(150.0, 400.0), 1_000.0, Some(&ignored));
        assert_eq!(
            recommendation.action_plan.len(),
            base_len,
            "label '{}' should be ignored",
            ignored.label
        );
    }
}

#[test]
fn test_prediction_never_changes_priority() {
    let schedule = buckets(vec![], vec![], vec![scheduled("Oil", 5_000.0)]);
    let predicted = prediction("engine_failure_imminent", 0.99);

    let recommendation =
        engine().recommend(&schedule, &estimate(80.0, 150.0), 1_000.0, Some(&predicted));
    assert_eq!(recommendation.priority, RecommendationPriority::Routine);
}
