//! Priority selection and action plan assembly

use crate::app::models::{
    CostEstimate, CostRange, ExternalPrediction, PartStatus, Recommendation,
    RecommendationPriority, ScheduleBuckets,
};
use crate::config::EngineConfig;
use tracing::debug;

/// Attention items above this count turn a high-priority visit into a full day
const FULL_DAY_ITEM_COUNT: usize = 3;

/// Turns part buckets and a cost estimate into an ordered action plan
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    min_confidence: f64,
    generic_labels: Vec<String>,
    /// Used for the next check when no part is merely scheduled
    fallback_check_interval_km: f64,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl RecommendationEngine {
    pub fn new(
        min_confidence: f64,
        generic_labels: Vec<String>,
        fallback_check_interval_km: f64,
    ) -> Self {
        Self {
            min_confidence,
            generic_labels,
            fallback_check_interval_km,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.prediction.min_confidence,
            config.prediction.generic_labels.clone(),
            config.catalog.smallest_interval_km().unwrap_or_default(),
        )
    }

    /// Build the recommendation for one vehicle
    ///
    /// The external prediction can only add a monitoring line; it never
    /// changes the priority derived from the parts.
    pub fn recommend(
        &self,
        buckets: &ScheduleBuckets,
        estimate: &CostEstimate,
        current_mileage: f64,
        prediction: Option<&ExternalPrediction>,
    ) -> Recommendation {
        let priority = select_priority(buckets);
        let mut action_plan = Vec::new();

        for status in &buckets.immediate {
            action_plan.push(format!(
                "Urgent: service {} (overdue by {:.0} km)",
                status.part.name, -status.km_remaining
            ));
        }
        for status in &buckets.soon {
            action_plan.push(format!(
                "Plan service for {} within {:.0} km",
                status.part.name, status.km_remaining
            ));
        }
        for status in buckets.routine.iter().filter(|s| s.time_interval_elapsed) {
            let days = status.days_since_service.unwrap_or_default();
            action_plan.push(format!(
                "Inspect {}: last serviced {} days ago",
                status.part.name, days
            ));
        }

        action_plan.push("Contact the manager to schedule maintenance".to_string());
        action_plan.push("Follow recommended maintenance procedures".to_string());
        action_plan.push(format!(
            "Schedule next check at {:.0} km",
            self.next_check_mileage(buckets, current_mileage)
        ));

        if let Some(line) = prediction.and_then(|p| self.monitoring_line(p, buckets)) {
            action_plan.push(line);
        }

        let time_estimate = time_estimate(priority, buckets.attention_items().count());
        debug!(
            "Recommendation {} with {} step(s), {}",
            priority,
            action_plan.len(),
            time_estimate
        );

        Recommendation {
            priority,
            action_plan,
            cost_estimate: CostRange::new(estimate.total_min, estimate.total_max),
            time_estimate,
        }
    }

    /// Mileage of the next routine check
    pub fn next_check_mileage(&self, buckets: &ScheduleBuckets, current_mileage: f64) -> f64 {
        let next_due = buckets
            .routine
            .iter()
            .map(|status| status.km_remaining)
            .min_by(|a, b| a.total_cmp(b))
            .unwrap_or(self.fallback_check_interval_km);
        current_mileage + next_due
    }

    /// Monitoring line for a prediction that adds something the parts do not cover
    fn monitoring_line(
        &self,
        prediction: &ExternalPrediction,
        buckets: &ScheduleBuckets,
    ) -> Option<String> {
        if prediction.confidence < self.min_confidence {
            debug!(
                "Ignoring prediction '{}' at confidence {:.2}",
                prediction.label, prediction.confidence
            );
            return None;
        }

        let label = normalize_label(&prediction.label);
        if label.is_empty()
            || self
                .generic_labels
                .iter()
                .any(|generic| normalize_label(generic) == label)
        {
            return None;
        }

        if buckets
            .attention_items()
            .any(|status| is_covered_by(&label, status))
        {
            debug!("Prediction '{}' already covered by parts", prediction.label);
            return None;
        }

        Some(format!(
            "Monitor: {} (predicted with {:.0}% confidence), consider more frequent inspections",
            label,
            prediction.confidence * 100.0
        ))
    }
}

/// First matching rule wins
pub fn select_priority(buckets: &ScheduleBuckets) -> RecommendationPriority {
    if buckets.immediate.iter().any(|status| status.part.is_critical) {
        RecommendationPriority::Immediate
    } else if !buckets.immediate.is_empty() {
        RecommendationPriority::High
    } else if !buckets.soon.is_empty() {
        RecommendationPriority::Medium
    } else {
        RecommendationPriority::Routine
    }
}

fn time_estimate(priority: RecommendationPriority, attention_items: usize) -> String {
    match priority {
        RecommendationPriority::Immediate => "Same day",
        RecommendationPriority::High if attention_items > FULL_DAY_ITEM_COUNT => "Full day",
        RecommendationPriority::High => "4-6 hours",
        RecommendationPriority::Medium | RecommendationPriority::Routine => "2-4 hours",
    }
    .to_string()
}

/// `"Brake_System-check"` becomes `"brake system check"`
fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_covered_by(label: &str, status: &PartStatus) -> bool {
    let name = status.part.name.to_lowercase();
    label.contains(&name)
        || name.contains(label)
        || status
            .part
            .keywords
            .iter()
            .any(|keyword| label.contains(&keyword.to_lowercase()))
}
