//! Cost estimator implementation

use crate::app::models::{CostEstimate, CostLine, EstimateConfidence, LaborRange, ScheduleBuckets};
use crate::config::CostConfig;
use tracing::debug;

/// Sums catalog prices for attention items and applies the minimum charge
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    config: CostConfig,
}

impl CostEstimator {
    pub fn new(config: CostConfig) -> Self {
        Self { config }
    }

    /// Price the immediate and soon buckets
    pub fn estimate(&self, buckets: &ScheduleBuckets) -> CostEstimate {
        let breakdown: Vec<CostLine> = buckets
            .attention_items()
            .map(|status| CostLine {
                item: status.part.name.clone(),
                urgency: status.status,
                cost_range: status.part.cost_range,
                labor_minutes: status.part.labor_minutes,
            })
            .collect();

        let mut total_min: f64 = breakdown.iter().map(|line| line.cost_range.min).sum();
        let mut total_max: f64 = breakdown.iter().map(|line| line.cost_range.max).sum();
        let labor_minutes = breakdown
            .iter()
            .fold(LaborRange::default(), |acc, line| {
                LaborRange::new(
                    acc.min + line.labor_minutes.min,
                    acc.max + line.labor_minutes.max,
                )
            });

        let floor = self.config.minimum_charge;
        let floor_applied = total_min < floor.min;
        if floor_applied {
            debug!(
                "Raising estimate {:.2} to the minimum charge {:.2}",
                total_min, floor.min
            );
            total_min = floor.min;
            total_max = total_max.max(floor.max);
        }
        total_max = total_max.max(total_min);

        let confidence = if breakdown.is_empty() {
            EstimateConfidence::Medium
        } else {
            EstimateConfidence::High
        };

        debug!(
            "Estimate {} {:.2}-{:.2} for {} item(s), {}-{} min labor",
            self.config.currency,
            total_min,
            total_max,
            breakdown.len(),
            labor_minutes.min,
            labor_minutes.max
        );

        CostEstimate {
            total_min,
            total_max,
            breakdown,
            confidence,
            labor_minutes,
            floor_applied,
            currency: self.config.currency.clone(),
        }
    }
}
