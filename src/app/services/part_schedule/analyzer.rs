//! Per-part service position analysis

use super::catalog::PartCatalog;
use crate::app::models::{PartDefinition, PartState, PartStatus, RawReading, ScheduleBuckets};
use crate::app::services::reading_filter::parse_odometer;
use crate::config::ScheduleConfig;
use crate::constants::DAYS_PER_MONTH;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Finds the last service of every catalog part and buckets them by urgency
#[derive(Debug, Clone, Default)]
pub struct PartScheduleAnalyzer {
    catalog: PartCatalog,
    config: ScheduleConfig,
}

impl PartScheduleAnalyzer {
    pub fn new(catalog: PartCatalog, config: ScheduleConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    /// Analyze every catalog part against a vehicle history
    ///
    /// # Arguments
    ///
    /// * `history` - Service records in any order, dated or not
    /// * `current_mileage` - Already validated current odometer (km)
    /// * `now` - Reference time for the calendar interval check
    pub fn analyze(
        &self,
        history: &[RawReading],
        current_mileage: f64,
        now: DateTime<Utc>,
    ) -> ScheduleBuckets {
        let ordered = self.search_order(history);
        let mut buckets = ScheduleBuckets::default();

        for part in self.catalog.parts() {
            let status = self.part_status(part, &ordered, current_mileage, now);
            debug!(
                "{}: {} ({:.0} km remaining)",
                part.name, status.status, status.km_remaining
            );
            match status.status {
                PartState::Overdue => buckets.immediate.push(status),
                PartState::DueSoon => buckets.soon.push(status),
                PartState::Scheduled => buckets.routine.push(status),
            }
        }

        for bucket in [
            &mut buckets.immediate,
            &mut buckets.soon,
            &mut buckets.routine,
        ] {
            bucket.sort_by(compare_urgency);
        }

        info!(
            "Schedule at {:.0} km: {} overdue, {} due soon, {} scheduled",
            current_mileage,
            buckets.immediate.len(),
            buckets.soon.len(),
            buckets.routine.len()
        );

        buckets
    }

    /// Status of one part given the history in search order
    pub fn part_status(
        &self,
        part: &PartDefinition,
        ordered_history: &[&RawReading],
        current_mileage: f64,
        now: DateTime<Utc>,
    ) -> PartStatus {
        let last_service = ordered_history
            .iter()
            .find(|reading| part.matches(&reading.searchable_text()))
            .map(|reading| (*reading).clone());

        let last_service_km = last_service
            .as_ref()
            .and_then(|reading| parse_odometer(&reading.raw_value))
            .unwrap_or(0.0);
        let km_since_service = current_mileage - last_service_km;
        let km_remaining = part.interval_km - km_since_service;

        let days_since_service = last_service
            .as_ref()
            .and_then(|reading| reading.recorded_at)
            .map(|at| (now - at).num_days().max(0));
        let time_interval_elapsed = match (part.interval_months, days_since_service) {
            (Some(months), Some(days)) => days >= i64::from(months) * DAYS_PER_MONTH,
            _ => false,
        };

        PartStatus {
            part: part.clone(),
            last_service,
            last_service_km,
            km_since_service,
            km_remaining,
            status: self.classify(part, km_remaining),
            days_since_service,
            time_interval_elapsed,
        }
    }

    fn classify(&self, part: &PartDefinition, km_remaining: f64) -> PartState {
        if km_remaining <= 0.0 {
            PartState::Overdue
        } else if km_remaining <= part.interval_km * self.config.due_soon_fraction {
            PartState::DueSoon
        } else {
            PartState::Scheduled
        }
    }

    /// Most recent first; undated records after all dated ones, later input first
    fn search_order<'a>(&self, history: &'a [RawReading]) -> Vec<&'a RawReading> {
        let mut indexed: Vec<(usize, &RawReading)> = history
            .iter()
            .enumerate()
            .filter(|(_, reading)| {
                !self
                    .config
                    .excluded_service_types
                    .contains(&reading.service_type)
            })
            .collect();

        indexed.sort_by(|(ia, a), (ib, b)| match (a.recorded_at, b.recorded_at) {
            (Some(at_a), Some(at_b)) => at_b.cmp(&at_a).then_with(|| ib.cmp(ia)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => ib.cmp(ia),
        });

        indexed.into_iter().map(|(_, reading)| reading).collect()
    }
}

/// Priority first, then whichever part is closer to (or further past) its interval
fn compare_urgency(a: &PartStatus, b: &PartStatus) -> Ordering {
    a.part
        .priority
        .cmp(&b.part.priority)
        .then_with(|| a.km_remaining.total_cmp(&b.km_remaining))
}
