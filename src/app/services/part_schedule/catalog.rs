//! Static part catalog
//!
//! The catalog is built once (defaults or config file) and shared read-only
//! by the analyzer, the cost estimator and the recommendation engine.

use crate::app::models::{CostRange, LaborRange, PartDefinition};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Highest (least important) priority a part may carry
pub const LOWEST_PART_PRIORITY: u8 = 3;

/// Ordered list of tracked maintenance items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartCatalog {
    parts: Vec<PartDefinition>,
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self {
            parts: default_parts(),
        }
    }
}

impl PartCatalog {
    /// Build and validate a catalog from explicit definitions
    pub fn new(parts: Vec<PartDefinition>) -> Result<Self> {
        let catalog = Self { parts };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn parts(&self) -> &[PartDefinition] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Look up a part by exact name
    pub fn get(&self, name: &str) -> Option<&PartDefinition> {
        self.parts.iter().find(|part| part.name == name)
    }

    /// Shortest km interval in the catalog
    pub fn smallest_interval_km(&self) -> Option<f64> {
        self.parts
            .iter()
            .map(|part| part.interval_km)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Parts whose keywords appear in lower-cased service text
    pub fn matching<'a>(
        &'a self,
        searchable_text: &'a str,
    ) -> impl Iterator<Item = &'a PartDefinition> {
        self.parts
            .iter()
            .filter(move |part| part.matches(searchable_text))
    }

    /// Reject definitions the analyzer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.parts.is_empty() {
            return Err(Error::configuration("Part catalog is empty"));
        }

        let mut names = HashSet::new();
        for part in &self.parts {
            if !names.insert(part.name.as_str()) {
                return Err(Error::configuration(format!(
                    "Duplicate part '{}' in catalog",
                    part.name
                )));
            }

            if !(part.interval_km.is_finite() && part.interval_km > 0.0) {
                return Err(Error::configuration(format!(
                    "Part '{}' needs a positive km interval (got {})",
                    part.name, part.interval_km
                )));
            }

            if part.interval_months == Some(0) {
                return Err(Error::configuration(format!(
                    "Part '{}' has a zero month interval",
                    part.name
                )));
            }

            if part.keywords.is_empty() || part.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(Error::configuration(format!(
                    "Part '{}' needs at least one keyword and no blank ones",
                    part.name
                )));
            }

            if !(1..=LOWEST_PART_PRIORITY).contains(&part.priority) {
                return Err(Error::configuration(format!(
                    "Part '{}' priority must be 1..={} (got {})",
                    part.name, LOWEST_PART_PRIORITY, part.priority
                )));
            }

            let cost = &part.cost_range;
            if cost.min < 0.0 || cost.min > cost.max {
                return Err(Error::configuration(format!(
                    "Part '{}' cost range is inverted ({} > {})",
                    part.name, cost.min, cost.max
                )));
            }

            if part.labor_minutes.min > part.labor_minutes.max {
                return Err(Error::configuration(format!(
                    "Part '{}' labor range is inverted",
                    part.name
                )));
            }
        }

        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn part(
    name: &str,
    interval_km: f64,
    interval_months: u32,
    keywords: &[&str],
    cost: (f64, f64),
    labor: (u32, u32),
    priority: u8,
    is_critical: bool,
) -> PartDefinition {
    PartDefinition {
        name: name.to_string(),
        interval_km,
        interval_months: Some(interval_months),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        cost_range: CostRange::new(cost.0, cost.1),
        labor_minutes: LaborRange::new(labor.0, labor.1),
        priority,
        is_critical,
    }
}

/// Workshop defaults; keywords cover both Malay and English service notes
fn default_parts() -> Vec<PartDefinition> {
    vec![
        part(
            "Engine Oil & Filter",
            10_000.0,
            6,
            &["minyak enjin", "engine oil", "oil change", "filter minyak", "oil filter"],
            (80.0, 150.0),
            (30, 60),
            1,
            true,
        ),
        part(
            "Air Filter",
            15_000.0,
            12,
            &["air filter", "filter udara", "filter angin"],
            (30.0, 60.0),
            (15, 30),
            2,
            false,
        ),
        part(
            "Brake System",
            20_000.0,
            12,
            &["brake", "brek", "brake pad", "brake fluid", "minyak brek"],
            (150.0, 400.0),
            (60, 180),
            1,
            true,
        ),
        part(
            "Tires & Wheels",
            25_000.0,
            18,
            &["tayar", "tire", "tyre", "tukar tayar", "wheel"],
            (180.0, 350.0),
            (45, 90),
            1,
            true,
        ),
        part(
            "Transmission Service",
            30_000.0,
            24,
            &["gearbox", "transmission", "gear oil", "transmisi"],
            (200.0, 500.0),
            (120, 240),
            2,
            false,
        ),
        part(
            "Coolant System",
            40_000.0,
            24,
            &["coolant", "air radiator", "cooling system", "radiator"],
            (120.0, 300.0),
            (60, 150),
            2,
            true,
        ),
    ]
}
