mod config;
pub mod normalizer;
mod rules;

pub use config::{WeightConfig, WeightConfigError};
pub use normalizer::{MetricRange, NormalizedMetrics, DEGENERATE_MIDPOINT};

use super::domain::{EmployeeId, EmployeeRecord, InputError, Metric};
use serde::{Deserialize, Serialize};

/// Stateless scorer that applies a weight configuration to a cohort.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: WeightConfig,
}

impl ScoringEngine {
    pub fn new(weights: WeightConfig) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Normalizes every recognized metric across the cohort and computes one
    /// composite per employee, in cohort order.
    pub fn score(&self, cohort: &[EmployeeRecord]) -> Result<Vec<CompositeScore>, InputError> {
        let normalized = normalizer::normalize_cohort(cohort, &Metric::ALL)?;

        let scores = cohort
            .iter()
            .zip(normalized.iter())
            .map(|(record, metrics)| {
                let (components, composite_score) =
                    rules::composite_score(record, metrics, &self.weights);
                CompositeScore {
                    employee_id: record.employee_id.clone(),
                    composite_score,
                    components,
                }
            })
            .collect();

        Ok(scores)
    }
}

/// Discrete contribution of one metric, kept for transparent breakdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub metric: Metric,
    pub raw: f64,
    pub normalized: f64,
    pub weight_share: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub employee_id: EmployeeId,
    pub composite_score: f64,
    pub components: Vec<ScoreComponent>,
}
