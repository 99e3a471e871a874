use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::Metric;

/// Caller-supplied metric weights. Weights need not sum to one; the scorer
/// divides by the total so composites stay on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct WeightConfig {
    weights: BTreeMap<Metric, f64>,
    total: f64,
}

/// Rejected weight configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightConfigError {
    #[error("unrecognized metric '{0}' (expected performance_score, peer_nominations, attendance_pct or manager_rating)")]
    UnrecognizedMetric(String),
    #[error("metric {0} is weighted more than once")]
    DuplicateMetric(Metric),
    #[error("weight for {metric} must be a finite, non-negative number (found {weight})")]
    InvalidWeight { metric: Metric, weight: f64 },
    #[error("all weights are zero; the composite score is undefined")]
    AllWeightsZero,
}

impl WeightConfig {
    /// Builds a configuration from metric names as supplied by a UI or request body.
    pub fn new<I, K>(weights: I) -> Result<Self, WeightConfigError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for (name, weight) in weights {
            let name = name.as_ref();
            let metric = Metric::from_name(name)
                .ok_or_else(|| WeightConfigError::UnrecognizedMetric(name.trim().to_string()))?;
            resolved.push((metric, weight));
        }
        Self::from_metrics(resolved)
    }

    pub fn from_metrics<I>(weights: I) -> Result<Self, WeightConfigError>
    where
        I: IntoIterator<Item = (Metric, f64)>,
    {
        let mut map = BTreeMap::new();
        for (metric, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightConfigError::InvalidWeight { metric, weight });
            }
            if map.insert(metric, weight).is_some() {
                return Err(WeightConfigError::DuplicateMetric(metric));
            }
        }

        let total: f64 = map.values().sum();
        if total <= 0.0 {
            return Err(WeightConfigError::AllWeightsZero);
        }

        Ok(Self {
            weights: map,
            total,
        })
    }

    /// Raw weight; metrics left out of the configuration weigh zero.
    pub fn weight(&self, metric: Metric) -> f64 {
        self.weights.get(&metric).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Fraction of the composite carried by `metric`.
    pub fn share(&self, metric: Metric) -> f64 {
        self.weight(metric) / self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL
            .into_iter()
            .map(move |metric| (metric, self.weight(metric)))
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        let weights = BTreeMap::from([
            (Metric::PerformanceScore, 0.40),
            (Metric::PeerNominations, 0.30),
            (Metric::AttendancePct, 0.20),
            (Metric::ManagerRating, 0.10),
        ]);
        let total = weights.values().sum();
        Self { weights, total }
    }
}

impl TryFrom<BTreeMap<String, f64>> for WeightConfig {
    type Error = WeightConfigError;

    fn try_from(value: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeightConfig> for BTreeMap<String, f64> {
    fn from(value: WeightConfig) -> Self {
        value
            .weights
            .into_iter()
            .map(|(metric, weight)| (metric.name().to_string(), weight))
            .collect()
    }
}
