use super::super::domain::EmployeeRecord;
use super::config::WeightConfig;
use super::normalizer::{NormalizedMetrics, NORMALIZED_SCALE};
use super::ScoreComponent;

/// Weighted mean of the normalized metrics: `Σ(normalized × weight) / Σ weight`.
pub(crate) fn composite_score(
    record: &EmployeeRecord,
    normalized: &NormalizedMetrics,
    weights: &WeightConfig,
) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::new();
    let mut weighted_sum = 0.0;

    for (metric, weight) in weights.iter() {
        let value = normalized.get(metric).unwrap_or(0.0);
        weighted_sum += value * weight;

        components.push(ScoreComponent {
            metric,
            raw: record.metric(metric),
            normalized: value,
            weight_share: weights.share(metric),
            contribution: value * weights.share(metric),
        });
    }

    // Only absorbs floating point drift at the 100 boundary; inputs are already validated.
    let score = (weighted_sum / weights.total()).clamp(0.0, NORMALIZED_SCALE);
    (components, score)
}
