//! Min-max rescaling of raw metric columns onto 0..=100.
//!
//! A column with no spread maps every employee to [`DEGENERATE_MIDPOINT`].

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::super::domain::{EmployeeId, EmployeeRecord, InputError, Metric};

/// Normalized value assigned to every employee when a metric is constant across the cohort.
pub const DEGENERATE_MIDPOINT: f64 = 50.0;

pub const NORMALIZED_SCALE: f64 = 100.0;

/// Observed spread of a metric within one cohort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let mut range = Self {
            min: first,
            max: first,
        };
        for value in values {
            if value < range.min {
                range.min = value;
            }
            if value > range.max {
                range.max = value;
            }
        }
        Some(range)
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn scale(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return DEGENERATE_MIDPOINT;
        }
        (value - self.min) / (self.max - self.min) * NORMALIZED_SCALE
    }
}

/// Per-employee normalized metric values for the current cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMetrics {
    pub employee_id: EmployeeId,
    values: BTreeMap<Metric, f64>,
}

impl NormalizedMetrics {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(metric, value)| (*metric, *value))
    }
}

/// Checks the cohort is non-empty, ids are unique, and every value is in its domain.
pub fn validate_cohort(cohort: &[EmployeeRecord]) -> Result<(), InputError> {
    if cohort.is_empty() {
        return Err(InputError::EmptyCohort);
    }

    let mut seen = HashSet::with_capacity(cohort.len());
    for (index, record) in cohort.iter().enumerate() {
        record.validate(index + 1)?;
        if !seen.insert(&record.employee_id) {
            return Err(InputError::DuplicateEmployee(record.employee_id.clone()));
        }
    }

    Ok(())
}

/// Normalizes `metrics` for every employee, preserving cohort order.
pub fn normalize_cohort(
    cohort: &[EmployeeRecord],
    metrics: &[Metric],
) -> Result<Vec<NormalizedMetrics>, InputError> {
    validate_cohort(cohort)?;

    let mut ranges = BTreeMap::new();
    for &metric in metrics {
        if let Some(range) = MetricRange::of(cohort.iter().map(|record| record.metric(metric))) {
            ranges.insert(metric, range);
        }
    }

    let normalized = cohort
        .iter()
        .map(|record| NormalizedMetrics {
            employee_id: record.employee_id.clone(),
            values: ranges
                .iter()
                .map(|(metric, range)| (*metric, range.scale(record.metric(*metric))))
                .collect(),
        })
        .collect();

    Ok(normalized)
}
