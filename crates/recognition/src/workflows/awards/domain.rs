use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound accepted for count-style columns (nominations, tenure).
pub const MAX_COUNT: u32 = 999;

/// Identifier wrapper for employees. Ordering is byte-wise and drives the tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Metrics that may carry a scoring weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PerformanceScore,
    PeerNominations,
    AttendancePct,
    ManagerRating,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::PerformanceScore,
        Metric::PeerNominations,
        Metric::AttendancePct,
        Metric::ManagerRating,
    ];

    /// Column and configuration key for the metric.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PerformanceScore => "performance_score",
            Self::PeerNominations => "peer_nominations",
            Self::AttendancePct => "attendance_pct",
            Self::ManagerRating => "manager_rating",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PerformanceScore => "Performance Score",
            Self::PeerNominations => "Peer Nominations",
            Self::AttendancePct => "Attendance %",
            Self::ManagerRating => "Manager Rating",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|metric| metric.name().eq_ignore_ascii_case(name))
    }

    pub(crate) const fn bounds(self) -> (f64, f64) {
        match self {
            Self::PerformanceScore | Self::AttendancePct => (0.0, 100.0),
            Self::PeerNominations => (0.0, MAX_COUNT as f64),
            Self::ManagerRating => (0.0, 10.0),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One row of the monthly snapshot, typed and parsed by the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_id: EmployeeId,
    pub name: String,
    pub department: String,
    pub performance_score: f64,
    pub peer_nominations: u32,
    pub attendance_pct: f64,
    pub manager_rating: f64,
    pub months_employed: u32,
    pub email: String,
}

impl EmployeeRecord {
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::PerformanceScore => self.performance_score,
            Metric::PeerNominations => f64::from(self.peer_nominations),
            Metric::AttendancePct => self.attendance_pct,
            Metric::ManagerRating => self.manager_rating,
        }
    }

    /// Rejects out-of-domain values; `row` is the 1-based position in the cohort.
    pub(crate) fn validate(&self, row: usize) -> Result<(), RecordViolation> {
        for metric in Metric::ALL {
            let (min, max) = metric.bounds();
            let value = self.metric(metric);
            if !value.is_finite() || value < min || value > max {
                return Err(RecordViolation {
                    row,
                    employee_id: self.employee_id.clone(),
                    field: metric.name(),
                    value,
                    min,
                    max,
                });
            }
        }

        if self.months_employed > MAX_COUNT {
            return Err(RecordViolation {
                row,
                employee_id: self.employee_id.clone(),
                field: "months_employed",
                value: f64::from(self.months_employed),
                min: 0.0,
                max: f64::from(MAX_COUNT),
            });
        }

        Ok(())
    }
}

/// Out-of-domain value found while validating a cohort.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("row {row} ({employee_id}): {field} = {value} is outside {min}..={max}")]
pub struct RecordViolation {
    pub row: usize,
    pub employee_id: EmployeeId,
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Errors raised before any scoring happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("cohort is empty; at least one employee record is required")]
    EmptyCohort,
    #[error("invalid employee record: {0}")]
    Validation(#[from] RecordViolation),
    #[error("employee id {0} appears more than once in the cohort")]
    DuplicateEmployee(EmployeeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EmployeeRecord {
        EmployeeRecord {
            employee_id: EmployeeId::from("E-1"),
            name: "Avery Lee".to_string(),
            department: "Finance".to_string(),
            performance_score: 88.0,
            peer_nominations: 4,
            attendance_pct: 97.5,
            manager_rating: 8.5,
            months_employed: 14,
            email: "avery.lee@example.com".to_string(),
        }
    }

    #[test]
    fn metric_names_round_trip_case_insensitively() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()), Some(metric));
        }
        assert_eq!(
            Metric::from_name("  Manager_Rating "),
            Some(Metric::ManagerRating)
        );
        assert_eq!(Metric::from_name("months_employed"), None);
    }

    #[test]
    fn validate_accepts_domain_edges() {
        let mut edge = record();
        edge.performance_score = 100.0;
        edge.attendance_pct = 0.0;
        edge.manager_rating = 10.0;
        edge.months_employed = MAX_COUNT;
        assert!(edge.validate(1).is_ok());
    }

    #[test]
    fn validate_names_row_and_field() {
        let mut bad = record();
        bad.attendance_pct = -1.0;

        let violation = bad.validate(3).expect_err("negative attendance rejected");
        assert_eq!(violation.row, 3);
        assert_eq!(violation.field, "attendance_pct");
        assert_eq!(violation.employee_id, EmployeeId::from("E-1"));
        assert!(violation.to_string().contains("row 3"));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let mut bad = record();
        bad.manager_rating = f64::NAN;

        let violation = bad.validate(1).expect_err("NaN rejected");
        assert_eq!(violation.field, "manager_rating");
    }

    #[test]
    fn validate_rejects_tenure_above_ceiling() {
        let mut bad = record();
        bad.months_employed = MAX_COUNT + 1;

        let violation = bad.validate(2).expect_err("tenure ceiling enforced");
        assert_eq!(violation.field, "months_employed");
    }
}
