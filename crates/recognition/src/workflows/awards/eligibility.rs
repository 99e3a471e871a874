use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::domain::EmployeeRecord;
use super::history::WinnerHistoryEntry;
use super::period::Period;

/// Employees below this tenure cannot win; exactly this many months is eligible.
pub const MIN_MONTHS_EMPLOYED: u32 = 6;

/// A failed eligibility rule, with enough detail to explain it on a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum IneligibilityReason {
    #[serde(rename = "ineligible_tenure")]
    InsufficientTenure {
        months_employed: u32,
        required_months: u32,
    },
    #[serde(rename = "ineligible_prior_winner")]
    PriorWinner { period: Period },
}

impl IneligibilityReason {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientTenure { .. } => "ineligible_tenure",
            Self::PriorWinner { .. } => "ineligible_prior_winner",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::InsufficientTenure {
                months_employed,
                required_months,
            } => format!("tenure {months_employed} months < {required_months} months"),
            Self::PriorWinner { period } => format!("won {}", period.label()),
        }
    }
}

/// Eligibility is the set of failed rules; an empty set means eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    reasons: Vec<IneligibilityReason>,
}

impl Serialize for Eligibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Eligibility", 2)?;
        state.serialize_field("eligible", &self.is_eligible())?;
        state.serialize_field("reasons", &self.reasons)?;
        state.end()
    }
}

impl Default for Eligibility {
    fn default() -> Self {
        Self::eligible()
    }
}

impl Eligibility {
    pub fn eligible() -> Self {
        Self::from_reasons(Vec::new())
    }

    pub fn from_reasons(reasons: Vec<IneligibilityReason>) -> Self {
        Self { reasons }
    }

    pub fn is_eligible(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn reasons(&self) -> &[IneligibilityReason] {
        &self.reasons
    }

    pub fn has(&self, code: &str) -> bool {
        self.reasons.iter().any(|reason| reason.code() == code)
    }

    pub fn label(&self) -> String {
        if self.is_eligible() {
            "eligible".to_string()
        } else {
            self.reasons
                .iter()
                .map(IneligibilityReason::code)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn summary(&self) -> String {
        if self.is_eligible() {
            "eligible".to_string()
        } else {
            self.reasons
                .iter()
                .map(IneligibilityReason::summary)
                .collect::<Vec<_>>()
                .join("; ")
        }
    }
}

/// Tenure and no-back-to-back rules applied to every employee in a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityPolicy {
    min_months_employed: u32,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::new(MIN_MONTHS_EMPLOYED)
    }
}

impl EligibilityPolicy {
    pub fn new(min_months_employed: u32) -> Self {
        Self {
            min_months_employed,
        }
    }

    pub fn min_months_employed(&self) -> u32 {
        self.min_months_employed
    }

    /// Only the immediately preceding winner is excluded, never older history.
    pub fn assess(
        &self,
        record: &EmployeeRecord,
        last_winner: Option<&WinnerHistoryEntry>,
    ) -> Eligibility {
        let mut reasons = Vec::new();

        if record.months_employed < self.min_months_employed {
            reasons.push(IneligibilityReason::InsufficientTenure {
                months_employed: record.months_employed,
                required_months: self.min_months_employed,
            });
        }

        if let Some(entry) = last_winner {
            if entry.employee_id == record.employee_id {
                reasons.push(IneligibilityReason::PriorWinner {
                    period: entry.period,
                });
            }
        }

        Eligibility::from_reasons(reasons)
    }
}
