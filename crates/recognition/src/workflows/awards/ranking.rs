use std::cmp::Ordering;

use serde::Serialize;

use super::domain::EmployeeRecord;
use super::eligibility::Eligibility;
use super::history::WinnerHistoryEntry;
use super::scoring::ScoreComponent;

/// Employee after scoring, eligibility, and ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEmployee {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    pub composite_score: f64,
    pub eligibility: Eligibility,
    pub rank: usize,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("no eligible candidate among {cohort_size} employee(s); a winner cannot be selected automatically")]
    NoEligibleCandidate { cohort_size: usize },
}

/// Leaderboard order: composite descending, then employee id ascending.
pub fn leaderboard_order(a: &ScoredEmployee, b: &ScoredEmployee) -> Ordering {
    b.composite_score
        .total_cmp(&a.composite_score)
        .then_with(|| a.record.employee_id.cmp(&b.record.employee_id))
}

/// Sorts the cohort and assigns competition ranks (equal scores share a rank).
pub(crate) fn rank_employees(mut employees: Vec<ScoredEmployee>) -> Vec<ScoredEmployee> {
    employees.sort_by(leaderboard_order);

    let mut previous: Option<(f64, usize)> = None;
    for (index, employee) in employees.iter_mut().enumerate() {
        let rank = match previous {
            Some((score, rank)) if score == employee.composite_score => rank,
            _ => index + 1,
        };
        employee.rank = rank;
        previous = Some((employee.composite_score, rank));
    }

    employees
}

/// Ranked cohort for one cycle, ineligible employees included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    entries: Vec<ScoredEmployee>,
    previous_winner: Option<WinnerHistoryEntry>,
}

impl Leaderboard {
    pub(crate) fn new(
        employees: Vec<ScoredEmployee>,
        previous_winner: Option<WinnerHistoryEntry>,
    ) -> Self {
        Self {
            entries: rank_employees(employees),
            previous_winner,
        }
    }

    pub fn entries(&self) -> &[ScoredEmployee] {
        &self.entries
    }

    pub fn previous_winner(&self) -> Option<&WinnerHistoryEntry> {
        self.previous_winner.as_ref()
    }

    pub fn eligible_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|employee| employee.eligibility.is_eligible())
            .count()
    }

    /// Highest-ranked fully eligible employee; never falls back to an ineligible one.
    pub fn winner(&self) -> Result<&ScoredEmployee, SelectionError> {
        self.entries
            .iter()
            .find(|employee| employee.eligibility.is_eligible())
            .ok_or(SelectionError::NoEligibleCandidate {
                cohort_size: self.entries.len(),
            })
    }

    pub fn into_entries(self) -> Vec<ScoredEmployee> {
        self.entries
    }
}

/// Winner, or an explicit "no winner" signal carrying the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerSelection {
    pub winner: Option<ScoredEmployee>,
    pub no_winner_reason: Option<String>,
}

impl WinnerSelection {
    pub fn from_leaderboard(leaderboard: &Leaderboard) -> Self {
        match leaderboard.winner() {
            Ok(winner) => Self {
                winner: Some(winner.clone()),
                no_winner_reason: None,
            },
            Err(err) => Self {
                winner: None,
                no_winner_reason: Some(err.to_string()),
            },
        }
    }
}
