use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::EmployeeId;
use super::history::WinnerHistoryEntry;
use super::ranking::ScoredEmployee;

/// Per-department view of one leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentSummary {
    pub department: String,
    pub headcount: usize,
    pub eligible: usize,
    pub mean_composite: f64,
    pub top_employee: EmployeeId,
    pub top_score: f64,
}

/// How often a department has produced the winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentWins {
    pub department: String,
    pub wins: usize,
}

/// Sorted by mean composite descending, then department name.
pub fn department_summaries(entries: &[ScoredEmployee]) -> Vec<DepartmentSummary> {
    let mut groups: BTreeMap<&str, Vec<&ScoredEmployee>> = BTreeMap::new();
    for employee in entries {
        groups
            .entry(employee.record.department.as_str())
            .or_default()
            .push(employee);
    }

    let mut summaries: Vec<DepartmentSummary> = groups
        .into_iter()
        .filter_map(|(department, members)| {
            // Entries arrive in leaderboard order, so the first member is the department leader.
            let top = members.first()?;
            let total: f64 = members.iter().map(|member| member.composite_score).sum();
            Some(DepartmentSummary {
                department: department.to_string(),
                headcount: members.len(),
                eligible: members
                    .iter()
                    .filter(|member| member.eligibility.is_eligible())
                    .count(),
                mean_composite: total / members.len() as f64,
                top_employee: top.record.employee_id.clone(),
                top_score: top.composite_score,
            })
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.mean_composite
            .total_cmp(&a.mean_composite)
            .then_with(|| a.department.cmp(&b.department))
    });
    summaries
}

/// Win counts per department, most wins first.
pub fn department_wins(history: &[WinnerHistoryEntry]) -> Vec<DepartmentWins> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in history {
        *counts.entry(entry.department.as_str()).or_insert(0) += 1;
    }

    let mut wins: Vec<DepartmentWins> = counts
        .into_iter()
        .map(|(department, wins)| DepartmentWins {
            department: department.to_string(),
            wins,
        })
        .collect();
    wins.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.department.cmp(&b.department)));
    wins
}
