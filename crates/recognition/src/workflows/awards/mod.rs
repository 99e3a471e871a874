//! Monthly recognition cycle: normalization, weighted scoring, eligibility,
//! deterministic winner selection, and the append-only winner history.
//!
//! Data flows leaf-first through the submodules:
//! `scoring` (normalize + composite) → `eligibility` (consults the most recent
//! history entry) → `ranking` (order + tie-break) → `history` (append) →
//! `notifier` (hand-off). `service` wires the stages together and `router`
//! exposes them over HTTP.

pub mod domain;
pub mod eligibility;
pub mod history;
pub mod notifier;
pub mod period;
pub mod ranking;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use domain::{EmployeeId, EmployeeRecord, InputError, Metric, RecordViolation, MAX_COUNT};
pub use eligibility::{Eligibility, EligibilityPolicy, IneligibilityReason, MIN_MONTHS_EMPLOYED};
pub use history::{
    write_history_csv, HistoryError, InMemoryHistoryStore, JsonFileHistoryStore,
    WinnerHistoryEntry, WinnerHistoryStore, HISTORY_CSV_COLUMNS,
};
pub use notifier::{NotificationStatus, NotifyError, WinnerNotice, WinnerNotifier};
pub use period::{Period, PeriodError};
pub use ranking::{Leaderboard, ScoredEmployee, SelectionError, WinnerSelection};
pub use router::recognition_router;
pub use scoring::{ScoreComponent, ScoringEngine, WeightConfig, WeightConfigError};
pub use service::{evaluate_cohort, AwardOutcome, CycleError, RecognitionService};
pub use summary::{department_summaries, department_wins, DepartmentSummary, DepartmentWins};
