use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{EmployeeRecord, InputError};
use super::eligibility::EligibilityPolicy;
use super::history::{HistoryError, WinnerHistoryEntry, WinnerHistoryStore};
use super::notifier::{NotificationStatus, WinnerNotice, WinnerNotifier};
use super::period::{Period, PeriodError};
use super::ranking::{Leaderboard, ScoredEmployee, SelectionError};
use super::scoring::{ScoringEngine, WeightConfig, WeightConfigError};

/// Pure pipeline: normalize, score, assess eligibility, rank.
pub fn evaluate_cohort(
    cohort: &[EmployeeRecord],
    weights: &WeightConfig,
    policy: &EligibilityPolicy,
    previous_winner: Option<WinnerHistoryEntry>,
) -> Result<Leaderboard, InputError> {
    let engine = ScoringEngine::new(weights.clone());
    let scores = engine.score(cohort)?;

    let employees = cohort
        .iter()
        .zip(scores)
        .map(|(record, score)| ScoredEmployee {
            eligibility: policy.assess(record, previous_winner.as_ref()),
            record: record.clone(),
            composite_score: score.composite_score,
            rank: 0,
            components: score.components,
        })
        .collect();

    Ok(Leaderboard::new(employees, previous_winner))
}

/// Service composing the scoring pipeline, winner history, and notification hook.
pub struct RecognitionService<S, N> {
    history: Arc<S>,
    notifier: Arc<N>,
    policy: EligibilityPolicy,
}

impl<S, N> RecognitionService<S, N>
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    pub fn new(history: Arc<S>, notifier: Arc<N>) -> Self {
        Self::with_policy(history, notifier, EligibilityPolicy::default())
    }

    pub fn with_policy(history: Arc<S>, notifier: Arc<N>, policy: EligibilityPolicy) -> Self {
        Self {
            history,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Rank the cohort against the latest recorded winner without persisting anything.
    pub fn leaderboard(
        &self,
        cohort: &[EmployeeRecord],
        weights: &WeightConfig,
    ) -> Result<Leaderboard, CycleError> {
        let previous_winner = self.history.most_recent_winner()?;
        let leaderboard = evaluate_cohort(cohort, weights, &self.policy, previous_winner)?;

        debug!(
            cohort = cohort.len(),
            eligible = leaderboard.eligible_count(),
            "leaderboard evaluated"
        );
        Ok(leaderboard)
    }

    /// Run a full cycle for `period`: select the winner, append it to history, then notify.
    ///
    /// A period that already has a winner is rejected before any scoring, and
    /// only the winner of the latest earlier period is excluded. Nothing is
    /// written when selection fails. A notifier failure after the append is
    /// reported on the outcome because the winner is already durable.
    pub fn award(
        &self,
        period: Period,
        cohort: &[EmployeeRecord],
        weights: &WeightConfig,
    ) -> Result<AwardOutcome, CycleError> {
        if let Some(existing) = self.history.entry_for(period)? {
            warn!(%period, employee_id = %existing.employee_id, "period already has a winner");
            return Err(HistoryError::DuplicatePeriod(period).into());
        }

        let previous_winner = self.history.winner_before(period)?;
        let leaderboard = evaluate_cohort(cohort, weights, &self.policy, previous_winner)?;

        let winner = match leaderboard.winner() {
            Ok(winner) => winner.clone(),
            Err(err) => {
                warn!(%period, cohort = cohort.len(), "no eligible candidate for period");
                return Err(err.into());
            }
        };

        let entry = WinnerHistoryEntry::from_winner(period, &winner, Utc::now());
        let entry = self.history.record_winner(entry)?;
        info!(
            %period,
            employee_id = %entry.employee_id,
            composite_score = entry.composite_score,
            "winner recorded"
        );

        let notification = match self.notifier.notify(WinnerNotice::from_winner(period, &winner)) {
            Ok(()) => NotificationStatus::Delivered,
            Err(err) => {
                warn!(%period, error = %err, "winner notification failed");
                NotificationStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        Ok(AwardOutcome {
            entry,
            winner,
            notification,
        })
    }

    pub fn history(&self) -> Result<Vec<WinnerHistoryEntry>, CycleError> {
        Ok(self.history.entries()?)
    }

    pub fn latest_winner(&self) -> Result<Option<WinnerHistoryEntry>, CycleError> {
        Ok(self.history.most_recent_winner()?)
    }
}

/// Completed cycle: the durable history entry plus the notification hand-off result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardOutcome {
    pub entry: WinnerHistoryEntry,
    pub winner: ScoredEmployee,
    pub notification: NotificationStatus,
}

/// Error raised by a recognition cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Weights(#[from] WeightConfigError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Period(#[from] PeriodError),
}

impl CycleError {
    /// Stable machine-readable code for dashboards.
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::Input(InputError::EmptyCohort) => "empty_cohort",
            CycleError::Input(InputError::Validation(_)) => "validation_error",
            CycleError::Input(InputError::DuplicateEmployee(_)) => "duplicate_employee",
            CycleError::Weights(WeightConfigError::UnrecognizedMetric(_)) => "unrecognized_metric",
            CycleError::Weights(WeightConfigError::AllWeightsZero) => "all_weights_zero",
            CycleError::Weights(_) => "invalid_weights",
            CycleError::Selection(SelectionError::NoEligibleCandidate { .. }) => {
                "no_eligible_candidate"
            }
            CycleError::History(HistoryError::DuplicatePeriod(_)) => "duplicate_period",
            CycleError::History(_) => "store_io_error",
            CycleError::Period(_) => "invalid_period",
        }
    }
}
