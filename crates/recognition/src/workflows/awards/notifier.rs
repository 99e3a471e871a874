use serde::{Deserialize, Serialize};

use super::domain::EmployeeId;
use super::period::Period;
use super::ranking::ScoredEmployee;

/// Payload handed to the notification collaborator once a winner is durable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerNotice {
    pub period: Period,
    pub employee_id: EmployeeId,
    pub name: String,
    pub email: String,
    pub department: String,
    pub composite_score: f64,
}

impl WinnerNotice {
    pub fn from_winner(period: Period, winner: &ScoredEmployee) -> Self {
        Self {
            period,
            employee_id: winner.record.employee_id.clone(),
            name: winner.record.name.clone(),
            email: winner.record.email.clone(),
            department: winner.record.department.clone(),
            composite_score: winner.composite_score,
        }
    }

    pub fn subject(&self) -> String {
        format!(
            "Congratulations! You're {} Employee of the Month!",
            self.period.label()
        )
    }

    pub fn body(&self) -> String {
        format!(
            "Dear {name},\n\n\
             You have been selected as Employee of the Month for {month}. \
             This recognition reflects your performance, dedication, and the impact \
             you have on the {department} team.\n\n\
             Recognition score: {score:.1} out of 100\n\n\
             With appreciation,\nHR Department\n",
            name = self.name,
            month = self.period.label(),
            department = self.department,
            score = self.composite_score,
        )
    }
}

/// Outbound notification hook (e-mail, chat, or HR system adapters).
pub trait WinnerNotifier: Send + Sync {
    fn notify(&self, notice: WinnerNotice) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Result of the notification hand-off reported alongside a recorded award.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationStatus {
    Delivered,
    Failed { reason: String },
}
