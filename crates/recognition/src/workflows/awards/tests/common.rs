use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::workflows::awards::domain::{EmployeeId, EmployeeRecord};
use crate::workflows::awards::history::{
    HistoryError, InMemoryHistoryStore, WinnerHistoryEntry, WinnerHistoryStore,
};
use crate::workflows::awards::notifier::{NotifyError, WinnerNotice, WinnerNotifier};
use crate::workflows::awards::period::Period;
use crate::workflows::awards::{recognition_router, RecognitionService, WeightConfig};

pub(super) fn employee(
    id: &str,
    performance_score: f64,
    peer_nominations: u32,
    attendance_pct: f64,
    manager_rating: f64,
    months_employed: u32,
) -> EmployeeRecord {
    EmployeeRecord {
        employee_id: EmployeeId::from(id),
        name: format!("Employee {id}"),
        department: "Operations".to_string(),
        performance_score,
        peer_nominations,
        attendance_pct,
        manager_rating,
        months_employed,
        email: format!("{}@example.com", id.to_ascii_lowercase()),
    }
}

/// Two-person cohort where B is newer than the tenure threshold.
pub(super) fn worked_example_cohort() -> Vec<EmployeeRecord> {
    vec![
        employee("A", 90.0, 2, 95.0, 8.0, 12),
        employee("B", 70.0, 5, 80.0, 9.0, 3),
    ]
}

/// E leads on every metric, F is second, G trails.
pub(super) fn repeat_winner_cohort() -> Vec<EmployeeRecord> {
    vec![
        employee("E", 98.0, 9, 99.0, 9.5, 40),
        employee("F", 85.0, 6, 92.0, 8.0, 30),
        employee("G", 60.0, 1, 75.0, 6.0, 24),
    ]
}

pub(super) fn period(value: &str) -> Period {
    value.parse().expect("valid period")
}

pub(super) fn weights() -> WeightConfig {
    WeightConfig::default()
}

pub(super) fn history_entry(period_value: &str, employee_id: &str) -> WinnerHistoryEntry {
    WinnerHistoryEntry {
        period: period(period_value),
        employee_id: EmployeeId::from(employee_id),
        name: format!("Employee {employee_id}"),
        department: "Operations".to_string(),
        composite_score: 90.0,
        selected_at: Utc
            .with_ymd_and_hms(2026, 1, 31, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<WinnerNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<WinnerNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl WinnerNotifier for MemoryNotifier {
    fn notify(&self, notice: WinnerNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl WinnerNotifier for OfflineNotifier {
    fn notify(&self, _notice: WinnerNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableStore;

impl WinnerHistoryStore for UnavailableStore {
    fn record_winner(&self, _entry: WinnerHistoryEntry) -> Result<WinnerHistoryEntry, HistoryError> {
        Err(HistoryError::Unavailable("disk offline".to_string()))
    }

    fn most_recent_winner(&self) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("disk offline".to_string()))
    }

    fn entries(&self) -> Result<Vec<WinnerHistoryEntry>, HistoryError> {
        Err(HistoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    RecognitionService<InMemoryHistoryStore, MemoryNotifier>,
    Arc<InMemoryHistoryStore>,
    Arc<MemoryNotifier>,
) {
    let history = Arc::new(InMemoryHistoryStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = RecognitionService::new(history.clone(), notifier.clone());
    (service, history, notifier)
}

pub(super) fn router_with_service<S, N>(service: RecognitionService<S, N>) -> axum::Router
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    recognition_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
