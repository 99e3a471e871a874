mod export;
mod file;

pub use export::{write_history_csv, HISTORY_CSV_COLUMNS};
pub use file::JsonFileHistoryStore;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::EmployeeId;
use super::period::Period;
use super::ranking::ScoredEmployee;

/// Durable record of one completed recognition cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinnerHistoryEntry {
    pub period: Period,
    pub employee_id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub department: String,
    pub composite_score: f64,
    pub selected_at: DateTime<Utc>,
}

impl WinnerHistoryEntry {
    pub fn from_winner(period: Period, winner: &ScoredEmployee, selected_at: DateTime<Utc>) -> Self {
        Self {
            period,
            employee_id: winner.record.employee_id.clone(),
            name: winner.record.name.clone(),
            department: winner.record.department.clone(),
            composite_score: winner.composite_score,
            selected_at,
        }
    }
}

/// Append-only winner log consulted by the eligibility filter.
pub trait WinnerHistoryStore: Send + Sync {
    /// Appends `entry`; a second entry for the same period is rejected.
    fn record_winner(&self, entry: WinnerHistoryEntry) -> Result<WinnerHistoryEntry, HistoryError>;
    /// Latest entry by period ordering, or `None` before the first cycle.
    fn most_recent_winner(&self) -> Result<Option<WinnerHistoryEntry>, HistoryError>;
    /// Every entry, oldest period first.
    fn entries(&self) -> Result<Vec<WinnerHistoryEntry>, HistoryError>;

    /// Entry already recorded for `period`, if any.
    fn entry_for(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|entry| entry.period == period))
    }

    /// Latest entry strictly before `period`; the winner a cycle for `period` excludes.
    fn winner_before(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        Ok(self
            .entries()?
            .into_iter()
            .rev()
            .find(|entry| entry.period < period))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("a winner is already recorded for {0}")]
    DuplicatePeriod(Period),
    #[error("winner history at {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("winner history at {path} is malformed: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("winner history unavailable: {0}")]
    Unavailable(String),
}

/// Inserts an entry into a period-keyed log, enforcing one entry per period.
pub(crate) fn append_entry(
    log: &mut BTreeMap<Period, WinnerHistoryEntry>,
    entry: WinnerHistoryEntry,
) -> Result<(), HistoryError> {
    if log.contains_key(&entry.period) {
        return Err(HistoryError::DuplicatePeriod(entry.period));
    }
    log.insert(entry.period, entry);
    Ok(())
}

/// Process-local store for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<BTreeMap<Period, WinnerHistoryEntry>>,
}

impl InMemoryHistoryStore {
    pub fn with_entries<I>(entries: I) -> Result<Self, HistoryError>
    where
        I: IntoIterator<Item = WinnerHistoryEntry>,
    {
        let mut log = BTreeMap::new();
        for entry in entries {
            append_entry(&mut log, entry)?;
        }
        Ok(Self {
            entries: Mutex::new(log),
        })
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<Period, WinnerHistoryEntry>>, HistoryError>
    {
        self.entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))
    }
}

impl WinnerHistoryStore for InMemoryHistoryStore {
    fn record_winner(&self, entry: WinnerHistoryEntry) -> Result<WinnerHistoryEntry, HistoryError> {
        let mut guard = self.lock()?;
        append_entry(&mut guard, entry.clone())?;
        Ok(entry)
    }

    fn most_recent_winner(&self) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard.values().next_back().cloned())
    }

    fn entries(&self) -> Result<Vec<WinnerHistoryEntry>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard.values().cloned().collect())
    }

    fn entry_for(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard.get(&period).cloned())
    }

    fn winner_before(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.lock()?;
        Ok(guard.range(..period).next_back().map(|(_, entry)| entry.clone()))
    }
}
