use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{append_entry, HistoryError, WinnerHistoryEntry, WinnerHistoryStore};
use crate::workflows::awards::period::Period;

type Log = BTreeMap<Period, WinnerHistoryEntry>;

/// Winner history persisted as a JSON array, oldest period first.
///
/// Every read and append re-loads the file under the store lock, so handles
/// sharing a path see each other's winners. Appends replace the file
/// atomically (temp file, fsync, rename); a crash mid-write leaves the
/// previous history intact.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    entries: Mutex<Log>,
}

impl JsonFileHistoryStore {
    /// Opens the history at `path`; a missing or empty file is an empty history.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, HistoryError> {
        let path = path.into();
        let entries = load(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "winner history opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Log>, HistoryError> {
        self.entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))
    }

    /// Locks the store and replaces the cached log with the file's current contents.
    fn refreshed(&self) -> Result<MutexGuard<'_, Log>, HistoryError> {
        let mut guard = self.lock()?;
        *guard = load(&self.path)?;
        Ok(guard)
    }
}

impl WinnerHistoryStore for JsonFileHistoryStore {
    fn record_winner(&self, entry: WinnerHistoryEntry) -> Result<WinnerHistoryEntry, HistoryError> {
        let mut guard = self.refreshed()?;

        let mut updated = guard.clone();
        append_entry(&mut updated, entry.clone())?;
        persist(&self.path, &updated)?;
        *guard = updated;

        debug!(path = %self.path.display(), period = %entry.period, "winner history appended");
        Ok(entry)
    }

    fn most_recent_winner(&self) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.refreshed()?;
        Ok(guard.values().next_back().cloned())
    }

    fn entries(&self) -> Result<Vec<WinnerHistoryEntry>, HistoryError> {
        let guard = self.refreshed()?;
        Ok(guard.values().cloned().collect())
    }

    fn entry_for(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.refreshed()?;
        Ok(guard.get(&period).cloned())
    }

    fn winner_before(&self, period: Period) -> Result<Option<WinnerHistoryEntry>, HistoryError> {
        let guard = self.refreshed()?;
        Ok(guard.range(..period).next_back().map(|(_, entry)| entry.clone()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HistoryError + '_ {
    move |source| HistoryError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn load(path: &Path) -> Result<Log, HistoryError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Log::new()),
        Err(err) => return Err(io_error(path)(err)),
    };

    if raw.trim().is_empty() {
        return Ok(Log::new());
    }

    let entries: Vec<WinnerHistoryEntry> =
        serde_json::from_str(&raw).map_err(|source| HistoryError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;

    let mut log = Log::new();
    for entry in entries {
        append_entry(&mut log, entry)?;
    }
    Ok(log)
}

fn persist(path: &Path, log: &Log) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let entries: Vec<&WinnerHistoryEntry> = log.values().collect();
    let payload = serde_json::to_vec_pretty(&entries).map_err(|source| HistoryError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let mut temp_name = OsString::from(path.as_os_str());
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    if let Err(err) = write_synced(&temp_path, &payload) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(&temp_path)(err));
    }

    fs::rename(&temp_path, path).map_err(|err| {
        let _ = fs::remove_file(&temp_path);
        io_error(path)(err)
    })
}

fn write_synced(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(payload)?;
    file.sync_all()
}
