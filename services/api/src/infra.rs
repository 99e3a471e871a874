use clap::Args;
use metrics_exporter_prometheus::PrometheusHandle;
use recognition::config::AppConfig;
use recognition::error::AppError;
use recognition::workflows::awards::{
    JsonFileHistoryStore, Metric, NotifyError, Period, RecognitionService, WeightConfig,
    WeightConfigError, WinnerNotice, WinnerNotifier,
};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FileBackedService = RecognitionService<JsonFileHistoryStore, LogNotifier>;

/// Hands winner notices to the log stream; mail delivery is left to whatever
/// ships those logs.
#[derive(Debug, Default, Clone)]
pub(crate) struct LogNotifier;

impl WinnerNotifier for LogNotifier {
    fn notify(&self, notice: WinnerNotice) -> Result<(), NotifyError> {
        info!(
            period = %notice.period,
            employee_id = %notice.employee_id,
            email = %notice.email,
            subject = %notice.subject(),
            "winner notice queued"
        );
        Ok(())
    }
}

/// Loads configuration and applies a `--history` override.
pub(crate) fn load_config(history: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = history {
        config.recognition.history_path = path;
    }
    Ok(config)
}

pub(crate) fn open_service(config: &AppConfig) -> Result<FileBackedService, AppError> {
    let store = JsonFileHistoryStore::open(config.recognition.history_path.clone())?;
    Ok(RecognitionService::with_policy(
        Arc::new(store),
        Arc::new(LogNotifier),
        config.recognition.policy(),
    ))
}

#[derive(Args, Debug, Clone)]
pub(crate) struct WeightArgs {
    /// Weight of the performance score
    #[arg(long, default_value_t = 0.40)]
    pub(crate) performance_weight: f64,
    /// Weight of peer nominations
    #[arg(long, default_value_t = 0.30)]
    pub(crate) peer_weight: f64,
    /// Weight of attendance percentage
    #[arg(long, default_value_t = 0.20)]
    pub(crate) attendance_weight: f64,
    /// Weight of the manager rating
    #[arg(long, default_value_t = 0.10)]
    pub(crate) manager_weight: f64,
}

impl WeightArgs {
    pub(crate) fn to_config(&self) -> Result<WeightConfig, WeightConfigError> {
        WeightConfig::from_metrics([
            (Metric::PerformanceScore, self.performance_weight),
            (Metric::PeerNominations, self.peer_weight),
            (Metric::AttendancePct, self.attendance_weight),
            (Metric::ManagerRating, self.manager_weight),
        ])
    }
}

pub(crate) fn parse_period(raw: &str) -> Result<Period, String> {
    raw.trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM ({err})"))
}
