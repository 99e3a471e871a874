use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::EmployeeRecord;
use super::history::{HistoryError, WinnerHistoryEntry, WinnerHistoryStore};
use super::notifier::WinnerNotifier;
use super::period::Period;
use super::ranking::{ScoredEmployee, WinnerSelection};
use super::scoring::WeightConfig;
use super::service::{CycleError, RecognitionService};
use super::summary::{department_summaries, department_wins, DepartmentSummary, DepartmentWins};

#[derive(Debug, Deserialize)]
pub struct LeaderboardRequest {
    pub employees: Vec<EmployeeRecord>,
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AwardRequest {
    pub period: Period,
    pub employees: Vec<EmployeeRecord>,
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<ScoredEmployee>,
    #[serde(flatten)]
    pub selection: WinnerSelection,
    pub previous_winner: Option<WinnerHistoryEntry>,
    pub departments: Vec<DepartmentSummary>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub entries: Vec<WinnerHistoryEntry>,
    pub department_wins: Vec<DepartmentWins>,
}

/// Router exposing leaderboard evaluation, award recording, and history lookups.
pub fn recognition_router<S, N>(service: Arc<RecognitionService<S, N>>) -> Router
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/recognition/leaderboard",
            post(leaderboard_handler::<S, N>),
        )
        .route("/api/v1/recognition/awards", post(award_handler::<S, N>))
        .route("/api/v1/recognition/history", get(history_handler::<S, N>))
        .route(
            "/api/v1/recognition/history/latest",
            get(latest_handler::<S, N>),
        )
        .with_state(service)
}

fn resolve_weights(weights: Option<BTreeMap<String, f64>>) -> Result<WeightConfig, CycleError> {
    match weights {
        Some(weights) => Ok(WeightConfig::new(weights)?),
        None => Ok(WeightConfig::default()),
    }
}

pub(crate) fn error_response(error: CycleError) -> Response {
    let status = match &error {
        CycleError::Input(_)
        | CycleError::Weights(_)
        | CycleError::Selection(_)
        | CycleError::Period(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CycleError::History(HistoryError::DuplicatePeriod(_)) => StatusCode::CONFLICT,
        CycleError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
        "kind": error.kind(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn leaderboard_handler<S, N>(
    State(service): State<Arc<RecognitionService<S, N>>>,
    axum::Json(request): axum::Json<LeaderboardRequest>,
) -> Response
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    let result = resolve_weights(request.weights)
        .and_then(|weights| service.leaderboard(&request.employees, &weights));

    match result {
        Ok(leaderboard) => {
            let selection = WinnerSelection::from_leaderboard(&leaderboard);
            let departments = department_summaries(leaderboard.entries());
            let previous_winner = leaderboard.previous_winner().cloned();
            let body = LeaderboardResponse {
                leaderboard: leaderboard.into_entries(),
                selection,
                previous_winner,
                departments,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn award_handler<S, N>(
    State(service): State<Arc<RecognitionService<S, N>>>,
    axum::Json(request): axum::Json<AwardRequest>,
) -> Response
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    let result = resolve_weights(request.weights)
        .and_then(|weights| service.award(request.period, &request.employees, &weights));

    match result {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<S, N>(
    State(service): State<Arc<RecognitionService<S, N>>>,
) -> Response
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    match service.history() {
        Ok(entries) => {
            let body = HistoryResponse {
                department_wins: department_wins(&entries),
                entries,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_handler<S, N>(
    State(service): State<Arc<RecognitionService<S, N>>>,
) -> Response
where
    S: WinnerHistoryStore + 'static,
    N: WinnerNotifier + 'static,
{
    match service.latest_winner() {
        Ok(entry) => (StatusCode::OK, axum::Json(json!({ "winner": entry }))).into_response(),
        Err(error) => error_response(error),
    }
}
