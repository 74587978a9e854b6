use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use sched_core::date::{parse_date, DATE_FORMAT};
use sched_core::models::Task;
use sched_core::query::TaskQuery;
use sched_core::recurrence;
use sched_core::repository::TaskRepository;
use sched_core::validation::{check_id, ValidationMode};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug)]
pub struct NextDateParams {
    pub now: Option<String>,
    pub date: Option<String>,
    pub repeat: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct IdParams {
    pub id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ListParams {
    pub search: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Serialize, Debug)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Serialize, Debug)]
pub struct EmptyResponse {}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Builds the API router. Paths outside `/api` are served from `web_dir`.
pub fn create_router(state: Arc<AppState>, web_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/nextdate", get(next_date))
        .route(
            "/api/task",
            post(create_task)
                .get(get_task)
                .put(update_task)
                .delete(delete_task),
        )
        .route("/api/tasks", get(list_tasks))
        .route("/api/task/done", post(complete_task))
        .fallback_service(ServeDir::new(web_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/nextdate?now=YYYYMMDD&date=YYYYMMDD&repeat=RULE
///
/// Answers with the next date as plain text, or a plain-text 400.
pub async fn next_date(Query(params): Query<NextDateParams>) -> Response {
    match compute_next_date(params) {
        Ok(next) => next.into_response(),
        Err(message) => (StatusCode::BAD_REQUEST, message).into_response(),
    }
}

fn compute_next_date(params: NextDateParams) -> Result<String, String> {
    let now = required_param("now", params.now)?;
    let date = required_param("date", params.date)?;
    let repeat = required_param("repeat", params.repeat)?;

    let now = parse_date(&now).map_err(|e| {
        tracing::warn!(error = %e, "wrong value of \"now\" parameter");
        format!("wrong value of \"now\" parameter, expected {}: {}", DATE_FORMAT, e)
    })?;

    recurrence::next_date(now, &date, &repeat).map_err(|e| {
        tracing::warn!(error = %e, %date, %repeat, "failed to get the next date");
        e.to_string()
    })
}

fn required_param(name: &str, value: Option<String>) -> Result<String, String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        tracing::warn!(param = name, "next date requested without parameter");
        format!("parameter \"{}\" is not defined", name)
    })
}

/// POST /api/task
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Task>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(mut task) = payload.map_err(|e| {
        tracing::warn!(error = %e, "failed to decode task");
        ApiError::bad_request(format!("cannot read request body: {}", e.body_text()))
    })?;

    task.validate(ValidationMode::Create, state.clock.today())
        .map_err(|e| {
            tracing::warn!(error = %e, "failed to validate task");
            ApiError::bad_request(e.to_string())
        })?;

    let id = state.repository.add_task(&task).await?;
    tracing::info!(task_id = id, date = %task.date, "task created");
    Ok(Json(CreatedResponse { id: id.to_string() }))
}

/// GET /api/tasks?search=TEXT
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let query = TaskQuery::from_search(params.search.as_deref());
    let tasks = state.repository.find_tasks(&query).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// GET /api/task?id=N
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let task = state
        .repository
        .find_task_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("task {} not found", id)))?;
    Ok(Json(task))
}

/// PUT /api/task
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Task>, JsonRejection>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let Json(mut task) = payload.map_err(|e| {
        tracing::warn!(error = %e, "failed to decode task");
        ApiError::bad_request(format!("cannot read request body: {}", e.body_text()))
    })?;

    task.validate(ValidationMode::Update, state.clock.today())
        .map_err(|e| {
            tracing::warn!(error = %e, task_id = %task.id, "task info is invalid");
            ApiError::bad_request(e.to_string())
        })?;

    state.repository.update_task(&task).await?;
    tracing::info!(task_id = %task.id, date = %task.date, "task updated");
    Ok(Json(EmptyResponse {}))
}

/// POST /api/task/done?id=N
pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    let result = state.repository.complete_task(id).await?;
    tracing::info!(task_id = id, ?result, "task marked as done");
    Ok(Json(EmptyResponse {}))
}

/// DELETE /api/task?id=N
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IdParams>,
) -> Result<Json<EmptyResponse>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    state.repository.delete_task(id).await?;
    tracing::info!(task_id = id, "task deleted");
    Ok(Json(EmptyResponse {}))
}

fn parse_id(raw: Option<&str>) -> Result<i64, ApiError> {
    check_id(raw.unwrap_or_default()).map_err(|e| {
        tracing::warn!(error = %e, "wrong task id");
        ApiError::bad_request(e.to_string())
    })
}
