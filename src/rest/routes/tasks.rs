// rest/routes/tasks.rs — CRUD routes for the tasks collection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

use crate::tasks::{Task, TaskDraft, TaskError, TaskPatch};
use crate::AppContext;

type ApiError = (StatusCode, Json<Value>);

fn reject(err: TaskError) -> ApiError {
    let status = match &err {
        TaskError::Validation(_) | TaskError::InvalidId => StatusCode::BAD_REQUEST,
        TaskError::NotFound => StatusCode::NOT_FOUND,
        TaskError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("store failure: {err}");
    }
    (status, Json(json!({ "error": err.to_string() })))
}

/// Malformed or missing JSON body (syntax error, wrong content type, bad
/// field type) is a 400 in the same `{error}` envelope as domain errors.
fn bad_body(rejection: JsonRejection) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": rejection.body_text() })),
    )
}

/// Identifier-format gate shared by every `/tasks/{id}` route. A malformed
/// id is rejected here without touching the store.
fn checked_id(ctx: &AppContext, id: &str) -> Result<(), ApiError> {
    if ctx.store.is_valid_id(id) {
        Ok(())
    } else {
        Err(reject(TaskError::InvalidId))
    }
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(draft) = body.map_err(bad_body)?;
    let fields = draft.validate().map_err(reject)?;
    let task = ctx.store.insert(fields).await.map_err(reject)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = ctx.store.list().await.map_err(reject)?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    checked_id(&ctx, &id)?;
    let task = ctx.store.get(&id).await.map_err(reject)?;
    Ok(Json(task))
}

pub async fn replace_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    checked_id(&ctx, &id)?;
    let Json(draft) = body.map_err(bad_body)?;
    let fields = draft.validate().map_err(reject)?;
    let task = ctx.store.replace(&id, fields).await.map_err(reject)?;
    Ok(Json(task))
}

pub async fn patch_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    checked_id(&ctx, &id)?;
    let Json(patch) = body.map_err(bad_body)?;
    let patch = patch.validate().map_err(reject)?;
    let task = ctx.store.patch(&id, patch).await.map_err(reject)?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    checked_id(&ctx, &id)?;
    ctx.store.delete(&id).await.map_err(reject)?;
    Ok(Json(json!({ "ok": true })))
}
