//! Axum route handlers for session lifecycle and inputs.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::dispatcher::Tool;
use crate::session::{Session, SessionSnapshot};
use crate::state::AppState;

const RESUME_FIELD: &str = "file";

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub tool: Option<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct SelectToolRequest {
    pub tool: Tool,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub text: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let mut session = Session::new();
    session.select_tool(request.tool.unwrap_or_default());

    let handle = state.sessions.create(session).await;
    let snapshot = handle.lock().await.snapshot();
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(id).await?;
    let snapshot = handle.lock().await.snapshot();
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/tool
pub async fn handle_select_tool(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectToolRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.select_tool(request.tool);
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/resume
///
/// Multipart upload with the PDF in field `file`. Parsing is deferred to the first
/// action that needs the text; re-uploading the same bytes reuses the cached text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(id).await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded resume is empty".to_string()));
        }

        let mut session = handle.lock().await;
        let replaced = session.store_resume(file_name, bytes);
        info!(
            "Resume uploaded for session {id} ({}replaced previous file)",
            if replaced { "" } else { "not " }
        );
        return Ok(Json(session.snapshot()));
    }

    Err(AppError::Validation(format!(
        "multipart field '{RESUME_FIELD}' is required"
    )))
}

/// PUT /api/v1/sessions/:id/job-description
pub async fn handle_set_job_description(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.set_job_description(request.text);
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/sessions/:id/reset-chat
pub async fn handle_reset_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.reset_chat();
    Ok(Json(session.snapshot()))
}
