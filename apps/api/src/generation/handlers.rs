//! Axum route handlers for the resume tools.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::dispatcher::{self, DispatchState, Tool};
use crate::generation::markdown;
use crate::session::SessionSnapshot;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ToolInfo {
    pub tool: Tool,
    pub label: &'static str,
    pub action: &'static str,
    pub requires_resume: bool,
    pub requires_job_description: bool,
    pub chat: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub tool: Tool,
    pub state: DispatchState,
    /// Raw model text.
    pub output: String,
    /// `output` rendered from markdown.
    pub output_html: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub reply_html: String,
    pub session: SessionSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tools
pub async fn handle_list_tools() -> Json<Vec<ToolInfo>> {
    Json(
        Tool::ALL
            .into_iter()
            .map(|tool| ToolInfo {
                tool,
                label: tool.label(),
                action: tool.action(),
                requires_resume: true,
                requires_job_description: tool.requires_job_description(),
                chat: tool.is_chat(),
            })
            .collect(),
    )
}

/// POST /api/v1/sessions/:id/generate
///
/// Runs the session's active one-shot tool. Blocks until the completion returns.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;

    let output = dispatcher::generate(&mut session, state.llm.as_ref(), &state.extractor).await?;

    Ok(Json(GenerateResponse {
        tool: session.dispatcher.tool(),
        state: session.dispatcher.state(),
        output_html: markdown::to_html(&output),
        output,
    }))
}

/// POST /api/v1/sessions/:id/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;

    let reply = dispatcher::chat(
        &mut session,
        &request.message,
        state.llm.as_ref(),
        &state.extractor,
    )
    .await?;

    Ok(Json(ChatResponse {
        reply_html: markdown::to_html(&reply),
        reply,
        session: session.snapshot(),
    }))
}
