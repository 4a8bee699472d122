pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    response::Html,
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as tools;
use crate::session::handlers as sessions;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_handler))
        .route("/api/v1/tools", get(tools::handle_list_tools))
        // Session lifecycle and inputs
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_end_session),
        )
        .route("/api/v1/sessions/:id/tool", put(sessions::handle_select_tool))
        .route(
            "/api/v1/sessions/:id/resume",
            post(sessions::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/sessions/:id/job-description",
            put(sessions::handle_set_job_description),
        )
        .route(
            "/api/v1/sessions/:id/reset-chat",
            post(sessions::handle_reset_chat),
        )
        // Tools
        .route("/api/v1/sessions/:id/generate", post(tools::handle_generate))
        .route("/api/v1/sessions/:id/chat", post(tools::handle_chat))
        .with_state(state)
}
