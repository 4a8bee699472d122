//! Sessions — the explicit owner of everything a user accumulates:
//! selected tool, uploaded resume (with its memoized text), job description,
//! and the coaching conversation. Ending a session drops all of it.

pub mod handlers;
pub mod store;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::coach::conversation::{ChatTurn, Conversation, Speaker};
use crate::generation::dispatcher::{missing_inputs, DispatchState, Dispatcher, Tool};
use crate::generation::markdown;
use crate::resume::cache::ResumeCache;

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub dispatcher: Dispatcher,
    pub resume: ResumeCache,
    pub job_description: Option<String>,
    pub conversation: Conversation,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            dispatcher: Dispatcher::default(),
            resume: ResumeCache::default(),
            job_description: None,
            conversation: Conversation::default(),
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        let ready = missing_inputs(self, tool).is_empty();
        self.dispatcher.select(tool, ready);
    }

    /// Stores an uploaded resume. Identical bytes keep the already extracted text.
    pub fn store_resume(&mut self, file_name: Option<String>, bytes: Bytes) -> bool {
        let replaced = self.resume.store(file_name, bytes);
        self.refresh_readiness();
        replaced
    }

    /// Sets the job description; blank text clears it.
    pub fn set_job_description(&mut self, text: String) {
        self.job_description = if text.trim().is_empty() { None } else { Some(text) };
        self.refresh_readiness();
    }

    pub fn reset_chat(&mut self) {
        if !self.conversation.is_empty() {
            info!("Clearing {} chat turn(s) for session {}", self.conversation.len(), self.id);
            self.conversation.clear();
        }
    }

    fn refresh_readiness(&mut self) {
        let ready = missing_inputs(self, self.dispatcher.tool()).is_empty();
        self.dispatcher.inputs_changed(ready);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let tool = self.dispatcher.tool();
        SessionSnapshot {
            session_id: self.id,
            created_at: self.created_at,
            tool,
            state: self.dispatcher.state(),
            resume: self.resume.current().map(|upload| ResumeSummary {
                file_name: upload.file_name.clone(),
                fingerprint: upload.fingerprint.clone(),
            }),
            job_description: self.job_description.clone(),
            missing_inputs: missing_inputs(self, tool),
            last_output: self.dispatcher.last_output().map(String::from),
            last_output_html: self.dispatcher.last_output().map(markdown::to_html),
            last_error: self.dispatcher.last_error().map(String::from),
            history: self.conversation.turns().iter().map(TurnView::from).collect(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub file_name: Option<String>,
    pub fingerprint: String,
}

/// What the UI renders for a session.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub tool: Tool,
    pub state: DispatchState,
    pub resume: Option<ResumeSummary>,
    pub job_description: Option<String>,
    pub missing_inputs: Vec<&'static str>,
    pub last_output: Option<String>,
    pub last_output_html: Option<String>,
    pub last_error: Option<String>,
    pub history: Vec<TurnView>,
}

/// A chat turn as shown to the client. Assistant replies carry rendered HTML.
#[derive(Debug, Serialize)]
pub struct TurnView {
    #[serde(flatten)]
    pub turn: ChatTurn,
    pub html: Option<String>,
}

impl From<&ChatTurn> for TurnView {
    fn from(turn: &ChatTurn) -> Self {
        let html = match turn.speaker() {
            Speaker::Assistant => Some(markdown::to_html(turn.text())),
            Speaker::User => None,
        };
        Self {
            turn: turn.clone(),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_drive_idle_and_input_collected() {
        let mut session = Session::new();
        session.select_tool(Tool::CoverLetter);
        assert_eq!(session.dispatcher.state(), DispatchState::Idle);

        session.store_resume(Some("cv.pdf".into()), Bytes::from_static(b"%PDF"));
        assert_eq!(session.dispatcher.state(), DispatchState::Idle);

        session.set_job_description("Staff engineer".to_string());
        assert_eq!(session.dispatcher.state(), DispatchState::InputCollected);

        session.set_job_description("   ".to_string());
        assert_eq!(session.dispatcher.state(), DispatchState::Idle);
        assert!(session.job_description.is_none());
    }

    #[test]
    fn test_snapshot_reports_missing_inputs() {
        let mut session = Session::new();
        session.select_tool(Tool::ResumeMatcher);
        session.set_job_description("SRE".to_string());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.tool, Tool::ResumeMatcher);
        assert_eq!(snapshot.missing_inputs, vec!["resume"]);
        assert!(snapshot.resume.is_none());
        assert_eq!(snapshot.job_description.as_deref(), Some("SRE"));
    }

    #[test]
    fn test_snapshot_renders_assistant_turns_only() {
        let mut session = Session::new();
        session.conversation.push_user("**bold** question");
        session.conversation.push_assistant("- learn Rust");

        let snapshot = session.snapshot();
        assert!(snapshot.history[0].html.is_none());
        assert_eq!(
            snapshot.history[1].html.as_deref(),
            Some("<ul>\n<li>learn Rust</li>\n</ul>\n")
        );
        assert!(snapshot.last_output_html.is_none());
    }

    #[test]
    fn test_reset_chat_keeps_resume() {
        let mut session = Session::new();
        session.store_resume(None, Bytes::from_static(b"%PDF"));
        session.conversation.push_user("hello");
        session.reset_chat();
        assert!(session.conversation.is_empty());
        assert!(!session.resume.is_empty());
    }
}
