//! Tool Dispatcher — runs the selected tool for a session.
//!
//! Flow: check inputs → Generating → resume text (memoized) → render template →
//!       completion → Displayed.
//! Any failure moves through Failed and settles back on InputCollected so the user
//! can retry. Output is all-or-nothing: nothing is stored unless the whole pipeline
//! succeeds.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coach::coach_reply;
use crate::errors::AppError;
use crate::generation::prompts::{CHECKER, COVER_LETTER, MATCHER};
use crate::llm_client::{ChatMessage, CompletionService};
use crate::resume::extractor::PdfExtractor;
use crate::session::Session;

// ────────────────────────────────────────────────────────────────────────────
// Tools and states
// ────────────────────────────────────────────────────────────────────────────

/// The four mutually exclusive tools. Only the user switches between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    CoverLetter,
    ResumeMatcher,
    ResumeChecker,
    CareerCoach,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::CoverLetter,
        Tool::ResumeMatcher,
        Tool::ResumeChecker,
        Tool::CareerCoach,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::CoverLetter => "Cover Letter",
            Tool::ResumeMatcher => "Resume Matcher",
            Tool::ResumeChecker => "Resume Checker",
            Tool::CareerCoach => "Career Coach",
        }
    }

    /// Label of the button that triggers generation.
    pub fn action(self) -> &'static str {
        match self {
            Tool::CoverLetter => "Generate",
            Tool::ResumeMatcher => "Analyze",
            Tool::ResumeChecker => "Evaluate",
            Tool::CareerCoach => "Send",
        }
    }

    pub fn requires_job_description(self) -> bool {
        matches!(self, Tool::CoverLetter | Tool::ResumeMatcher)
    }

    pub fn is_chat(self) -> bool {
        self == Tool::CareerCoach
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    #[default]
    Idle,
    InputCollected,
    Generating,
    Displayed,
    Failed,
}

/// Per-session dispatcher: active tool, state, and the last result shown.
#[derive(Debug, Default)]
pub struct Dispatcher {
    tool: Tool,
    state: DispatchState,
    last_output: Option<String>,
    last_error: Option<String>,
}

impl Dispatcher {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Switches tools. The previous result is discarded.
    pub fn select(&mut self, tool: Tool, ready: bool) {
        self.tool = tool;
        self.inputs_changed(ready);
    }

    /// Re-evaluates Idle/InputCollected after an input changed.
    pub fn inputs_changed(&mut self, ready: bool) {
        self.last_output = None;
        self.last_error = None;
        self.state = if ready {
            DispatchState::InputCollected
        } else {
            DispatchState::Idle
        };
    }

    fn begin(&mut self) {
        self.state = DispatchState::Generating;
        self.last_error = None;
    }

    fn succeed(&mut self, output: String) {
        self.last_output = Some(output);
        self.state = DispatchState::Displayed;
    }

    /// Generating → Failed. The error is kept for display and no output survives.
    fn fail(&mut self, error: &AppError) {
        warn!("{} failed: {error}", self.tool.label());
        self.state = DispatchState::Failed;
        self.last_output = None;
        self.last_error = Some(error.to_string());
    }

    /// Failed → InputCollected, keeping `last_error` so the user sees why.
    fn recover(&mut self) {
        if self.state == DispatchState::Failed {
            info!("{}: Failed -> InputCollected, ready to retry", self.tool.label());
            self.state = DispatchState::InputCollected;
        }
    }

    fn settle_failure(&mut self, error: &AppError) {
        self.fail(error);
        self.recover();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input gating
// ────────────────────────────────────────────────────────────────────────────

/// Names of the inputs `tool` still needs, in display order.
pub fn missing_inputs(session: &Session, tool: Tool) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if session.resume.is_empty() {
        missing.push("resume");
    }
    if tool.requires_job_description() && session.job_description.is_none() {
        missing.push("job_description");
    }
    missing
}

fn ensure_ready(session: &Session, tool: Tool) -> Result<(), AppError> {
    let missing = missing_inputs(session, tool);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::ActionDisabled(format!(
            "{} needs: {}",
            tool.label(),
            missing.join(", ")
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

/// Runs the active one-shot tool (Cover Letter, Resume Matcher, Resume Checker).
pub async fn generate(
    session: &mut Session,
    llm: &dyn CompletionService,
    extractor: &PdfExtractor,
) -> Result<String, AppError> {
    let tool = session.dispatcher.tool();
    if tool.is_chat() {
        return Err(AppError::ActionDisabled(
            "Career Coach takes chat messages, not generate".to_string(),
        ));
    }
    ensure_ready(session, tool)?;

    session.dispatcher.begin();
    info!("Running {} for session {}", tool.label(), session.id);

    match run_one_shot(session, tool, llm, extractor).await {
        Ok(output) => {
            session.dispatcher.succeed(output.clone());
            Ok(output)
        }
        Err(e) => {
            session.dispatcher.settle_failure(&e);
            Err(e)
        }
    }
}

/// Submits one Career Coach message.
pub async fn chat(
    session: &mut Session,
    message: &str,
    llm: &dyn CompletionService,
    extractor: &PdfExtractor,
) -> Result<String, AppError> {
    if !session.dispatcher.tool().is_chat() {
        return Err(AppError::ActionDisabled(format!(
            "{} does not take chat messages",
            session.dispatcher.tool().label()
        )));
    }
    if message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    ensure_ready(session, Tool::CareerCoach)?;

    session.dispatcher.begin();

    let result = match session.resume.text(extractor).await {
        Ok(Some(resume_text)) => {
            coach_reply(&mut session.conversation, &resume_text, message, llm).await
        }
        Ok(None) => Err(AppError::ActionDisabled("Career Coach needs: resume".to_string())),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(reply) => {
            session.dispatcher.succeed(reply.clone());
            Ok(reply)
        }
        Err(e) => {
            session.dispatcher.settle_failure(&e);
            Err(e)
        }
    }
}

async fn run_one_shot(
    session: &mut Session,
    tool: Tool,
    llm: &dyn CompletionService,
    extractor: &PdfExtractor,
) -> Result<String, AppError> {
    let resume_text = session
        .resume
        .text(extractor)
        .await?
        .ok_or_else(|| AppError::ActionDisabled(format!("{} needs: resume", tool.label())))?;
    let job_description = session.job_description.as_deref().unwrap_or_default();

    let prompt = render_prompt(tool, &resume_text, job_description)?;
    let output = llm.complete(&[ChatMessage::User(prompt)]).await?;
    Ok(output)
}

/// Fills the template for a one-shot tool.
pub fn render_prompt(
    tool: Tool,
    resume_text: &str,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = match tool {
        Tool::CoverLetter => COVER_LETTER.render(&[
            ("job_description", job_description),
            ("resume_text", resume_text),
        ])?,
        Tool::ResumeMatcher => MATCHER.render(&[
            ("job_description", job_description),
            ("context", resume_text),
        ])?,
        Tool::ResumeChecker => CHECKER.render(&[("context", resume_text)])?,
        Tool::CareerCoach => {
            return Err(AppError::Validation(
                "Career Coach has no one-shot prompt".to_string(),
            ))
        }
    };
    Ok(prompt)
}
