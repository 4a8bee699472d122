//! Career Coach — a resume-aware chat over the session's conversation log.
//!
//! Per submission: append the user turn, build a fresh system instruction from the
//! current resume text, send system + full history, append the reply.

pub mod conversation;

use tracing::info;

use crate::coach::conversation::Conversation;
use crate::errors::AppError;
use crate::generation::prompts::COACH_SYSTEM;
use crate::llm_client::CompletionService;

/// Runs one coaching exchange against `conversation`.
///
/// The user turn is appended before the call and stays even if the call fails.
/// The assistant turn is appended only on success.
pub async fn coach_reply(
    conversation: &mut Conversation,
    resume_text: &str,
    question: &str,
    llm: &dyn CompletionService,
) -> Result<String, AppError> {
    conversation.push_user(question);

    let system = COACH_SYSTEM.render(&[("resume_text", resume_text)])?;
    let messages = conversation.to_messages(system);
    info!(
        "Coach call with {} history turn(s), system instruction {} chars",
        conversation.len(),
        messages[0].content().len()
    );

    let reply = llm.complete(&messages).await?;
    conversation.push_assistant(reply.clone());

    Ok(reply)
}
