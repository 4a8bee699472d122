// Resume tools: prompt templates, the tool dispatcher, and its HTTP handlers.
// All completion calls go through llm_client — no direct API calls here.

pub mod dispatcher;
pub mod handlers;
pub mod markdown;
pub mod prompts;
pub mod template;
