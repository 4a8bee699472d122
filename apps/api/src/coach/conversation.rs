//! Career coach conversation log — append-only, owned by one session.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm_client::ChatMessage;

/// Who authored a turn. System instructions are never stored as turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in the coaching conversation, tagged by its author.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "speaker", rename_all = "snake_case")]
pub enum ChatTurn {
    User { text: String, at: DateTime<Utc> },
    Assistant { text: String, at: DateTime<Utc> },
}

impl ChatTurn {
    pub fn speaker(&self) -> Speaker {
        match self {
            ChatTurn::User { .. } => Speaker::User,
            ChatTurn::Assistant { .. } => Speaker::Assistant,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ChatTurn::User { text, .. } | ChatTurn::Assistant { text, .. } => text,
        }
    }

    fn to_message(&self) -> ChatMessage {
        match self {
            ChatTurn::User { text, .. } => ChatMessage::User(text.clone()),
            ChatTurn::Assistant { text, .. } => ChatMessage::Assistant(text.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(ChatTurn::User {
            text: text.into(),
            at: Utc::now(),
        });
    }

    /// Appends a reply. Only valid directly after a user turn; returns `false`
    /// (and appends nothing) otherwise.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> bool {
        match self.turns.last() {
            Some(ChatTurn::User { .. }) => {
                self.turns.push(ChatTurn::Assistant {
                    text: text.into(),
                    at: Utc::now(),
                });
                true
            }
            _ => false,
        }
    }

    /// `system` first, then every stored turn in order.
    pub fn to_messages(&self, system: String) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::System(system))
            .chain(self.turns.iter().map(ChatTurn::to_message))
            .collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
