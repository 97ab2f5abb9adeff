use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of a real reply when the chat request fails.
pub const CHAT_FAILURE_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// The assistant's answer to one chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    /// Products mentioned in the reply. May be empty.
    pub recommendations: Vec<crate::product::FurtherRecommendation>,
}
