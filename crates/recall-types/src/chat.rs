//! Chat-completion message types.
//!
//! The interception layer treats request and response envelopes as opaque
//! JSON and only interprets the `messages` sequence, so the role stays an
//! open string set ("system", "user", "assistant", "tool", ...). Position
//! in the sequence determines conversational turn order.

use serde::{Deserialize, Serialize};

/// Role string of the system message.
pub const ROLE_SYSTEM: &str = "system";
/// Role string of user-authored messages.
pub const ROLE_USER: &str = "user";
/// Role string of assistant-authored messages.
pub const ROLE_ASSISTANT: &str = "assistant";

/// One element of a chat-completion `messages` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Convenience constructor for a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }

    /// Convenience constructor for a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }
}
