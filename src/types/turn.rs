//! Conversation turn type
//!
//! One message in a conversation, tagged as user- or assistant-authored.
//! Rendering for the outgoing prompt lives here so every caller formats
//! turns the same way.

use serde::{Deserialize, Serialize};

/// A single message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    /// Message text as typed by the user or completed by the model
    pub text: String,

    /// True when the end user authored this turn
    pub is_user: bool,
}

impl Turn {
    /// Create a user-authored turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
        }
    }

    /// Create an assistant-authored turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
        }
    }

    /// Render this turn for the outgoing prompt.
    ///
    /// User turns are wrapped in `[INST]` instruction markers; assistant
    /// turns pass through as raw text.
    pub fn render(&self) -> String {
        if self.is_user {
            format!("[INST] {} [/INST]", self.text)
        } else {
            self.text.clone()
        }
    }
}
