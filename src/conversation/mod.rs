//! Conversation state
//!
//! Owns the committed turn history plus the completion text still
//! streaming in from the model. The send path mirrors a chat front end:
//! the pending completion is committed, the new user message appended,
//! and the whole history fitted to the window before anything goes out.

use crate::context::PromptWindow;
use crate::errors::Result;
use crate::types::Turn;

/// A single chat session's history
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    /// Committed turns, oldest first
    turns: Vec<Turn>,

    /// Streamed completion text not yet committed as a turn
    completion: String,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Completion text not yet committed as a turn
    pub fn completion(&self) -> &str {
        &self.completion
    }

    /// Number of committed turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when no turns have been committed
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append a committed user turn
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Append a committed assistant turn
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::assistant(text));
    }

    /// Accumulate streamed completion text
    pub fn append_completion(&mut self, delta: &str) {
        self.completion.push_str(delta);
    }

    /// Commit the pending completion as an assistant turn, if any
    pub fn commit_completion(&mut self) {
        if !self.completion.is_empty() {
            let text = std::mem::take(&mut self.completion);
            self.turns.push(Turn::assistant(text));
        }
    }

    /// Submit a user message and build the outgoing prompt.
    ///
    /// The pending completion (if any) is committed first, then the user
    /// message is appended and the history fitted into `window`. On
    /// success the conversation adopts the surviving window and the
    /// rendered prompt is returned. On failure the conversation is left
    /// completely unchanged so the user can retry with a shorter
    /// message.
    pub fn submit(
        &mut self,
        user_message: impl Into<String>,
        window: &PromptWindow,
    ) -> Result<String> {
        let mut history = self.turns.clone();
        if !self.completion.is_empty() {
            history.push(Turn::assistant(self.completion.clone()));
        }
        history.push(Turn::user(user_message));

        let fitted = window.fit(&history)?;

        self.turns = fitted.turns;
        self.completion.clear();

        Ok(fitted.prompt)
    }

    /// Drop all history and any pending completion
    pub fn clear(&mut self) {
        self.turns.clear();
        self.completion.clear();
    }
}
