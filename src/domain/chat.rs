// ==========================================
// PIAR Portal - pedagogical assistant chat turns
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: NaiveDateTime,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, text)
    }

    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: chrono::Local::now().naive_local(),
        }
    }
}

// ==========================================
// Conversation - bounded chat history
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a question and its answer, then drop the oldest exchanges
    /// until at most `limit` messages remain. Whole exchanges only, so the
    /// history always opens with a user turn.
    pub fn push_exchange(&mut self, question: ChatMessage, answer: ChatMessage, limit: usize) {
        self.messages.push(question);
        self.messages.push(answer);
        if self.messages.len() > limit {
            let excess = (self.messages.len() - limit).div_ceil(2) * 2;
            self.messages.drain(..excess.min(self.messages.len()));
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
