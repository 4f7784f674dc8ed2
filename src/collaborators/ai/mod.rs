// ==========================================
// PIAR Portal - generative AI service
// ==========================================
// request  = prompt + schema + temperature (+ chat history)
// response = schema-conformant JSON text, free chat text, or nothing.
// "Nothing" is a recoverable no-result case, never an error.
// ==========================================

mod gemini;
mod schema;
mod scripted;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::collaborators::error::CollaboratorResult;
use crate::domain::chat::ChatMessage;

pub use gemini::GeminiClient;
pub use schema::ResponseSchema;
pub use scripted::{ScriptedGenerativeService, ScriptedReply};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub schema: ResponseSchema,
    pub temperature: f32,
    /// Earlier turns, oldest first (chat only)
    pub history: Vec<ChatMessage>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, schema: ResponseSchema, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            schema,
            temperature,
            history: Vec::new(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// `Ok(None)` when the service answered without any text.
    async fn generate(&self, request: GenerationRequest) -> CollaboratorResult<Option<String>>;
}
