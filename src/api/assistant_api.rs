// ==========================================
// PIAR Portal - pedagogical assistant API
// ==========================================
// One question in, one reply out. The caller owns the conversation and
// appends the exchange only when a reply came back.
// ==========================================

use std::sync::Arc;

use tracing::debug;

use crate::api::error::{ApiError, ApiResult, GenerationTarget, Service};
use crate::collaborators::ai::{GenerationRequest, GenerativeService, ResponseSchema};
use crate::config::ConfigManager;
use crate::domain::chat::ChatMessage;

const ASSISTANT_INSTRUCTION: &str = "Eres un asistente pedagógico para docentes y familias \
de un colegio en Colombia. Orientas sobre educación inclusiva, PIAR y ajustes razonables. \
Responde en español, de forma breve y práctica. No emitas diagnósticos clínicos.";

pub struct AssistantApi {
    ai: Arc<dyn GenerativeService>,
    config: Arc<ConfigManager>,
}

impl AssistantApi {
    pub fn new(ai: Arc<dyn GenerativeService>, config: Arc<ConfigManager>) -> Self {
        Self { ai, config }
    }

    /// Ask `question` with `history` (oldest first) as context.
    ///
    /// # Returns
    /// - Ok(ChatMessage): the assistant reply
    /// - Err(ApiError::GenerationUnavailable): the service answered without text
    pub async fn ask(&self, history: Vec<ChatMessage>, question: &str) -> ApiResult<ChatMessage> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::required("message"));
        }
        let temperature = self.config.current()?.ai.chat_temperature;

        debug!(history = history.len(), "assistant question");
        let request = GenerationRequest::new(question, ResponseSchema::ChatTurn, temperature)
            .with_system_instruction(ASSISTANT_INSTRUCTION)
            .with_history(history);

        let reply = self
            .ai
            .generate(request)
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Ai, e))?
            .ok_or(ApiError::GenerationUnavailable(GenerationTarget::Reply))?;

        Ok(ChatMessage::assistant(reply.trim()))
    }
}
