// ==========================================
// PIAR Portal - scripted generative service
// ==========================================
// Replays queued replies in order and records every request.
// Offline stand-in for the hosted service and test double.
// ==========================================

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationRequest, GenerativeService};
use crate::collaborators::error::{CollaboratorError, CollaboratorResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    Text(String),
    /// Service answered without text
    Empty,
    /// Transport or service failure
    Fail(String),
}

#[derive(Default)]
pub struct ScriptedGenerativeService {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerativeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push_reply(&self, reply: ScriptedReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeService for ScriptedGenerativeService {
    async fn generate(&self, request: GenerationRequest) -> CollaboratorResult<Option<String>> {
        self.requests
            .lock()
            .map_err(|e| CollaboratorError::Internal(e.to_string()))?
            .push(request);

        let reply = self
            .replies
            .lock()
            .map_err(|e| CollaboratorError::Internal(e.to_string()))?
            .pop_front();

        match reply {
            Some(ScriptedReply::Text(text)) => Ok(Some(text)),
            Some(ScriptedReply::Empty) | None => Ok(None),
            Some(ScriptedReply::Fail(message)) => Err(CollaboratorError::Service {
                status: 503,
                message,
            }),
        }
    }
}
