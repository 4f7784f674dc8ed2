//! HTTP client for the hosted `generateContent` endpoint.
//!
//! One request per call: no retry, no backoff. Non-success statuses map
//! to [`CollaboratorError::Service`], a reply without candidate text maps
//! to `Ok(None)`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{GenerationRequest, GenerativeService};
use crate::collaborators::error::{CollaboratorError, CollaboratorResult};
use crate::domain::chat::{ChatMessage, ChatRole};

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`CollaboratorError::NotConfigured`] for a blank API key and
    /// [`CollaboratorError::Http`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> CollaboratorResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CollaboratorError::NotConfigured("generative AI API key".to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("piar-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerativeService for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> CollaboratorResult<Option<String>> {
        let body = build_request_body(&request);
        tracing::debug!(model = %self.model, schema = ?request.schema, "generateContent request");

        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(CollaboratorError::Service {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let data: GenerateResponse = resp.json().await?;
        Ok(extract_text(&data))
    }
}

fn content_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    }
}

fn turn(role: &str, text: &str) -> Value {
    json!({ "role": role, "parts": [{ "text": text }] })
}

pub(crate) fn build_request_body(request: &GenerationRequest) -> Value {
    let mut contents: Vec<Value> = request
        .history
        .iter()
        .map(|m: &ChatMessage| turn(content_role(m.role), &m.text))
        .collect();
    contents.push(turn("user", &request.prompt));

    let mut generation_config = json!({ "temperature": request.temperature });
    if let Some(schema) = request.schema.json_schema() {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema;
    }

    let mut body = json!({
        "contents": contents,
        "generationConfig": generation_config,
    });
    if let Some(instruction) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }
    body
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Text of the first candidate, parts concatenated. Blank text counts as
/// no text.
pub(crate) fn extract_text(response: &GenerateResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
