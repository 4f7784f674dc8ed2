// ==========================================
// PIAR Portal - PIAR generation API
// ==========================================
// generate_plan:      prompt -> AI (plan schema) -> parse -> upload text
//                     -> attach document. Nothing changes unless every
//                     step succeeds.
// suggest_strategies: prompt -> AI (strategy-list schema) -> parse
// ==========================================

use std::fmt::Write as _;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult, GenerationTarget, Service};
use crate::collaborators::ai::{GenerationRequest, GenerativeService, ResponseSchema};
use crate::collaborators::storage::{student_object_path, ObjectStorage};
use crate::config::ConfigManager;
use crate::domain::plan::{AccommodationPlan, StrategyList, StrategySuggestion};
use crate::domain::student::{Document, Student};
use crate::domain::types::DocumentType;
use crate::repository::StudentRepository;

const PLAN_INSTRUCTION: &str = "Eres un especialista en educación inclusiva en Colombia. \
Elaboras Planes Individuales de Ajustes Razonables (PIAR) conforme al Decreto 1421 de 2017. \
Responde siempre en español, con ajustes concretos y aplicables en el aula.";

const STRATEGY_INSTRUCTION: &str = "Eres un asesor pedagógico de educación inclusiva. \
Propón estrategias breves, concretas y aplicables por un docente de aula. Responde en español.";

/// Result of a successful plan generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub student: Student,
    pub document_id: String,
    pub plan: AccommodationPlan,
}

pub struct PiarApi {
    students: Arc<StudentRepository>,
    ai: Arc<dyn GenerativeService>,
    storage: Arc<dyn ObjectStorage>,
    config: Arc<ConfigManager>,
}

impl PiarApi {
    pub fn new(
        students: Arc<StudentRepository>,
        ai: Arc<dyn GenerativeService>,
        storage: Arc<dyn ObjectStorage>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            students,
            ai,
            storage,
            config,
        }
    }

    /// Generate an accommodation plan for a student and attach it as a
    /// document.
    ///
    /// # Parameters
    /// - student_id: target student
    /// - context: free notes from the teacher (observations, goals)
    ///
    /// # Returns
    /// - Ok(GeneratedPlan): updated student and the new document id
    /// - Err(ApiError::GenerationUnavailable): no text or unusable plan
    /// - Err(ApiError::Collaborator): AI or storage call failed
    pub async fn generate_plan(&self, student_id: &str, context: &str) -> ApiResult<GeneratedPlan> {
        let student = self.students.get(student_id)?;
        let temperature = self.config.current()?.ai.plan_temperature;

        let request = GenerationRequest::new(
            plan_prompt(&student, context),
            ResponseSchema::AccommodationPlan,
            temperature,
        )
        .with_system_instruction(PLAN_INSTRUCTION);

        let text = self.call_ai(request, GenerationTarget::Plan).await?;
        let plan: AccommodationPlan = parse_structured(&text)
            .filter(AccommodationPlan::is_usable)
            .ok_or_else(|| {
                warn!(student_id, "plan response missing required fields");
                ApiError::GenerationUnavailable(GenerationTarget::Plan)
            })?;

        let mut document = Document::new(
            student_id,
            format!("PIAR - {}", student.name),
            DocumentType::AccommodationPlan,
        );
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let path = student_object_path(student_id, &document.id, &format!("piar-{}.txt", stamp));
        let url = self
            .storage
            .upload(
                &path,
                plan.to_plain_text(&student.name).into_bytes(),
                "text/plain; charset=utf-8",
            )
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Storage, e))?;

        document.url = Some(url);
        document.content = Some(plan.clone());
        let document_id = document.id.clone();

        let student = self.students.add_document(student_id, document)?;
        info!(student_id, document_id = %document_id, "accommodation plan generated");

        Ok(GeneratedPlan {
            student,
            document_id,
            plan,
        })
    }

    /// Strategy suggestions for a student, optionally around a focus
    /// (subject, behaviour, skill).
    pub async fn suggest_strategies(
        &self,
        student_id: &str,
        focus: Option<&str>,
    ) -> ApiResult<Vec<StrategySuggestion>> {
        let student = self.students.get(student_id)?;
        let temperature = self.config.current()?.ai.strategy_temperature;

        let request = GenerationRequest::new(
            strategy_prompt(&student, focus),
            ResponseSchema::StrategyList,
            temperature,
        )
        .with_system_instruction(STRATEGY_INSTRUCTION);

        let text = self.call_ai(request, GenerationTarget::Strategies).await?;

        // Envelope per schema; a bare array is accepted too.
        let strategies = parse_structured::<StrategyList>(&text)
            .map(|list| list.strategies)
            .or_else(|| parse_structured::<Vec<StrategySuggestion>>(&text))
            .unwrap_or_default();

        let strategies: Vec<StrategySuggestion> = strategies
            .into_iter()
            .filter(|s| !s.title.trim().is_empty())
            .collect();
        if strategies.is_empty() {
            return Err(ApiError::GenerationUnavailable(GenerationTarget::Strategies));
        }
        Ok(strategies)
    }

    async fn call_ai(&self, request: GenerationRequest, target: GenerationTarget) -> ApiResult<String> {
        self.ai
            .generate(request)
            .await
            .map_err(|e| ApiError::from_collaborator(Service::Ai, e))?
            .ok_or(ApiError::GenerationUnavailable(target))
    }
}

// ==========================================
// Prompt builders
// ==========================================

fn student_profile(student: &Student) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Estudiante: {}", student.name);
    let _ = writeln!(out, "Grado: {}", student.grade);
    if let Some(age) = student.age {
        let _ = writeln!(out, "Edad: {} años", age);
    }
    if !student.diagnosis.trim().is_empty() {
        let _ = writeln!(out, "Diagnóstico: {}", student.diagnosis.trim());
    }
    let _ = writeln!(out, "Nivel de riesgo: {}", student.risk_level);

    let notes: Vec<&str> = student.progress.iter().take(5).map(|p| p.note.as_str()).collect();
    if !notes.is_empty() {
        let _ = writeln!(out, "Seguimiento reciente:");
        for note in notes {
            let _ = writeln!(out, "- {}", note);
        }
    }
    out
}

pub fn plan_prompt(student: &Student, context: &str) -> String {
    let mut prompt = student_profile(student);
    if !context.trim().is_empty() {
        let _ = writeln!(prompt, "Observaciones del docente: {}", context.trim());
    }
    prompt.push_str(
        "\nElabora el PIAR con: resumen del caso, fortalezas, barreras para el aprendizaje, \
ajustes razonables por área, actividades de refuerzo por área y estrategias de seguimiento.",
    );
    prompt
}

pub fn strategy_prompt(student: &Student, focus: Option<&str>) -> String {
    let mut prompt = student_profile(student);
    if let Some(focus) = focus.map(str::trim).filter(|f| !f.is_empty()) {
        let _ = writeln!(prompt, "Enfoque solicitado: {}", focus);
    }
    prompt.push_str(
        "\nSugiere entre 3 y 5 estrategias pedagógicas con título, descripción, \
áreas y grados en los que aplican.",
    );
    prompt
}

/// Parse JSON text, tolerating a surrounding markdown code fence.
fn parse_structured<T: DeserializeOwned>(text: &str) -> Option<T> {
    serde_json::from_str(strip_code_fence(text)).ok()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            body.trim_end().trim_end_matches("```").trim()
        }
        None => trimmed,
    }
}
