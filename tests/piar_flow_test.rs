// ==========================================
// PIAR generation, uploads and assistant - integration tests
// ==========================================
// Collaborator failures and empty AI results are soft: the state is
// left as it was and the action can be retried.
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use piar_portal::api::{ApiError, DocumentUpload, GenerationTarget};
use piar_portal::collaborators::ai::ScriptedReply;
use piar_portal::config::PortalConfig;
use piar_portal::domain::chat::ChatRole;
use piar_portal::domain::types::DocumentType;
use piar_portal::i18n::set_locale;

fn upload(title: &str) -> DocumentUpload {
    DocumentUpload {
        title: title.to_string(),
        doc_type: DocumentType::Evaluation,
        file_name: "evaluacion.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        bytes: vec![0x25, 0x50, 0x44, 0x46],
    }
}

#[tokio::test]
async fn test_generate_plan_attaches_document_and_refreshes_selection() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    env.state.select_student("st_01").unwrap();
    env.reply(PLAN_JSON);

    let generated = env
        .state
        .generate_plan("st_01", "Pierde la concentración después de 10 minutos")
        .await
        .unwrap();

    assert!(generated.plan.is_usable());
    let selected = env.state.selected_student().unwrap().unwrap();
    assert_eq!(selected, generated.student);
    assert_eq!(selected.latest_plan(), Some(&generated.plan));

    let doc = selected.documents.last().unwrap();
    let url = doc.url.as_deref().unwrap();
    let path = url.trim_start_matches("memory://test/");
    let (content_type, bytes) = env.storage.get(path).unwrap();
    assert!(content_type.starts_with("text/plain"));
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("PIAR - Sofía Gómez"));
    assert!(text.contains("Dividir ejercicios en pasos cortos"));
    assert!(!env.state.is_busy());
}

#[tokio::test]
async fn test_generate_plan_without_text_is_soft_failure() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    let before = env.state.students.list().unwrap();
    env.ai.push_reply(ScriptedReply::Empty);

    let err = env.state.generate_plan("st_01", "").await.unwrap_err();
    assert!(matches!(err, ApiError::GenerationUnavailable(GenerationTarget::Plan)));
    assert_eq!(err.code(), "GENERATION_UNAVAILABLE");

    let after = env.state.students.list().unwrap();
    assert_eq!(after.revision, before.revision);
    assert!(env.storage.is_empty());
    assert!(!env.state.is_busy());

    // Retrying the same action works once the service answers.
    env.reply(PLAN_JSON);
    assert!(env.state.generate_plan("st_01", "").await.is_ok());
}

#[tokio::test]
async fn test_generate_plan_with_failing_storage_leaves_state_untouched() {
    let env = ApiTestEnv::with_failing_storage().await;
    env.login_as("amorales").await;
    env.reply(PLAN_JSON);
    let before = env.student("st_01");

    let err = env.state.generate_plan("st_01", "").await.unwrap_err();
    assert_eq!(err.code(), "STORAGE_SERVICE_ERROR");
    assert_eq!(env.student("st_01"), before);
}

#[tokio::test]
async fn test_failed_upload_changes_nothing() {
    let env = ApiTestEnv::with_failing_storage().await;
    env.login_as("amorales").await;
    env.state.select_student("st_03").unwrap();
    let revision = env.state.students.list().unwrap().revision;

    let err = env
        .state
        .upload_document("st_03", upload("Evaluación inicial"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Collaborator { .. }));
    assert_eq!(env.state.students.list().unwrap().revision, revision);
    assert!(env.state.selected_student().unwrap().unwrap().documents.is_empty());
    assert!(!env.state.is_busy());
}

#[tokio::test]
async fn test_upload_attaches_document_with_url() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    env.state.select_student("st_03").unwrap();

    let updated = env
        .state
        .upload_document("st_03", upload("Evaluación inicial"))
        .await
        .unwrap();
    let doc = &updated.documents[0];
    assert_eq!(doc.doc_type, DocumentType::Evaluation);
    assert_eq!(
        doc.url.as_deref(),
        Some(format!("memory://test/students/st_03/{}-evaluacion.pdf", doc.id).as_str())
    );
    assert_eq!(env.state.selected_student().unwrap().unwrap(), updated);
}

#[tokio::test]
async fn test_same_file_name_uploaded_twice_keeps_both_objects() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;

    let mut march = upload("Seguimiento marzo");
    march.bytes = b"MARZO".to_vec();
    let mut april = upload("Seguimiento abril");
    april.bytes = b"ABRIL".to_vec();

    env.state.upload_document("st_03", march).await.unwrap();
    let updated = env.state.upload_document("st_03", april).await.unwrap();

    assert_eq!(updated.documents.len(), 2);
    let first = updated.documents[0].url.as_deref().unwrap();
    let second = updated.documents[1].url.as_deref().unwrap();
    assert_ne!(first, second);
    assert_eq!(env.storage.len(), 2);

    let stored = |url: &str| env.storage.get(url.trim_start_matches("memory://test/")).unwrap().1;
    assert_eq!(stored(first), b"MARZO".to_vec());
    assert_eq!(stored(second), b"ABRIL".to_vec());
}

#[tokio::test]
async fn test_plans_generated_back_to_back_get_distinct_objects() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    env.reply(PLAN_JSON);
    env.reply(PLAN_JSON);

    let first = env.state.generate_plan("st_01", "").await.unwrap();
    let second = env.state.generate_plan("st_01", "").await.unwrap();

    let url_of = |generated: &piar_portal::api::GeneratedPlan| {
        generated
            .student
            .documents
            .iter()
            .find(|d| d.id == generated.document_id)
            .and_then(|d| d.url.clone())
            .unwrap()
    };
    assert_ne!(url_of(&first), url_of(&second));
    assert_eq!(env.storage.len(), 2);
}

#[tokio::test]
async fn test_suggest_and_assign_strategy() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    env.reply(
        r#"{"strategies": [
            {"title": "Tutoría entre pares", "description": "Parejas heterogéneas",
             "subjectAreas": ["Matemáticas"], "gradeLevels": ["3°"]},
            {"title": "Pausas activas", "description": "Cada 15 minutos",
             "subjectAreas": [], "gradeLevels": []}
        ]}"#,
    );

    let strategies = env
        .state
        .suggest_strategies("st_01", Some("atención"))
        .await
        .unwrap();
    assert_eq!(strategies.len(), 2);

    let updated = env.state.assign_strategy("st_01", &strategies[1]).unwrap();
    assert_eq!(updated.progress[0].strategy.as_ref().unwrap().title, "Pausas activas");
}

#[tokio::test]
async fn test_assistant_keeps_history_only_on_success() {
    let config = PortalConfig {
        assistant_history_limit: 4,
        ..PortalConfig::default()
    };
    let env = ApiTestEnv::with_config(config).await;
    env.login_as("lgomez").await;

    env.reply("Puede usar rutinas visuales en casa.");
    let reply = env.state.ask_assistant("¿Cómo apoyo las tareas?").await.unwrap();
    assert_eq!(reply.role, ChatRole::Assistant);
    assert_eq!(env.state.conversation().unwrap().len(), 2);

    env.ai.push_reply(ScriptedReply::Fail("unavailable".to_string()));
    let err = env.state.ask_assistant("¿Y los fines de semana?").await.unwrap_err();
    assert_eq!(err.code(), "AI_SERVICE_ERROR");
    assert_eq!(env.state.conversation().unwrap().len(), 2);

    env.reply("Mantenga horarios similares.");
    env.reply("Use un calendario.");
    env.state.ask_assistant("¿Horarios?").await.unwrap();
    env.state.ask_assistant("¿Calendario?").await.unwrap();

    let history = env.state.conversation().unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].text, "¿Horarios?");

    // The earlier turns were sent as context with the last question.
    let requests = env.ai.requests();
    assert_eq!(requests.last().unwrap().history.len(), 4);
}

#[tokio::test]
async fn test_soft_failure_message_is_localized() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;

    let err = env.state.ask_assistant("hola").await.unwrap_err();
    set_locale("es-CO");
    assert_eq!(err.user_message(), "No se pudo generar una respuesta. Intenta de nuevo.");
}
