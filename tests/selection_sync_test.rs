// ==========================================
// Selection / collection synchronization - integration tests
// ==========================================
// 1. Update-then-select: the selection adopts the updated record
// 2. Order preserved on replace
// 3. Teacher deletion cascade and selection re-read
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use piar_portal::api::ApiError;
use piar_portal::domain::plan::StrategySuggestion;
use piar_portal::domain::types::{DocumentType, RiskLevel};

#[tokio::test]
async fn test_update_selected_student_refreshes_selection() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;
    env.state.select_student("st_02").unwrap();

    let mut updated = env.student("st_02");
    updated.risk_level = RiskLevel::Low;
    updated.diagnosis = "Dislexia leve".to_string();
    let returned = env.state.update_student(updated.clone()).unwrap();

    let selected = env.state.selected_student().unwrap().unwrap();
    assert_eq!(selected, updated);
    assert_eq!(selected, returned);
    assert_eq!(env.student("st_02"), updated);
}

#[tokio::test]
async fn test_update_other_student_leaves_selection() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;
    let before = env.state.select_student("st_01").unwrap();

    let mut other = env.student("st_03");
    other.grade = "4°".to_string();
    env.state.update_student(other).unwrap();

    assert_eq!(env.state.selected_student().unwrap().unwrap(), before);
}

#[tokio::test]
async fn test_replace_preserves_order() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;

    let mut updated = env.student("st_03");
    updated.name = "Valentina Cruz Díaz".to_string();
    env.state.update_student(updated).unwrap();

    let order: Vec<String> = env
        .state
        .scoped_students()
        .unwrap()
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(order, vec!["st_01", "st_02", "st_03", "st_04"]);
}

#[tokio::test]
async fn test_update_unknown_student_changes_nothing() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;
    let revision = env.state.students.list().unwrap().revision;

    let mut ghost = env.student("st_01");
    ghost.id = "st_99".to_string();
    let err = env.state.update_student(ghost).unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(env.state.students.list().unwrap().revision, revision);
}

#[tokio::test]
async fn test_selection_follows_every_mutation_kind() {
    let env = ApiTestEnv::new().await;
    let teacher = env.login_as("amorales").await;
    env.state.select_student("st_01").unwrap();

    env.state.add_progress("st_01", "Trabajó en grupo").unwrap();
    let selected = env.state.selected_student().unwrap().unwrap();
    assert_eq!(selected.progress[0].note, "Trabajó en grupo");
    assert_eq!(selected.progress[0].author, teacher.name);

    let strategy = StrategySuggestion {
        title: "Agenda visual".to_string(),
        description: "Rutina diaria con pictogramas".to_string(),
        subject_areas: vec!["Todas".to_string()],
        grade_levels: vec!["3°".to_string()],
    };
    env.state.assign_strategy("st_01", &strategy).unwrap();
    let selected = env.state.selected_student().unwrap().unwrap();
    assert_eq!(selected.progress.len(), 2);
    assert_eq!(selected.progress[0].strategy.as_ref().unwrap().title, "Agenda visual");

    let with_doc = env
        .state
        .add_document("st_01", "Informe trimestral", DocumentType::Report, None)
        .unwrap();
    let doc_id = with_doc.documents[0].id.clone();
    assert_eq!(env.state.selected_student().unwrap().unwrap().documents.len(), 1);

    env.state.delete_document("st_01", &doc_id).unwrap();
    assert!(env.state.selected_student().unwrap().unwrap().documents.is_empty());
}

#[tokio::test]
async fn test_delete_teacher_unassigns_students_and_resyncs_selection() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;
    env.state.select_student("st_01").unwrap();

    let deletion = env.state.delete_user("usr_amorales").unwrap();
    let mut unassigned = deletion.unassigned_students.clone();
    unassigned.sort();
    assert_eq!(unassigned, vec!["st_01", "st_03"]);

    assert_eq!(env.student("st_01").teacher, None);
    assert_eq!(env.student("st_03").teacher, None);
    assert_eq!(env.student("st_02").teacher.as_deref(), Some("Carlos Ruiz"));
    assert_eq!(env.state.selected_student().unwrap().unwrap().teacher, None);
    assert!(env.state.list_teachers().unwrap().iter().all(|t| t.name != "Ana Morales"));
}

#[tokio::test]
async fn test_delete_non_teacher_has_no_cascade() {
    let env = ApiTestEnv::new().await;
    env.login_as("root").await;
    let before = env.state.students.list().unwrap();

    let deletion = env.state.delete_user("usr_lgomez").unwrap();
    assert!(deletion.unassigned_students.is_empty());

    let after = env.state.students.list().unwrap();
    assert_eq!(after.revision, before.revision);
    assert_eq!(*after.items, *before.items);
}

#[tokio::test]
async fn test_cannot_delete_own_account() {
    let env = ApiTestEnv::new().await;
    let me = env.login_as("ddiaz").await;
    assert!(env.state.delete_user(&me.id).unwrap_err().is_validation());
}

#[tokio::test]
async fn test_assign_teacher_requires_known_teacher() {
    let env = ApiTestEnv::new().await;
    env.login_as("ddiaz").await;
    env.state.select_student("st_04").unwrap();

    let updated = env.state.assign_teacher("st_04", Some("Carlos Ruiz")).unwrap();
    assert_eq!(updated.teacher.as_deref(), Some("Carlos Ruiz"));
    assert_eq!(env.state.selected_student().unwrap().unwrap(), updated);

    let err = env.state.assign_teacher("st_04", Some("Dora Díaz")).unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));

    let cleared = env.state.assign_teacher("st_04", None).unwrap();
    assert_eq!(cleared.teacher, None);
}
