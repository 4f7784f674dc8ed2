// ==========================================
// Role-scoped views - integration tests
// ==========================================
// 1. Teacher / Family / Director / SuperAdmin scopes
// 2. Memoized view stability
// 3. Filters after scoping, user visibility, dashboard
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::api_test_helper::*;
use helpers::test_data_builder::{StudentBuilder, UserBuilder};
use piar_portal::api::ApiError;
use piar_portal::domain::types::{RiskLevel, Role};
use piar_portal::engine::visibility::StudentFilter;

fn ids(students: &[piar_portal::Student]) -> Vec<&str> {
    students.iter().map(|s| s.id.as_str()).collect()
}

#[tokio::test]
async fn test_teacher_sees_only_own_students() {
    let users = vec![UserBuilder::new("amorales", "Ana Morales", Role::Teacher).build()];
    let students = vec![
        StudentBuilder::new("1", "Sofía Gómez").teacher("Ana Morales").build(),
        StudentBuilder::new("2", "Mateo Ríos").teacher("Carlos Ruiz").build(),
    ];
    let env = ApiTestEnv::with_data(users, students).await;
    env.login_as("amorales").await;

    let scoped = env.state.scoped_students().unwrap();
    assert_eq!(ids(&scoped), vec!["1"]);
}

#[tokio::test]
async fn test_teacher_never_sees_other_assignments() {
    let env = ApiTestEnv::new().await;
    let teacher = env.login_as("cruiz").await;

    let scoped = env.state.scoped_students().unwrap();
    assert!(!scoped.is_empty());
    assert!(scoped.iter().all(|s| s.teacher.as_deref() == Some(teacher.name.as_str())));
}

#[tokio::test]
async fn test_director_and_super_admin_see_everything() {
    let env = ApiTestEnv::new().await;
    let total = env.state.students.list().unwrap().items.len();

    env.login_as("ddiaz").await;
    assert_eq!(env.state.scoped_students().unwrap().len(), total);

    env.login_as("root").await;
    assert_eq!(env.state.scoped_students().unwrap().len(), total);
}

#[tokio::test]
async fn test_family_sees_at_most_their_child() {
    let env = ApiTestEnv::new().await;
    env.login_as("lgomez").await;
    assert_eq!(ids(&env.state.scoped_students().unwrap()), vec!["st_01"]);

    // A family account whose student does not exist sees nothing.
    let orphan = UserBuilder::new("orphan", "Pedro Pérez", Role::Family)
        .child("st_99")
        .build();
    let env = ApiTestEnv::with_data(vec![orphan], helpers::test_data_builder::standard_students()).await;
    env.login_as("orphan").await;
    assert!(env.state.scoped_students().unwrap().is_empty());
}

#[tokio::test]
async fn test_scoped_view_is_referentially_stable() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;

    let first = env.state.scoped_students().unwrap();
    let second = env.state.scoped_students().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Any mutation publishes a new revision and a new view.
    env.state.add_progress("st_01", "Participó en clase").unwrap();
    let third = env.state.scoped_students().unwrap();
    assert!(!Arc::ptr_eq(&second, &third));
    assert_eq!(third[0].progress.len(), 1);
}

#[tokio::test]
async fn test_view_follows_user_change() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;
    let ana_view = env.state.scoped_students().unwrap();

    env.login_as("cruiz").await;
    let carlos_view = env.state.scoped_students().unwrap();
    assert_eq!(ids(&carlos_view), vec!["st_02"]);
    assert_ne!(ids(&ana_view), ids(&carlos_view));
}

#[tokio::test]
async fn test_filter_composes_after_scope() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;

    let filter = StudentFilter {
        risk_level: Some(RiskLevel::High),
        ..Default::default()
    };
    // st_02 is high risk but belongs to another teacher.
    assert!(env.state.list_students(&filter).unwrap().is_empty());

    let filter = StudentFilter {
        query: Some("tdah".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(&env.state.list_students(&filter).unwrap()), vec!["st_01"]);
}

#[tokio::test]
async fn test_select_outside_scope_is_not_found() {
    let env = ApiTestEnv::new().await;
    env.login_as("amorales").await;

    let err = env.state.select_student("st_02").unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert!(env.state.selected_student().unwrap().is_none());
}

#[tokio::test]
async fn test_user_visibility_by_role() {
    let env = ApiTestEnv::new().await;

    env.login_as("root").await;
    assert_eq!(env.state.list_users().unwrap().len(), 5);

    env.login_as("ddiaz").await;
    let visible = env.state.list_users().unwrap();
    assert_eq!(visible.len(), 4);
    assert!(visible.iter().all(|u| u.role != Role::SuperAdmin));
    assert!(visible.iter().all(|u| u.password.is_empty()));

    env.login_as("amorales").await;
    let visible = env.state.list_users().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].username, "amorales");
}

#[tokio::test]
async fn test_dashboard_counts_scoped_students() {
    let env = ApiTestEnv::new().await;

    env.login_as("ddiaz").await;
    let summary = env.state.dashboard().unwrap();
    assert_eq!(summary.total_students, 4);
    assert_eq!(summary.unassigned_students, 1);
    assert_eq!(summary.by_risk.high, 1);

    env.login_as("amorales").await;
    let summary = env.state.dashboard().unwrap();
    assert_eq!(summary.total_students, 2);
    assert_eq!(summary.by_risk.high, 0);
}
