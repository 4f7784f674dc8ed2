// ==========================================
// PIAR Portal - demo dataset
// ==========================================
// Small, consistent set of users and students for the desktop shell
// without a backend, and for tests.
// ==========================================

use chrono::{Duration, NaiveDateTime};

use crate::collaborators::auth::{AuthProvider, SignUpRequest};
use crate::collaborators::error::CollaboratorResult;
use crate::domain::student::{ProgressEntry, Student};
use crate::domain::types::{RiskLevel, Role};
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub users: Vec<User>,
    pub students: Vec<Student>,
}

fn user(id: &str, username: &str, name: &str, role: Role, password: &str, now: NaiveDateTime) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        name: name.to_string(),
        email: format!("{}@colegio.edu.co", username),
        role,
        password: password.to_string(),
        student_id: None,
        specialization: None,
        phone: None,
        created_at: now,
    }
}

fn student(
    id: &str,
    name: &str,
    grade: &str,
    age: u8,
    risk_level: RiskLevel,
    diagnosis: &str,
    teacher: Option<&str>,
) -> Student {
    let mut s = Student::new(id, name, grade);
    s.age = Some(age);
    s.risk_level = risk_level;
    s.diagnosis = diagnosis.to_string();
    s.teacher = teacher.map(str::to_string);
    s
}

pub fn demo_dataset() -> DemoDataset {
    let now = chrono::Local::now().naive_local();

    let mut ana = user("usr_01", "amorales", "Ana Morales", Role::Teacher, "docente123", now);
    ana.specialization = Some("Matemáticas".to_string());
    let mut carlos = user("usr_02", "cruiz", "Carlos Ruiz", Role::Teacher, "docente123", now);
    carlos.specialization = Some("Lenguaje".to_string());
    let mut family = user("usr_03", "lgomez", "Laura Gómez", Role::Family, "familia123", now);
    family.student_id = Some("st_01".to_string());
    family.phone = Some("3001234567".to_string());
    let director = user("usr_04", "ddiaz", "Dora Díaz", Role::Director, "directivo123", now);
    let admin = user("usr_05", "admin", "Administrador", Role::SuperAdmin, "admin123", now);

    let mut sofia = student(
        "st_01",
        "Sofía Gómez",
        "3°",
        8,
        RiskLevel::Medium,
        "TDAH",
        Some("Ana Morales"),
    );
    let mut first = ProgressEntry::new("st_01", "Ana Morales", "Mejoró la atención en actividades cortas.");
    first.date = now.date() - Duration::days(7);
    sofia.progress.push(ProgressEntry::new(
        "st_01",
        "Ana Morales",
        "Completó la guía de fracciones con apoyo visual.",
    ));
    sofia.progress.push(first);

    let students = vec![
        sofia,
        student(
            "st_02",
            "Mateo Ríos",
            "5°",
            10,
            RiskLevel::High,
            "Dislexia",
            Some("Carlos Ruiz"),
        ),
        student(
            "st_03",
            "Valentina Cruz",
            "3°",
            9,
            RiskLevel::Low,
            "Baja visión",
            Some("Ana Morales"),
        ),
        student("st_04", "Samuel Ortiz", "1°", 6, RiskLevel::Medium, "TEA", None),
    ];

    DemoDataset {
        users: vec![ana, carlos, family, director, admin],
        students,
    }
}

/// Create an auth account for each user with the password on the record.
pub async fn register_accounts(auth: &dyn AuthProvider, users: &[User]) -> CollaboratorResult<()> {
    for user in users {
        auth.sign_up(SignUpRequest {
            email: user.email.clone(),
            password: user.password.clone(),
            display_name: user.name.clone(),
        })
        .await?;
    }
    tracing::debug!(accounts = users.len(), "demo accounts registered");
    Ok(())
}
