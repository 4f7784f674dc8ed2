// ==========================================
// PIAR Portal - students, documents, progress log
// ==========================================
// Student.teacher holds the teacher's display name (denormalized)
// Student.progress is ordered newest first
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::plan::AccommodationPlan;
use crate::domain::types::{DocumentType, RiskLevel};

// ==========================================
// Student
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub age: Option<u8>,
    pub risk_level: RiskLevel,
    pub diagnosis: String,
    pub teacher: Option<String>,

    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub progress: Vec<ProgressEntry>,

    pub created_at: NaiveDateTime,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            grade: grade.into(),
            age: None,
            risk_level: RiskLevel::Low,
            diagnosis: String::new(),
            teacher: None,
            documents: Vec::new(),
            progress: Vec::new(),
            created_at: chrono::Local::now().naive_local(),
        }
    }

    pub fn is_assigned_to(&self, teacher_name: &str) -> bool {
        self.teacher.as_deref() == Some(teacher_name)
    }

    /// Latest accommodation plan, if one was generated.
    pub fn latest_plan(&self) -> Option<&AccommodationPlan> {
        self.documents
            .iter()
            .rev()
            .filter(|d| d.doc_type == DocumentType::AccommodationPlan)
            .find_map(|d| d.content.as_ref())
    }
}

// ==========================================
// Document
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub student_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub created_at: NaiveDateTime,
    pub url: Option<String>,
    /// Only set for accommodation plans
    pub content: Option<AccommodationPlan>,
}

impl Document {
    pub fn new(student_id: &str, title: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            id: format!("doc_{}", uuid::Uuid::new_v4().simple()),
            student_id: student_id.to_string(),
            title: title.into(),
            doc_type,
            created_at: chrono::Local::now().naive_local(),
            url: None,
            content: None,
        }
    }
}

// ==========================================
// ProgressEntry - append-only log record
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub id: String,
    pub student_id: String,
    pub date: NaiveDate,
    pub author: String,
    pub note: String,
    pub strategy: Option<StrategyPayload>,
}

impl ProgressEntry {
    pub fn new(student_id: &str, author: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: format!("prog_{}", uuid::Uuid::new_v4().simple()),
            student_id: student_id.to_string(),
            date: chrono::Local::now().date_naive(),
            author: author.into(),
            note: note.into(),
            strategy: None,
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyPayload) -> Self {
        self.strategy = Some(strategy);
        self
    }
}

/// Strategy attached to a progress entry by a strategy-assignment action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyPayload {
    pub title: String,
    pub description: String,
}

// ==========================================
// NewStudent - creation input
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub grade: String,
    pub age: Option<u8>,
    pub risk_level: Option<RiskLevel>,
    pub diagnosis: String,
    pub teacher: Option<String>,
}
