// ==========================================
// PIAR Portal - dashboard summary
// ==========================================
// Aggregates over an already scoped student list.
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::student::{ProgressEntry, Student};
use crate::domain::types::{DocumentType, RiskLevel};

/// Number of progress entries shown on the dashboard
pub const RECENT_PROGRESS_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProgress {
    pub student_id: String,
    pub student_name: String,
    pub entry: ProgressEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_students: usize,
    pub by_risk: RiskBreakdown,
    pub documents: usize,
    pub accommodation_plans: usize,
    pub unassigned_students: usize,
    pub recent_progress: Vec<RecentProgress>,
}

pub fn summarize(students: &[Student], recent_limit: usize) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_students: students.len(),
        ..Default::default()
    };

    for student in students {
        match student.risk_level {
            RiskLevel::Low => summary.by_risk.low += 1,
            RiskLevel::Medium => summary.by_risk.medium += 1,
            RiskLevel::High => summary.by_risk.high += 1,
        }
        summary.documents += student.documents.len();
        summary.accommodation_plans += student
            .documents
            .iter()
            .filter(|d| d.doc_type == DocumentType::AccommodationPlan)
            .count();
        if student.teacher.is_none() {
            summary.unassigned_students += 1;
        }
    }

    let mut recent: Vec<RecentProgress> = students
        .iter()
        .flat_map(|s| {
            s.progress.iter().map(move |entry| RecentProgress {
                student_id: s.id.clone(),
                student_name: s.name.clone(),
                entry: entry.clone(),
            })
        })
        .collect();
    // stable sort: ties keep collection order, newest-first within a student
    recent.sort_by(|a, b| b.entry.date.cmp(&a.entry.date));
    recent.truncate(recent_limit);
    summary.recent_progress = recent;

    summary
}
