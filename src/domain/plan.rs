// ==========================================
// PIAR Portal - accommodation plan (PIAR) content
// ==========================================
// Structured output of the generative service; stored inside
// accommodation-plan documents.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

// ==========================================
// AccommodationPlan
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationPlan {
    pub summary: String,
    pub strengths: Vec<String>,
    pub barriers: Vec<String>,
    pub adjustments: Vec<AreaAdjustment>,
    pub reinforcement_activities: Vec<AreaActivities>,
    pub follow_up_strategies: Vec<String>,
}

/// Reasonable adjustments for one subject area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaAdjustment {
    pub area: String,
    pub adjustments: Vec<String>,
}

/// Reinforcement activities for one subject area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaActivities {
    pub area: String,
    pub activities: Vec<String>,
}

impl AccommodationPlan {
    /// A plan without summary or adjustments is treated as "no result".
    pub fn is_usable(&self) -> bool {
        !self.summary.trim().is_empty() && !self.adjustments.is_empty()
    }

    /// Plain-text rendering uploaded next to the structured document.
    pub fn to_plain_text(&self, student_name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "PIAR - {}", student_name);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.summary.trim());

        write_list(&mut out, "Fortalezas", &self.strengths);
        write_list(&mut out, "Barreras", &self.barriers);

        if !self.adjustments.is_empty() {
            let _ = writeln!(out, "\nAjustes razonables");
            for area in &self.adjustments {
                let _ = writeln!(out, "  {}", area.area);
                for item in &area.adjustments {
                    let _ = writeln!(out, "    - {}", item);
                }
            }
        }

        if !self.reinforcement_activities.is_empty() {
            let _ = writeln!(out, "\nActividades de refuerzo");
            for area in &self.reinforcement_activities {
                let _ = writeln!(out, "  {}", area.area);
                for item in &area.activities {
                    let _ = writeln!(out, "    - {}", item);
                }
            }
        }

        write_list(&mut out, "Estrategias de seguimiento", &self.follow_up_strategies);
        out
    }
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

// ==========================================
// StrategySuggestion
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySuggestion {
    pub title: String,
    pub description: String,
    pub subject_areas: Vec<String>,
    pub grade_levels: Vec<String>,
}

/// Envelope returned by the strategy-list schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategyList {
    pub strategies: Vec<StrategySuggestion>,
}
