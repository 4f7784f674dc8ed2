// ==========================================
// PIAR Portal - domain value types
// ==========================================
// Roles, risk levels and document tags shared by every layer.
// Wire format follows the portal UI (kebab/camel case strings).
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Role
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Teacher,    // docente
    Family,     // familia / acudiente
    Director,   // directivo
    SuperAdmin, // administrador de la plataforma
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Teacher, Role::Family, Role::Director, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Family => "family",
            Role::Director => "director",
            Role::SuperAdmin => "super-admin",
        }
    }

    /// Roles that see the whole student collection unfiltered.
    pub fn sees_all_students(&self) -> bool {
        matches!(self, Role::Director | Role::SuperAdmin)
    }

    /// Roles offered the user management screens.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Director | Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "teacher" | "docente" => Ok(Role::Teacher),
            "family" | "familia" => Ok(Role::Family),
            "director" | "directivo" => Ok(Role::Director),
            "super-admin" | "superadmin" => Ok(Role::SuperAdmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

// ==========================================
// Risk level
// ==========================================
// Order: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "bajo" => Ok(RiskLevel::Low),
            "medium" | "medio" => Ok(RiskLevel::Medium),
            "high" | "alto" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level: {}", other)),
        }
    }
}

// ==========================================
// Document type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    Report,
    Evaluation,
    AccommodationPlan,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Report => "report",
            DocumentType::Evaluation => "evaluation",
            DocumentType::AccommodationPlan => "accommodation-plan",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(DocumentType::Report),
            "evaluation" => Ok(DocumentType::Evaluation),
            "accommodation-plan" | "piar" => Ok(DocumentType::AccommodationPlan),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}
