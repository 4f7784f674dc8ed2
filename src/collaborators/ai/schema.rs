// ==========================================
// PIAR Portal - structured-output schemas
// ==========================================
// OpenAPI-subset schemas as accepted by the generateContent endpoint.
// Property names match the camelCase serde names of the domain types.
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseSchema {
    AccommodationPlan,
    StrategyList,
    /// Free text, no JSON constraint
    ChatTurn,
}

impl ResponseSchema {
    pub fn expects_json(&self) -> bool {
        !matches!(self, ResponseSchema::ChatTurn)
    }

    pub fn json_schema(&self) -> Option<Value> {
        match self {
            ResponseSchema::AccommodationPlan => Some(accommodation_plan_schema()),
            ResponseSchema::StrategyList => Some(strategy_list_schema()),
            ResponseSchema::ChatTurn => None,
        }
    }
}

fn string_array() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

fn per_area(list_field: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "area": { "type": "STRING" },
                list_field: string_array(),
            },
            "required": ["area", list_field],
        }
    })
}

fn accommodation_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "strengths": string_array(),
            "barriers": string_array(),
            "adjustments": per_area("adjustments"),
            "reinforcementActivities": per_area("activities"),
            "followUpStrategies": string_array(),
        },
        "required": [
            "summary",
            "strengths",
            "barriers",
            "adjustments",
            "reinforcementActivities",
            "followUpStrategies"
        ],
    })
}

fn strategy_list_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "strategies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "subjectAreas": string_array(),
                        "gradeLevels": string_array(),
                    },
                    "required": ["title", "description", "subjectAreas", "gradeLevels"],
                }
            }
        },
        "required": ["strategies"],
    })
}
