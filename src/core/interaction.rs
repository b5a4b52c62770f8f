use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::InteractionSeverity;

/// A combination that should be avoided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerousCombination {
    pub id: String,
    pub combination: Vec<String>,
    pub severity: InteractionSeverity,
    pub mechanism: String,
    #[serde(default)]
    pub korean_description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_medications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Vec<String>>,
}

/// A combination that improves effectiveness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficialCombination {
    pub id: String,
    pub combination: Vec<String>,
    pub benefit: String,
    #[serde(default)]
    pub korean_description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_foods: Option<Vec<String>>,
}

/// How two supplements affect each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementInteraction {
    pub id: String,
    pub combination: Vec<String>,
    /// Interaction type, snake_case (e.g. "absorption_competition")
    pub interaction: String,
    pub effect: String,
    #[serde(default)]
    pub korean_description: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_ratio: Option<String>,
}

/// All drug and supplement interaction tables
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrugInteractions {
    #[serde(default)]
    pub dangerous_combinations: Vec<DangerousCombination>,
    #[serde(default)]
    pub beneficial_combinations: Vec<BeneficialCombination>,
    #[serde(default)]
    pub supplement_interactions: Vec<SupplementInteraction>,
    /// Timing slot (e.g. "with_food") -> medications
    #[serde(default)]
    pub timing_guidelines: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub general_timing_tips: Vec<String>,
    #[serde(default)]
    pub quick_safety_tips: Vec<String>,
}

/// Human-readable form of a snake_case key ("with_food" -> "with food")
#[must_use]
pub fn humanize(key: &str) -> String {
    key.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_replaces_every_underscore() {
        assert_eq!(humanize("separate_by_2_hours"), "separate by 2 hours");
        assert_eq!(humanize("morning"), "morning");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "x",
            "combination": ["A", "B"],
            "severity": "moderate",
            "mechanism": "m",
            "recommendation": "r"
        }"#;
        let d: DangerousCombination = serde_json::from_str(json).unwrap();
        assert!(d.warning.is_none());
        assert!(d.affected_medications.is_none());
        assert_eq!(d.severity, InteractionSeverity::Moderate);
    }
}
