use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::{ConditionId, SymptomId};

/// Contribution of one symptom to a condition's match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomWeight {
    pub symptom_id: SymptomId,
    pub weight: f64,
}

/// Which part of a condition a symptom reference comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceLocation {
    SymptomWeights,
    RedFlags,
}

/// Rule that overrides self-care with an urgent recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedFlagRule {
    /// Fires when any of these symptoms is selected
    pub if_symptoms_any: Vec<SymptomId>,

    /// Text shown when the rule fires
    pub recommendation: String,
}

impl RedFlagRule {
    /// True if at least one trigger symptom is selected
    #[allow(clippy::implicit_hasher)]
    pub fn fires(&self, selected: &HashSet<SymptomId>) -> bool {
        self.if_symptoms_any.iter().any(|id| selected.contains(id))
    }
}

/// An over-the-counter remedy suggested for a condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedy {
    pub category: String,

    #[serde(alias = "example_brands", default)]
    pub brand_names: Vec<String>,

    #[serde(default)]
    pub active_ingredients: Vec<String>,

    pub dosage: String,

    #[serde(default)]
    pub price_range: String,

    #[serde(alias = "prescription_needed", default)]
    pub prescription_required: bool,

    #[serde(default)]
    pub warnings: Vec<String>,

    /// What the remedy is meant to relieve
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Guidance on when self-care is enough and when to see a clinician
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CarePathway {
    pub self_care_ok: bool,
    pub when_seek_care: String,
    #[serde(default)]
    pub urgent_if: Vec<String>,
    #[serde(default)]
    pub followup: String,
}

/// A candidate ailment with its symptom-weight profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique identifier
    pub id: ConditionId,

    pub name_en: String,

    #[serde(default)]
    pub name_ko: String,

    #[serde(default)]
    pub description_en: String,

    #[serde(default)]
    pub description_ko: String,

    /// Grouping code, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Weighted symptom profile used for scoring
    #[serde(default)]
    pub symptom_weights: Vec<SymptomWeight>,

    /// Red-flag rules, evaluated in declared order
    #[serde(default)]
    pub exclusion_red_flags: Vec<RedFlagRule>,

    #[serde(alias = "otc_options_us", default)]
    pub otc_options: Vec<Remedy>,

    #[serde(default)]
    pub care_pathway: CarePathway,
}

impl Condition {
    pub fn new(id: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            id: ConditionId::new(id),
            name_en: name_en.into(),
            name_ko: String::new(),
            description_en: String::new(),
            description_ko: String::new(),
            category: None,
            symptom_weights: Vec::new(),
            exclusion_red_flags: Vec::new(),
            otc_options: Vec::new(),
            care_pathway: CarePathway::default(),
        }
    }

    /// Add a weighted symptom to the profile
    #[must_use]
    pub fn with_weight(mut self, symptom_id: &str, weight: f64) -> Self {
        self.symptom_weights.push(SymptomWeight {
            symptom_id: SymptomId::new(symptom_id),
            weight,
        });
        self
    }

    /// Append a red-flag rule
    #[must_use]
    pub fn with_red_flag(mut self, symptoms: &[&str], recommendation: impl Into<String>) -> Self {
        self.exclusion_red_flags.push(RedFlagRule {
            if_symptoms_any: symptoms.iter().map(|s| SymptomId::new(*s)).collect(),
            recommendation: recommendation.into(),
        });
        self
    }

    /// Every symptom id this condition refers to, in weights then red flags
    pub fn referenced_symptoms(&self) -> impl Iterator<Item = (ReferenceLocation, &SymptomId)> {
        let weights = self
            .symptom_weights
            .iter()
            .map(|w| (ReferenceLocation::SymptomWeights, &w.symptom_id));
        let red_flags = self
            .exclusion_red_flags
            .iter()
            .flat_map(|r| r.if_symptoms_any.iter())
            .map(|id| (ReferenceLocation::RedFlags, id));
        weights.chain(red_flags)
    }

    /// Sum of all symptom weights, the denominator of the match score
    pub fn max_possible_weight(&self) -> f64 {
        self.symptom_weights.iter().map(|w| w.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_bundled_condition() {
        let json = r#"{
            "id": "common_cold",
            "name_en": "Common Cold",
            "name_ko": "감기",
            "description_en": "A mild viral infection.",
            "description_ko": "",
            "symptom_weights": [{"symptom_id": "runny_nose", "weight": 25}],
            "otc_options_us": [{
                "category": "Decongestant",
                "example_brands": ["Sudafed PE"],
                "active_ingredients": ["Phenylephrine"],
                "dosage": "10 mg every 4 hours",
                "price_range": "$6-10",
                "prescription_required": false,
                "warnings": []
            }],
            "care_pathway": {
                "self_care_ok": true,
                "when_seek_care": "After 10 days",
                "urgent_if": [],
                "followup": ""
            }
        }"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition.symptom_weights.len(), 1);
        assert!((condition.symptom_weights[0].weight - 25.0).abs() < f64::EPSILON);
        assert!(condition.exclusion_red_flags.is_empty());
        assert_eq!(condition.otc_options[0].brand_names, vec!["Sudafed PE"]);
        assert!(condition.care_pathway.self_care_ok);
    }

    #[test]
    fn test_red_flag_fires_on_any_overlap() {
        let rule = RedFlagRule {
            if_symptoms_any: vec![SymptomId::new("chest_pain"), SymptomId::new("confusion")],
            recommendation: "Call 911".to_string(),
        };
        let selected: HashSet<SymptomId> = [SymptomId::new("confusion")].into_iter().collect();
        assert!(rule.fires(&selected));

        let selected: HashSet<SymptomId> = [SymptomId::new("fever")].into_iter().collect();
        assert!(!rule.fires(&selected));
    }

    #[test]
    fn test_referenced_symptoms() {
        let condition = Condition::new("flu", "Flu")
            .with_weight("fever", 50.0)
            .with_red_flag(&["chest_pain"], "Call 911");
        let refs: Vec<(ReferenceLocation, &str)> = condition
            .referenced_symptoms()
            .map(|(location, id)| (location, id.as_str()))
            .collect();
        assert_eq!(
            refs,
            vec![
                (ReferenceLocation::SymptomWeights, "fever"),
                (ReferenceLocation::RedFlags, "chest_pain"),
            ]
        );
    }
}
