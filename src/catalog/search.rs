//! In-memory browsing and substring search over the reference tables.

use serde::Serialize;

use crate::core::interaction::{
    BeneficialCombination, DangerousCombination, DrugInteractions, SupplementInteraction,
};
use crate::core::product::KoreanProduct;
use crate::core::symptom::Symptom;
use crate::core::types::category_label;

/// Symptoms sharing a category
#[derive(Debug, Clone, Serialize)]
pub struct SymptomGroup<'a> {
    pub code: &'a str,
    pub label: &'a str,
    pub symptoms: Vec<&'a Symptom>,
}

/// Group symptoms by category, keeping first-seen category order.
///
/// `category` filters by code or display label, case-insensitively.
pub fn group_symptoms<'a>(
    symptoms: &'a [Symptom],
    category: Option<&str>,
) -> Vec<SymptomGroup<'a>> {
    let mut groups: Vec<SymptomGroup<'a>> = Vec::new();

    for symptom in symptoms {
        let code = symptom.category.as_str();
        let label = category_label(code);

        if let Some(filter) = category {
            if !filter.eq_ignore_ascii_case(code) && !filter.eq_ignore_ascii_case(label) {
                continue;
            }
        }

        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.symptoms.push(symptom),
            None => groups.push(SymptomGroup {
                code,
                label,
                symptoms: vec![symptom],
            }),
        }
    }

    groups
}

/// Korean products whose names, category or ingredients contain the query
pub fn search_products<'a>(products: &'a [KoreanProduct], query: &str) -> Vec<&'a KoreanProduct> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.matches_query(&query)).collect()
}

/// The interaction reference split the way users browse it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InteractionCategory {
    Dangerous,
    Beneficial,
    Supplements,
    Timing,
}

impl InteractionCategory {
    pub const ALL: [Self; 4] = [
        Self::Dangerous,
        Self::Beneficial,
        Self::Supplements,
        Self::Timing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dangerous => "Dangerous Combinations",
            Self::Beneficial => "Beneficial Combinations",
            Self::Supplements => "Supplement Interactions",
            Self::Timing => "Timing Guidelines",
        }
    }

    /// Entries in this category; timing counts its slots
    pub fn count(self, interactions: &DrugInteractions) -> usize {
        match self {
            Self::Dangerous => interactions.dangerous_combinations.len(),
            Self::Beneficial => interactions.beneficial_combinations.len(),
            Self::Supplements => interactions.supplement_interactions.len(),
            Self::Timing => interactions.timing_guidelines.len(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dangerous" => Some(Self::Dangerous),
            "beneficial" => Some(Self::Beneficial),
            "supplements" | "supplement" => Some(Self::Supplements),
            "timing" => Some(Self::Timing),
            _ => None,
        }
    }
}

/// Dangerous combinations, most severe first; ties keep table order
pub fn dangerous_by_severity(interactions: &DrugInteractions) -> Vec<&DangerousCombination> {
    let mut sorted: Vec<&DangerousCombination> =
        interactions.dangerous_combinations.iter().collect();
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
    sorted
}

/// Interaction entries matching a search query
#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractionHits<'a> {
    pub dangerous: Vec<&'a DangerousCombination>,
    pub beneficial: Vec<&'a BeneficialCombination>,
    pub supplements: Vec<&'a SupplementInteraction>,
}

impl InteractionHits<'_> {
    pub fn len(&self) -> usize {
        self.dangerous.len() + self.beneficial.len() + self.supplements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn any_contains<'s>(fields: impl IntoIterator<Item = &'s str>, query: &str) -> bool {
    fields
        .into_iter()
        .any(|f| f.to_lowercase().contains(query))
}

/// Case-insensitive substring search over combinations and their descriptions
pub fn search_interactions<'a>(
    interactions: &'a DrugInteractions,
    query: &str,
) -> InteractionHits<'a> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return InteractionHits {
            dangerous: interactions.dangerous_combinations.iter().collect(),
            beneficial: interactions.beneficial_combinations.iter().collect(),
            supplements: interactions.supplement_interactions.iter().collect(),
        };
    }

    let dangerous = interactions
        .dangerous_combinations
        .iter()
        .filter(|d| {
            any_contains(d.combination.iter().map(String::as_str), &query)
                || any_contains(
                    [
                        d.mechanism.as_str(),
                        d.recommendation.as_str(),
                        d.korean_description.as_str(),
                    ],
                    &query,
                )
                || d.affected_medications
                    .as_ref()
                    .is_some_and(|m| any_contains(m.iter().map(String::as_str), &query))
        })
        .collect();

    let beneficial = interactions
        .beneficial_combinations
        .iter()
        .filter(|b| {
            any_contains(b.combination.iter().map(String::as_str), &query)
                || any_contains(
                    [
                        b.benefit.as_str(),
                        b.recommendation.as_str(),
                        b.korean_description.as_str(),
                    ],
                    &query,
                )
        })
        .collect();

    let supplements = interactions
        .supplement_interactions
        .iter()
        .filter(|s| {
            any_contains(s.combination.iter().map(String::as_str), &query)
                || any_contains(
                    [
                        s.effect.as_str(),
                        s.recommendation.as_str(),
                        s.korean_description.as_str(),
                    ],
                    &query,
                )
        })
        .collect();

    InteractionHits {
        dangerous,
        beneficial,
        supplements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ReferenceData;
    use crate::core::types::InteractionSeverity;

    #[test]
    fn test_group_symptoms_preserves_order() {
        let symptoms = vec![
            Symptom::new("cough", "Cough", "RESP"),
            Symptom::new("nausea", "Nausea", "GI"),
            Symptom::new("wheezing", "Wheezing", "RESP"),
            Symptom::new("odd", "Odd", "CUSTOM"),
        ];
        let groups = group_symptoms(&symptoms, None);
        let labels: Vec<&str> = groups.iter().map(|g| g.label).collect();
        assert_eq!(labels, vec!["Respiratory", "Digestive", "CUSTOM"]);

        let resp: Vec<&str> = groups[0].symptoms.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(resp, vec!["cough", "wheezing"]);
    }

    #[test]
    fn test_group_symptoms_filter_by_code_or_label() {
        let symptoms = vec![
            Symptom::new("cough", "Cough", "RESP"),
            Symptom::new("nausea", "Nausea", "GI"),
        ];
        assert_eq!(group_symptoms(&symptoms, Some("gi")).len(), 1);
        assert_eq!(group_symptoms(&symptoms, Some("respiratory")).len(), 1);
        assert!(group_symptoms(&symptoms, Some("skin")).is_empty());
    }

    #[test]
    fn test_search_products() {
        let data = ReferenceData::load_embedded().unwrap();

        // Empty query returns everything
        assert_eq!(
            search_products(&data.korean_products, "  ").len(),
            data.korean_products.len()
        );

        // Korean name
        let hits = search_products(&data.korean_products, "판콜");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "pancold_a");

        // Ingredient, case-insensitive
        let hits = search_products(&data.korean_products, "ACETAMINOPHEN");
        assert!(hits.iter().any(|p| p.id == "geworin"));
        assert!(hits.iter().any(|p| p.id == "tylenol_kr"));

        // Category
        let hits = search_products(&data.korean_products, "wound care");
        assert!(hits.iter().all(|p| p.category == "Wound Care"));
        assert!(!hits.is_empty());

        assert!(search_products(&data.korean_products, "no such thing").is_empty());
    }

    #[test]
    fn test_interaction_counts() {
        let data = ReferenceData::load_embedded().unwrap();
        let i = &data.interactions;
        assert_eq!(
            InteractionCategory::Dangerous.count(i),
            i.dangerous_combinations.len()
        );
        assert_eq!(InteractionCategory::Timing.count(i), i.timing_guidelines.len());
    }

    #[test]
    fn test_search_interactions() {
        let data = ReferenceData::load_embedded().unwrap();
        let hits = search_interactions(&data.interactions, "alcohol");
        assert!(hits.dangerous.iter().any(|d| d.id == "acetaminophen_alcohol"));

        let hits = search_interactions(&data.interactions, "iron");
        assert!(hits.beneficial.iter().any(|b| b.id == "iron_vitamin_c"));
        assert!(hits.supplements.iter().any(|s| s.id == "calcium_iron"));

        let hits = search_interactions(&data.interactions, "warfarin");
        assert_eq!(hits.dangerous.len(), 1);

        assert!(search_interactions(&data.interactions, "kryptonite").is_empty());
    }

    #[test]
    fn test_dangerous_by_severity_is_stable() {
        let data = ReferenceData::load_embedded().unwrap();
        let sorted = dangerous_by_severity(&data.interactions);
        assert!(sorted
            .windows(2)
            .all(|w| w[0].severity >= w[1].severity));
        assert_eq!(sorted[0].severity, InteractionSeverity::VeryHigh);
        // First very_high entry in table order stays first
        assert_eq!(sorted[0].id, "acetaminophen_alcohol");
    }

    #[test]
    fn test_interaction_category_parse() {
        assert_eq!(
            InteractionCategory::parse("Supplements"),
            Some(InteractionCategory::Supplements)
        );
        assert_eq!(InteractionCategory::parse("other"), None);
    }
}
