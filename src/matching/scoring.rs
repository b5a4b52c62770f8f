use serde::Serialize;
use std::collections::HashSet;

use crate::core::condition::Condition;
use crate::core::types::{Likelihood, SymptomId};

/// How well a condition's symptom profile is covered by a selection
#[derive(Debug, Clone, Serialize)]
pub struct MatchScore {
    /// Matched weight as a percentage of the condition's total weight, 0-100
    pub score: f64,

    /// Sum of weights for selected symptoms
    pub matched_weight: f64,

    /// Sum of all weights in the profile
    pub max_possible: f64,

    /// Profile symptoms that were selected, in profile order
    pub matched_symptoms: Vec<SymptomId>,

    /// Likelihood bucket derived from score
    pub likelihood: Likelihood,
}

impl MatchScore {
    /// Calculate the match score of a condition against selected symptoms
    #[must_use]
    #[allow(clippy::implicit_hasher)]
    pub fn calculate(condition: &Condition, selected: &HashSet<SymptomId>) -> Self {
        let mut matched_weight = 0.0;
        let mut max_possible = 0.0;
        let mut matched_symptoms = Vec::new();

        for weighted in &condition.symptom_weights {
            max_possible += weighted.weight;
            if selected.contains(&weighted.symptom_id) {
                matched_weight += weighted.weight;
                matched_symptoms.push(weighted.symptom_id.clone());
            }
        }

        // Empty profiles score zero rather than dividing by zero
        let score = if max_possible > 0.0 {
            matched_weight / max_possible * 100.0
        } else {
            0.0
        };

        Self {
            score,
            matched_weight,
            max_possible,
            matched_symptoms,
            likelihood: Likelihood::from_score(score),
        }
    }
}

/// Match score of a condition against selected symptoms, 0-100
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn score(condition: &Condition, selected: &HashSet<SymptomId>) -> f64 {
    MatchScore::calculate(condition, selected).score
}

/// Recommendation of the first red-flag rule that fires, in declared order.
///
/// First match wins; later rules are never consulted once one fires.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn check_red_flags<'a>(
    condition: &'a Condition,
    selected: &HashSet<SymptomId>,
) -> Option<&'a str> {
    condition
        .exclusion_red_flags
        .iter()
        .find(|rule| rule.fires(selected))
        .map(|rule| rule.recommendation.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(ids: &[&str]) -> HashSet<SymptomId> {
        ids.iter().map(|s| SymptomId::new(*s)).collect()
    }

    fn flu() -> Condition {
        Condition::new("flu", "Flu")
            .with_weight("fever", 50.0)
            .with_weight("cough", 30.0)
            .with_weight("fatigue", 20.0)
    }

    #[test]
    fn test_flu_example() {
        let flu = flu();
        assert!((score(&flu, &select(&["fever", "cough"])) - 80.0).abs() < 1e-9);
        assert!((score(&flu, &select(&[])) - 0.0).abs() < 1e-9);
        assert!((score(&flu, &select(&["fever", "cough", "fatigue"])) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let empty = Condition::new("empty", "Empty");
        assert!((score(&empty, &select(&["fever"])) - 0.0).abs() < f64::EPSILON);
        assert!((score(&empty, &select(&[])) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_always_in_range() {
        let flu = flu();
        let selections: [&[&str]; 6] = [
            &[],
            &["fever"],
            &["unknown"],
            &["fever", "unknown", "other"],
            &["fatigue", "cough"],
            &["fever", "cough", "fatigue", "extra"],
        ];
        for sel in selections {
            let s = score(&flu, &select(sel));
            assert!((0.0..=100.0).contains(&s), "score {s} out of range for {sel:?}");
        }
    }

    #[test]
    fn test_full_selection_scores_hundred() {
        let condition = Condition::new("odd", "Odd weights")
            .with_weight("a", 0.3)
            .with_weight("b", 0.7)
            .with_weight("c", 13.0);
        let s = score(&condition, &select(&["c", "a", "b"]));
        assert!((s - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_selection_order_does_not_matter() {
        let flu = flu();
        let forward: HashSet<SymptomId> = ["fever", "fatigue"]
            .iter()
            .map(|s| SymptomId::new(*s))
            .collect();
        let backward: HashSet<SymptomId> = ["fatigue", "fever"]
            .iter()
            .rev()
            .map(|s| SymptomId::new(*s))
            .collect();
        assert!((score(&flu, &forward) - score(&flu, &backward)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_selected_ids_contribute_nothing() {
        let flu = flu();
        let with_unknown = score(&flu, &select(&["fever", "not_a_symptom"]));
        let without = score(&flu, &select(&["fever"]));
        assert!((with_unknown - without).abs() < f64::EPSILON);
        assert!((without - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_match_score_details() {
        let result = MatchScore::calculate(&flu(), &select(&["cough", "fever"]));
        assert!((result.matched_weight - 80.0).abs() < 1e-9);
        assert!((result.max_possible - 100.0).abs() < 1e-9);
        // Profile order, not selection order
        assert_eq!(
            result.matched_symptoms,
            vec![SymptomId::new("fever"), SymptomId::new("cough")]
        );
        assert_eq!(result.likelihood, Likelihood::High);
    }

    #[test]
    fn test_red_flag_single_rule() {
        let condition = flu().with_red_flag(&["chest_pain"], "Call 911");
        assert_eq!(
            check_red_flags(&condition, &select(&["chest_pain"])),
            Some("Call 911")
        );
        assert_eq!(check_red_flags(&condition, &select(&["fever"])), None);
    }

    #[test]
    fn test_red_flag_first_match_wins() {
        let condition = flu()
            .with_red_flag(&["confusion", "chest_pain"], "First rule")
            .with_red_flag(&["chest_pain"], "Second rule");

        // Both rules fire; the first declared wins
        assert_eq!(
            check_red_flags(&condition, &select(&["chest_pain"])),
            Some("First rule")
        );

        // Reversing declaration order reverses the outcome
        let reversed = flu()
            .with_red_flag(&["chest_pain"], "Second rule")
            .with_red_flag(&["confusion", "chest_pain"], "First rule");
        assert_eq!(
            check_red_flags(&reversed, &select(&["chest_pain"])),
            Some("Second rule")
        );
    }

    #[test]
    fn test_red_flag_absent_list() {
        assert_eq!(check_red_flags(&flu(), &select(&["chest_pain"])), None);
    }
}
