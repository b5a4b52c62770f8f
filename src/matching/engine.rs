use std::collections::HashSet;

use crate::core::condition::Condition;
use crate::core::types::SymptomId;
use crate::matching::scoring::{check_red_flags, MatchScore};

/// Result of matching a selection against one condition
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// The matched condition
    pub condition: &'a Condition,

    /// Match score details
    pub score: MatchScore,

    /// Recommendation of the first red-flag rule that fired
    pub red_flag: Option<&'a str>,
}

impl<'a> MatchResult<'a> {
    pub fn new(condition: &'a Condition, selected: &HashSet<SymptomId>) -> Self {
        Self {
            condition,
            score: MatchScore::calculate(condition, selected),
            red_flag: check_red_flags(condition, selected),
        }
    }
}

/// Default number of conditions to report
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Default minimum score; results must score strictly above it
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Maximum number of ranked results
    pub max_results: usize,
    /// Results must score above this threshold; never below zero
    pub min_score: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// Ranked matches plus the urgent-care banner
#[derive(Debug, Clone)]
pub struct TriageReport<'a> {
    pub matches: Vec<MatchResult<'a>>,

    /// First red-flag recommendation among the ranked matches
    pub banner: Option<&'a str>,
}

impl TriageReport<'_> {
    pub fn has_red_flags(&self) -> bool {
        self.banner.is_some()
    }
}

/// The main matching engine
pub struct MatchingEngine<'a> {
    conditions: &'a [Condition],
    /// Configuration including result limit and threshold
    config: MatchingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(conditions: &'a [Condition]) -> Self {
        Self {
            conditions,
            config: MatchingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(conditions: &'a [Condition], config: MatchingConfig) -> Self {
        Self { conditions, config }
    }

    /// Score every condition and return the best matches.
    ///
    /// Zero scores are dropped. Ties keep catalog order.
    #[allow(clippy::implicit_hasher)]
    pub fn rank(&self, selected: &HashSet<SymptomId>) -> Vec<MatchResult<'a>> {
        let threshold = self.config.min_score.max(0.0);

        let mut results: Vec<MatchResult<'a>> = self
            .conditions
            .iter()
            .map(|condition| MatchResult::new(condition, selected))
            .filter(|r| r.score.score > threshold)
            .collect();

        tracing::debug!(
            "{} of {} conditions scored above {threshold}",
            results.len(),
            self.conditions.len()
        );

        // sort_by is stable, so equal scores stay in catalog order
        results.sort_by(|a, b| {
            b.score
                .score
                .partial_cmp(&a.score.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results.truncate(self.config.max_results);
        results
    }

    /// Rank conditions and pick the urgent-care banner
    #[allow(clippy::implicit_hasher)]
    pub fn triage(&self, selected: &HashSet<SymptomId>) -> TriageReport<'a> {
        let matches = self.rank(selected);
        let banner = matches.iter().find_map(|m| m.red_flag);
        TriageReport { matches, banner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ReferenceData;
    use crate::core::types::Likelihood;

    fn select(ids: &[&str]) -> HashSet<SymptomId> {
        ids.iter().map(|s| SymptomId::new(*s)).collect()
    }

    fn ids<'a>(results: &'a [MatchResult<'_>]) -> Vec<&'a str> {
        results.iter().map(|r| r.condition.id.0.as_str()).collect()
    }

    #[test]
    fn test_ties_keep_catalog_order_and_zero_dropped() {
        // A and B both score 80, C scores 0
        let conditions = vec![
            Condition::new("a", "A").with_weight("x", 80.0).with_weight("z", 20.0),
            Condition::new("b", "B").with_weight("y", 40.0).with_weight("z2", 10.0),
            Condition::new("c", "C").with_weight("unselected", 10.0),
        ];
        let engine = MatchingEngine::new(&conditions);
        let results = engine.rank(&select(&["x", "y"]));
        assert_eq!(ids(&results), vec!["a", "b"]);
        assert!((results[0].score.score - 80.0).abs() < 1e-9);
        assert!((results[1].score.score - 80.0).abs() < 1e-9);

        // Swap catalog order and the tie flips with it
        let swapped = vec![conditions[1].clone(), conditions[0].clone(), conditions[2].clone()];
        let engine = MatchingEngine::new(&swapped);
        assert_eq!(ids(&engine.rank(&select(&["x", "y"]))), vec!["b", "a"]);
    }

    #[test]
    fn test_sorted_descending_and_limited() {
        let conditions = vec![
            Condition::new("low", "Low").with_weight("s1", 1.0).with_weight("s9", 9.0),
            Condition::new("high", "High").with_weight("s1", 9.0).with_weight("s9", 1.0),
            Condition::new("mid", "Mid").with_weight("s1", 1.0).with_weight("s8", 1.0),
            Condition::new("full", "Full").with_weight("s1", 1.0),
        ];
        let engine = MatchingEngine::new(&conditions);
        let results = engine.rank(&select(&["s1"]));
        assert_eq!(ids(&results), vec!["full", "high", "mid"]);

        let likelihoods: Vec<Likelihood> = results.iter().map(|r| r.score.likelihood).collect();
        assert_eq!(
            likelihoods,
            vec![Likelihood::High, Likelihood::High, Likelihood::Medium]
        );
    }

    #[test]
    fn test_empty_selection_yields_no_results() {
        let conditions = vec![Condition::new("a", "A").with_weight("x", 1.0)];
        let report = MatchingEngine::new(&conditions).triage(&select(&[]));
        assert!(report.matches.is_empty());
        assert!(!report.has_red_flags());
    }

    #[test]
    fn test_banner_is_first_red_flag_in_ranked_order() {
        let conditions = vec![
            Condition::new("weaker", "Weaker")
                .with_weight("fever", 10.0)
                .with_weight("other", 90.0)
                .with_red_flag(&["fever"], "Weaker banner"),
            Condition::new("no_flag", "No flag").with_weight("fever", 1.0),
            Condition::new("stronger", "Stronger")
                .with_weight("fever", 60.0)
                .with_weight("other2", 40.0)
                .with_red_flag(&["fever"], "Stronger banner"),
        ];
        let report = MatchingEngine::new(&conditions).triage(&select(&["fever"]));
        assert_eq!(ids(&report.matches), vec!["no_flag", "stronger", "weaker"]);
        assert!(report.matches[0].red_flag.is_none());
        assert_eq!(report.banner, Some("Stronger banner"));
    }

    #[test]
    fn test_banner_ignores_conditions_outside_top_results() {
        let conditions = vec![
            Condition::new("flagged", "Flagged")
                .with_weight("fever", 1.0)
                .with_weight("other", 99.0)
                .with_red_flag(&["fever"], "Hidden"),
            Condition::new("c1", "C1").with_weight("fever", 1.0),
            Condition::new("c2", "C2").with_weight("fever", 1.0),
            Condition::new("c3", "C3").with_weight("fever", 1.0),
        ];
        let report = MatchingEngine::new(&conditions).triage(&select(&["fever"]));
        assert_eq!(ids(&report.matches), vec!["c1", "c2", "c3"]);
        assert!(report.banner.is_none());
    }

    #[test]
    fn test_custom_config() {
        let conditions = vec![
            Condition::new("a", "A").with_weight("x", 1.0).with_weight("y", 1.0),
            Condition::new("b", "B").with_weight("x", 1.0).with_weight("z", 3.0),
        ];
        let config = MatchingConfig {
            max_results: 10,
            min_score: 30.0,
        };
        let engine = MatchingEngine::with_config(&conditions, config);
        assert_eq!(ids(&engine.rank(&select(&["x"]))), vec!["a"]);

        // Negative thresholds still drop zero scores
        let config = MatchingConfig {
            max_results: 10,
            min_score: -1.0,
        };
        let engine = MatchingEngine::with_config(&conditions, config);
        assert_eq!(engine.rank(&select(&["q"])).len(), 0);
    }

    #[test]
    fn test_embedded_flu_triage() {
        let data = ReferenceData::load_embedded().unwrap();
        let engine = MatchingEngine::new(&data.conditions);
        let selection = data.resolve_selection(&["fever", "body aches", "chills", "fatigue"]);
        let report = engine.triage(&selection.ids);

        assert!(!report.matches.is_empty());
        assert_eq!(report.matches[0].condition.id.0, "influenza");
        assert!(report.banner.is_none());

        let selection =
            data.resolve_selection(&["fever", "body aches", "shortness of breath"]);
        let report = engine.triage(&selection.ids);
        assert_eq!(report.matches[0].condition.id.0, "influenza");
        assert!(report.has_red_flags());
    }
}
