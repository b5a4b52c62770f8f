use std::collections::{HashMap, HashSet};

use crate::core::symptom::Symptom;
use crate::core::types::SymptomId;

/// Lookup from ids, names and synonyms to symptom positions
#[derive(Debug, Default)]
pub struct SymptomIndex {
    /// Index: symptom ID -> index in symptoms vec
    id_to_index: HashMap<SymptomId, usize>,

    /// Index: lowercased term -> index in symptoms vec
    term_to_index: HashMap<String, usize>,
}

impl SymptomIndex {
    /// Build the index.
    ///
    /// Terms are inserted in priority order (ids, English names, Korean names,
    /// English synonyms, Korean synonyms); the first symptom to claim a term keeps it.
    pub fn build(symptoms: &[Symptom]) -> Self {
        let mut index = Self::default();

        for (idx, symptom) in symptoms.iter().enumerate() {
            index.id_to_index.insert(symptom.id.clone(), idx);
            index.claim(symptom.id.as_str(), idx);
        }
        for (idx, symptom) in symptoms.iter().enumerate() {
            index.claim(&symptom.display_name_en, idx);
        }
        for (idx, symptom) in symptoms.iter().enumerate() {
            index.claim(&symptom.display_name_ko, idx);
        }
        for (idx, symptom) in symptoms.iter().enumerate() {
            for synonym in &symptom.synonyms_en {
                index.claim(synonym, idx);
            }
        }
        for (idx, symptom) in symptoms.iter().enumerate() {
            for synonym in &symptom.synonyms_ko {
                index.claim(synonym, idx);
            }
        }

        index
    }

    fn claim(&mut self, term: &str, idx: usize) {
        let key = normalize_term(term);
        if !key.is_empty() {
            self.term_to_index.entry(key).or_insert(idx);
        }
    }

    /// Position of a symptom by exact ID
    pub fn position(&self, id: &SymptomId) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Position of the symptom a free-text token refers to
    pub fn resolve(&self, token: &str) -> Option<usize> {
        self.term_to_index.get(&normalize_term(token)).copied()
    }
}

/// Trimmed, lowercased, with internal whitespace collapsed
fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Symptoms chosen by the user, after resolution
#[derive(Debug, Clone, Default)]
pub struct SymptomSelection {
    /// Set used for scoring; includes unrecognized tokens verbatim
    pub ids: HashSet<SymptomId>,

    /// Recognized symptoms in the order first given
    pub resolved: Vec<SymptomId>,

    /// Tokens that matched no symptom
    pub unrecognized: Vec<String>,
}

impl SymptomSelection {
    pub fn push_resolved(&mut self, id: SymptomId) {
        if self.ids.insert(id.clone()) {
            self.resolved.push(id);
        }
    }

    pub fn push_unrecognized(&mut self, token: &str) {
        if self.ids.insert(SymptomId::new(token)) {
            self.unrecognized.push(token.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptoms() -> Vec<Symptom> {
        vec![
            Symptom::new("fever", "Fever", "INFECTIOUS")
                .with_korean("발열")
                .with_synonyms_en(&["high temperature"])
                .with_synonyms_ko(&["열"]),
            Symptom::new("heartburn", "Heartburn", "GI").with_synonyms_en(&["acid reflux"]),
            // Claims "heartburn" as a synonym, but the label above has priority
            Symptom::new("reflux", "Acid Reflux", "GI").with_synonyms_en(&["heartburn"]),
        ]
    }

    #[test]
    fn test_resolve_by_id_label_and_synonym() {
        let index = SymptomIndex::build(&symptoms());
        assert_eq!(index.resolve("fever"), Some(0));
        assert_eq!(index.resolve("  FEVER "), Some(0));
        assert_eq!(index.resolve("High   Temperature"), Some(0));
        assert_eq!(index.resolve("발열"), Some(0));
        assert_eq!(index.resolve("열"), Some(0));
        assert_eq!(index.resolve("chills"), None);
    }

    #[test]
    fn test_label_beats_synonym() {
        let index = SymptomIndex::build(&symptoms());
        assert_eq!(index.resolve("heartburn"), Some(1));
        assert_eq!(index.resolve("acid reflux"), Some(2));
    }

    #[test]
    fn test_position_is_exact() {
        let index = SymptomIndex::build(&symptoms());
        assert_eq!(index.position(&SymptomId::new("reflux")), Some(2));
        assert_eq!(index.position(&SymptomId::new("Reflux")), None);
    }

    #[test]
    fn test_selection_deduplicates() {
        let mut selection = SymptomSelection::default();
        selection.push_resolved(SymptomId::new("fever"));
        selection.push_resolved(SymptomId::new("fever"));
        selection.push_unrecognized("zzz");
        selection.push_unrecognized("zzz");
        assert_eq!(selection.resolved.len(), 1);
        assert_eq!(selection.unrecognized.len(), 1);
        assert_eq!(selection.ids.len(), 2);
    }
}
