use serde::{Deserialize, Serialize};

use crate::core::types::{category_label, SymptomId};

/// A user-selectable complaint such as "fever"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    /// Unique identifier
    pub id: SymptomId,

    /// English display name
    #[serde(alias = "label_en")]
    pub display_name_en: String,

    /// Korean display name
    #[serde(alias = "label_ko")]
    pub display_name_ko: String,

    #[serde(default)]
    pub synonyms_en: Vec<String>,

    #[serde(default)]
    pub synonyms_ko: Vec<String>,

    /// Category code (e.g. "RESP", "GI")
    pub category: String,
}

impl Symptom {
    pub fn new(
        id: impl Into<String>,
        display_name_en: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: SymptomId::new(id),
            display_name_en: display_name_en.into(),
            display_name_ko: String::new(),
            synonyms_en: Vec::new(),
            synonyms_ko: Vec::new(),
            category: category.into(),
        }
    }

    #[must_use]
    pub fn with_korean(mut self, name: impl Into<String>) -> Self {
        self.display_name_ko = name.into();
        self
    }

    #[must_use]
    pub fn with_synonyms_en(mut self, synonyms: &[&str]) -> Self {
        self.synonyms_en = synonyms.iter().map(|s| (*s).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_synonyms_ko(mut self, synonyms: &[&str]) -> Self {
        self.synonyms_ko = synonyms.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// English label for this symptom's category
    pub fn category_label(&self) -> &str {
        category_label(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_bundled_field_names() {
        let json = r#"{
            "id": "fever",
            "label_en": "Fever",
            "label_ko": "발열",
            "synonyms_en": ["feverish"],
            "synonyms_ko": ["열"],
            "category": "INFECTIOUS"
        }"#;
        let symptom: Symptom = serde_json::from_str(json).unwrap();
        assert_eq!(symptom.id, SymptomId::new("fever"));
        assert_eq!(symptom.display_name_en, "Fever");
        assert_eq!(symptom.display_name_ko, "발열");
        assert_eq!(symptom.category_label(), "Infectious");
    }

    #[test]
    fn test_deserialize_display_name_fields() {
        let json = r#"{
            "id": "cough",
            "display_name_en": "Cough",
            "display_name_ko": "기침",
            "category": "RESP"
        }"#;
        let symptom: Symptom = serde_json::from_str(json).unwrap();
        assert_eq!(symptom.display_name_en, "Cough");
        assert!(symptom.synonyms_en.is_empty());
    }
}
