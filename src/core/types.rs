use serde::{Deserialize, Serialize};

/// Unique identifier for a symptom in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymptomId(pub String);

impl SymptomId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymptomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SymptomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a condition in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionId(pub String);

impl ConditionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for ConditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Symptom category codes and their English display labels.
///
/// Codes outside this table are displayed verbatim.
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("INFECTIOUS", "Infectious"),
    ("RESP", "Respiratory"),
    ("ENT", "Ear, Nose & Throat"),
    ("GEN", "General"),
    ("GI", "Digestive"),
    ("ALLERGY", "Allergy"),
    ("DERM", "Skin"),
    ("NEURO", "Neurological"),
    ("SLEEP", "Sleep"),
    ("METABOLIC", "Metabolic"),
    ("MSK", "Muscle & Joint"),
    ("CARDIAC", "Heart"),
    ("OPHTH", "Eye"),
    ("PSYCH", "Mental Health"),
    ("EMERGENCY", "Emergency"),
];

/// Display label for a symptom category code
#[must_use]
pub fn category_label(code: &str) -> &str {
    CATEGORY_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, label)| label)
}

/// How strongly a condition matches the selected symptoms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl Likelihood {
    /// Bucket a 0-100 match score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Severity of a dangerous drug combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionSeverity {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl std::fmt::Display for InteractionSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::VeryHigh => write!(f, "VERY_HIGH"),
        }
    }
}

/// How closely a US alternative matches a Korean product
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Similarity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Similarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Urgency of a safety guidance section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetySeverity {
    Emergency,
    Urgent,
    Caution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_likelihood_boundaries() {
        assert_eq!(Likelihood::from_score(100.0), Likelihood::High);
        assert_eq!(Likelihood::from_score(70.0), Likelihood::High);
        assert_eq!(Likelihood::from_score(69.99), Likelihood::Medium);
        assert_eq!(Likelihood::from_score(40.0), Likelihood::Medium);
        assert_eq!(Likelihood::from_score(39.99), Likelihood::Low);
        assert_eq!(Likelihood::from_score(0.0), Likelihood::Low);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("ENT"), "Ear, Nose & Throat");
        assert_eq!(category_label("GI"), "Digestive");
        assert_eq!(category_label("UNLISTED"), "UNLISTED");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(InteractionSeverity::VeryHigh > InteractionSeverity::High);
        assert!(InteractionSeverity::High > InteractionSeverity::Moderate);
        assert!(InteractionSeverity::Moderate > InteractionSeverity::Low);
    }

    #[test]
    fn test_severity_serde() {
        let s: InteractionSeverity = serde_json::from_str("\"very_high\"").unwrap();
        assert_eq!(s, InteractionSeverity::VeryHigh);
        assert_eq!(s.to_string(), "VERY_HIGH");
    }
}
