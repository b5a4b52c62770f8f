use serde::{Deserialize, Serialize};

use crate::core::types::Similarity;

/// US market status of a Korean product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsStatus {
    /// e.g. "available", "limited", "not_available"
    pub availability: String,
    pub note: String,
}

/// A US product that can stand in for a Korean one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsAlternative {
    #[serde(default)]
    pub active_ingredients: Vec<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub rx_required: bool,
    #[serde(default)]
    pub price_range: String,
    pub similarity: Similarity,
}

/// A Korean-medicine product mapped to US OTC alternatives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KoreanProduct {
    pub id: String,
    pub name_ko: String,
    pub name_en: String,
    pub category: String,
    #[serde(default)]
    pub active_ingredients: Vec<String>,
    pub us_status: UsStatus,
    #[serde(default)]
    pub us_alternatives: Vec<UsAlternative>,
    #[serde(default)]
    pub cautions: Vec<String>,
}

impl KoreanProduct {
    /// True if the lowercased query appears in a name, the category or an ingredient
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.name_ko.to_lowercase().contains(query_lower)
            || self.name_en.to_lowercase().contains(query_lower)
            || self.category.to_lowercase().contains(query_lower)
            || self
                .active_ingredients
                .iter()
                .any(|i| i.to_lowercase().contains(query_lower))
    }

    /// Highest similarity among the US alternatives
    pub fn best_similarity(&self) -> Option<Similarity> {
        self.us_alternatives.iter().map(|a| a.similarity).max()
    }
}
