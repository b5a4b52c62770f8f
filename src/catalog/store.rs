use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::catalog::index::{SymptomIndex, SymptomSelection};
use crate::core::condition::Condition;
use crate::core::guide::{EmergencyGuide, SafetyGuidance};
use crate::core::interaction::DrugInteractions;
use crate::core::product::KoreanProduct;
use crate::core::symptom::Symptom;
use crate::core::types::{ConditionId, SymptomId};

pub use crate::core::condition::ReferenceLocation;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {table}: {source}")]
    ReadError {
        table: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {table}: {source}")]
    ParseError {
        table: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid reference data: {0}")]
    ValidationError(String),
}

/// Data format version for compatibility checking
pub const DATA_VERSION: &str = "1.0.0";

pub const SYMPTOMS_FILE: &str = "symptoms.json";
pub const CONDITIONS_FILE: &str = "conditions.json";
pub const KOREAN_PRODUCTS_FILE: &str = "korean_products.json";
pub const DRUG_INTERACTIONS_FILE: &str = "drug_interactions.json";
pub const EMERGENCY_GUIDE_FILE: &str = "emergency_guide.json";
pub const SAFETY_FILE: &str = "safety.json";

#[derive(Deserialize)]
struct SymptomsFile {
    #[serde(default)]
    version: Option<String>,
    symptoms: Vec<Symptom>,
}

#[derive(Deserialize)]
struct ConditionsFile {
    #[serde(default)]
    version: Option<String>,
    conditions: Vec<Condition>,
}

#[derive(Deserialize)]
struct KoreanProductsFile {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    korean_products: Vec<KoreanProduct>,
}

#[derive(Deserialize)]
struct DrugInteractionsFile {
    #[serde(default)]
    version: Option<String>,
    drug_interactions: DrugInteractions,
}

#[derive(Deserialize)]
struct EmergencyGuideFile {
    #[serde(default)]
    version: Option<String>,
    emergency_guide: EmergencyGuide,
}

#[derive(Deserialize)]
struct SafetyFile {
    #[serde(default)]
    version: Option<String>,
    safety: SafetyGuidance,
}

/// Raw JSON text of every reference table
#[derive(Debug, Clone, Copy)]
pub struct DataSources<'a> {
    pub symptoms: &'a str,
    pub conditions: &'a str,
    pub korean_products: &'a str,
    pub drug_interactions: &'a str,
    pub emergency_guide: &'a str,
    pub safety: &'a str,
}

/// Single-file export of all tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBundle {
    pub version: String,
    pub created_at: String,
    pub symptoms: Vec<Symptom>,
    pub conditions: Vec<Condition>,
    pub korean_products: Vec<KoreanProduct>,
    pub drug_interactions: DrugInteractions,
    pub emergency_guide: EmergencyGuide,
    pub safety: SafetyGuidance,
}

/// A condition that refers to a symptom the catalog does not define
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub condition_id: ConditionId,
    pub symptom_id: SymptomId,
    pub location: ReferenceLocation,
}

/// Data-integrity findings that do not prevent loading
#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub dangling_references: Vec<DanglingReference>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_references.is_empty()
    }
}

/// All reference tables, validated and indexed.
///
/// Loaded once and never mutated afterwards.
#[derive(Debug)]
pub struct ReferenceData {
    pub symptoms: Vec<Symptom>,
    pub conditions: Vec<Condition>,
    pub korean_products: Vec<KoreanProduct>,
    pub interactions: DrugInteractions,
    pub emergency: EmergencyGuide,
    pub safety: SafetyGuidance,

    symptom_index: SymptomIndex,

    /// Index: condition ID -> index in conditions vec
    condition_id_to_index: HashMap<ConditionId, usize>,

    /// Index: product ID -> index in korean_products vec
    product_id_to_index: HashMap<String, usize>,

    integrity: IntegrityReport,
}

impl ReferenceData {
    /// Load the data bundled into the binary
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Checked at compile time by build.rs
        const SOURCES: DataSources<'static> = DataSources {
            symptoms: include_str!("../../data/symptoms.json"),
            conditions: include_str!("../../data/conditions.json"),
            korean_products: include_str!("../../data/korean_products.json"),
            drug_interactions: include_str!("../../data/drug_interactions.json"),
            emergency_guide: include_str!("../../data/emergency_guide.json"),
            safety: include_str!("../../data/safety.json"),
        };
        Self::from_sources(&SOURCES)
    }

    /// Load from a data directory or an exported bundle file
    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        if path.is_dir() {
            Self::load_from_dir(path)
        } else {
            Self::load_from_file(path)
        }
    }

    /// Load the six table files from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            std::fs::read_to_string(dir.join(name)).map_err(|source| CatalogError::ReadError {
                table: name.to_string(),
                source,
            })
        };

        let symptoms = read(SYMPTOMS_FILE)?;
        let conditions = read(CONDITIONS_FILE)?;
        let korean_products = read(KOREAN_PRODUCTS_FILE)?;
        let drug_interactions = read(DRUG_INTERACTIONS_FILE)?;
        let emergency_guide = read(EMERGENCY_GUIDE_FILE)?;
        let safety = read(SAFETY_FILE)?;

        tracing::debug!("Loading reference data from {}", dir.display());

        Self::from_sources(&DataSources {
            symptoms: &symptoms,
            conditions: &conditions,
            korean_products: &korean_products,
            drug_interactions: &drug_interactions,
            emergency_guide: &emergency_guide,
            safety: &safety,
        })
    }

    /// Load an exported bundle
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadError {
            table: path.display().to_string(),
            source,
        })?;
        Self::from_bundle_json(&content)
    }

    /// Parse an exported bundle
    pub fn from_bundle_json(json: &str) -> Result<Self, CatalogError> {
        let bundle: DataBundle =
            serde_json::from_str(json).map_err(|source| CatalogError::ParseError {
                table: "bundle".to_string(),
                source,
            })?;
        check_version("bundle", Some(&bundle.version));

        Self::build(
            bundle.symptoms,
            bundle.conditions,
            bundle.korean_products,
            bundle.drug_interactions,
            bundle.emergency_guide,
            bundle.safety,
        )
    }

    /// Parse every table from JSON text
    pub fn from_sources(sources: &DataSources<'_>) -> Result<Self, CatalogError> {
        let symptoms: SymptomsFile = parse_table(SYMPTOMS_FILE, sources.symptoms)?;
        let conditions: ConditionsFile = parse_table(CONDITIONS_FILE, sources.conditions)?;
        let products: KoreanProductsFile =
            parse_table(KOREAN_PRODUCTS_FILE, sources.korean_products)?;
        let interactions: DrugInteractionsFile =
            parse_table(DRUG_INTERACTIONS_FILE, sources.drug_interactions)?;
        let emergency: EmergencyGuideFile =
            parse_table(EMERGENCY_GUIDE_FILE, sources.emergency_guide)?;
        let safety: SafetyFile = parse_table(SAFETY_FILE, sources.safety)?;

        check_version(SYMPTOMS_FILE, symptoms.version.as_deref());
        check_version(CONDITIONS_FILE, conditions.version.as_deref());
        check_version(KOREAN_PRODUCTS_FILE, products.version.as_deref());
        check_version(DRUG_INTERACTIONS_FILE, interactions.version.as_deref());
        check_version(EMERGENCY_GUIDE_FILE, emergency.version.as_deref());
        check_version(SAFETY_FILE, safety.version.as_deref());

        Self::build(
            symptoms.symptoms,
            conditions.conditions,
            products.korean_products,
            interactions.drug_interactions,
            emergency.emergency_guide,
            safety.safety,
        )
    }

    /// Validate and index already-parsed tables
    pub fn build(
        symptoms: Vec<Symptom>,
        conditions: Vec<Condition>,
        korean_products: Vec<KoreanProduct>,
        interactions: DrugInteractions,
        emergency: EmergencyGuide,
        safety: SafetyGuidance,
    ) -> Result<Self, CatalogError> {
        validate_symptoms(&symptoms)?;
        validate_conditions(&conditions)?;

        let mut product_id_to_index = HashMap::new();
        for (idx, product) in korean_products.iter().enumerate() {
            if product_id_to_index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::ValidationError(format!(
                    "duplicate Korean product id '{}'",
                    product.id
                )));
            }
        }

        let condition_id_to_index = conditions
            .iter()
            .enumerate()
            .map(|(idx, c)| (c.id.clone(), idx))
            .collect();

        let symptom_index = SymptomIndex::build(&symptoms);
        let integrity = check_integrity(&symptoms, &conditions);
        for dangling in &integrity.dangling_references {
            tracing::warn!(
                "Condition '{}' references unknown symptom '{}' in {:?}",
                dangling.condition_id,
                dangling.symptom_id,
                dangling.location
            );
        }

        tracing::debug!(
            "Loaded {} symptoms, {} conditions, {} Korean products",
            symptoms.len(),
            conditions.len(),
            korean_products.len()
        );

        Ok(Self {
            symptoms,
            conditions,
            korean_products,
            interactions,
            emergency,
            safety,
            symptom_index,
            condition_id_to_index,
            product_id_to_index,
            integrity,
        })
    }

    /// Get a symptom by ID
    pub fn symptom(&self, id: &SymptomId) -> Option<&Symptom> {
        self.symptom_index
            .position(id)
            .map(|idx| &self.symptoms[idx])
    }

    /// Get a condition by ID
    pub fn condition(&self, id: &ConditionId) -> Option<&Condition> {
        self.condition_id_to_index
            .get(id)
            .map(|&idx| &self.conditions[idx])
    }

    /// Get a Korean product by ID
    pub fn korean_product(&self, id: &str) -> Option<&KoreanProduct> {
        self.product_id_to_index
            .get(id)
            .map(|&idx| &self.korean_products[idx])
    }

    /// Resolve a free-text token (id, name or synonym) to a symptom
    pub fn resolve_symptom(&self, token: &str) -> Option<&Symptom> {
        self.symptom_index
            .resolve(token)
            .map(|idx| &self.symptoms[idx])
    }

    /// Resolve user-supplied tokens into a set of symptom ids.
    ///
    /// Unrecognized tokens are kept as raw ids so they contribute nothing to scores.
    pub fn resolve_selection<S: AsRef<str>>(&self, tokens: &[S]) -> SymptomSelection {
        let mut selection = SymptomSelection::default();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            match self.resolve_symptom(token) {
                Some(symptom) => selection.push_resolved(symptom.id.clone()),
                None => {
                    tracing::warn!("Unrecognized symptom '{token}'");
                    selection.push_unrecognized(token);
                }
            }
        }
        selection
    }

    /// Integrity findings collected at load time
    pub fn integrity(&self) -> &IntegrityReport {
        &self.integrity
    }

    /// Export all tables to a single JSON bundle
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let bundle = DataBundle {
            version: DATA_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            symptoms: self.symptoms.clone(),
            conditions: self.conditions.clone(),
            korean_products: self.korean_products.clone(),
            drug_interactions: self.interactions.clone(),
            emergency_guide: self.emergency.clone(),
            safety: self.safety.clone(),
        };
        serde_json::to_string_pretty(&bundle).map_err(|source| CatalogError::ParseError {
            table: "bundle".to_string(),
            source,
        })
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(table: &str, json: &str) -> Result<T, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::ParseError {
        table: table.to_string(),
        source,
    })
}

fn check_version(table: &str, version: Option<&str>) {
    // Warn but don't fail
    if let Some(version) = version {
        if version != DATA_VERSION {
            tracing::warn!(
                "Data version mismatch in {table} (expected {DATA_VERSION}, found {version})"
            );
        }
    }
}

fn validate_symptoms(symptoms: &[Symptom]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&SymptomId> = HashSet::new();
    for symptom in symptoms {
        if symptom.id.as_str().trim().is_empty() {
            return Err(CatalogError::ValidationError(format!(
                "symptom '{}' has an empty id",
                symptom.display_name_en
            )));
        }
        if !seen.insert(&symptom.id) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate symptom id '{}'",
                symptom.id
            )));
        }
    }
    Ok(())
}

fn validate_conditions(conditions: &[Condition]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&ConditionId> = HashSet::new();
    for condition in conditions {
        if !seen.insert(&condition.id) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate condition id '{}'",
                condition.id
            )));
        }

        for weight in &condition.symptom_weights {
            if !weight.weight.is_finite() || weight.weight <= 0.0 {
                return Err(CatalogError::ValidationError(format!(
                    "condition '{}' has invalid weight {} for symptom '{}'",
                    condition.id, weight.weight, weight.symptom_id
                )));
            }
        }

        // Positive weights with a finite total keep every score within [0, 100]
        if !condition.max_possible_weight().is_finite() {
            return Err(CatalogError::ValidationError(format!(
                "condition '{}' has symptom weights whose total is not finite",
                condition.id
            )));
        }

        for (i, rule) in condition.exclusion_red_flags.iter().enumerate() {
            if rule.if_symptoms_any.is_empty() {
                return Err(CatalogError::ValidationError(format!(
                    "condition '{}' red flag {i} has no trigger symptoms",
                    condition.id
                )));
            }
        }
    }
    Ok(())
}

fn check_integrity(symptoms: &[Symptom], conditions: &[Condition]) -> IntegrityReport {
    let known: HashSet<&SymptomId> = symptoms.iter().map(|s| &s.id).collect();
    let mut report = IntegrityReport::default();

    for condition in conditions {
        for (location, id) in condition.referenced_symptoms() {
            if !known.contains(id) {
                report.dangling_references.push(DanglingReference {
                    condition_id: condition.id.clone(),
                    symptom_id: id.clone(),
                    location,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> ReferenceData {
        ReferenceData::load_embedded().unwrap()
    }

    #[test]
    fn test_load_embedded_data() {
        let data = embedded();
        assert!(!data.symptoms.is_empty());
        assert!(!data.conditions.is_empty());
        assert!(!data.korean_products.is_empty());
        assert!(data.integrity().is_clean());
    }

    #[test]
    fn test_get_condition_by_id() {
        let data = embedded();
        let flu = data.condition(&ConditionId::new("influenza"));
        assert!(flu.is_some());
        assert_eq!(flu.unwrap().name_en, "Influenza (Flu)");
        assert!(data.condition(&ConditionId::new("nonexistent")).is_none());
    }

    #[test]
    fn test_get_symptom_and_product() {
        let data = embedded();
        let fever = data.symptom(&SymptomId::new("fever")).unwrap();
        assert_eq!(fever.display_name_ko, "발열");
        assert_eq!(data.korean_product("pancold_a").unwrap().name_ko, "판콜에이");
    }

    #[test]
    fn test_resolve_selection() {
        let data = embedded();
        let tokens = ["Fever", "stuffy nose", "기침", "fever", "xyzzy", " "];
        let selection = data.resolve_selection(&tokens);
        let resolved: Vec<&str> = selection.resolved.iter().map(SymptomId::as_str).collect();
        assert_eq!(resolved, vec!["fever", "nasal_congestion", "cough"]);
        assert_eq!(selection.unrecognized, vec!["xyzzy"]);
        assert_eq!(selection.ids.len(), 4);
        assert!(selection.ids.contains(&SymptomId::new("xyzzy")));
    }

    #[test]
    fn test_to_json_round_trips_through_bundle() {
        let data = embedded();
        let json = data.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"created_at\""));

        let reloaded = ReferenceData::from_bundle_json(&json).unwrap();
        assert_eq!(reloaded.conditions.len(), data.conditions.len());
        assert_eq!(reloaded.symptoms.len(), data.symptoms.len());
    }

    #[test]
    fn test_duplicate_symptom_rejected() {
        let symptoms = vec![
            Symptom::new("fever", "Fever", "INFECTIOUS"),
            Symptom::new("fever", "High Temperature", "INFECTIOUS"),
        ];
        let result = validate_symptoms(&symptoms);
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let conditions = vec![Condition::new("flu", "Flu").with_weight("fever", bad)];
            assert!(
                validate_conditions(&conditions).is_err(),
                "weight {bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_overflowing_weight_total_rejected() {
        let conditions = vec![Condition::new("big", "Big")
            .with_weight("a", 1e308)
            .with_weight("b", 1e308)];
        let err = validate_conditions(&conditions).unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_empty_red_flag_rejected() {
        let conditions = vec![Condition::new("flu", "Flu")
            .with_weight("fever", 1.0)
            .with_red_flag(&[], "Call 911")];
        assert!(validate_conditions(&conditions).is_err());
    }

    #[test]
    fn test_dangling_references_are_reported_not_fatal() {
        let symptoms = vec![Symptom::new("fever", "Fever", "INFECTIOUS")];
        let conditions = vec![Condition::new("flu", "Flu")
            .with_weight("fever", 50.0)
            .with_weight("cough", 30.0)
            .with_red_flag(&["chest_pain"], "Call 911")];

        let report = check_integrity(&symptoms, &conditions);
        assert_eq!(report.dangling_references.len(), 2);
        assert_eq!(
            report.dangling_references[0].location,
            ReferenceLocation::SymptomWeights
        );
        assert_eq!(report.dangling_references[0].symptom_id, SymptomId::new("cough"));
        assert_eq!(report.dangling_references[1].location, ReferenceLocation::RedFlags);
    }

    #[test]
    fn test_parse_error_names_table() {
        let data = embedded();
        let json = data.to_json().unwrap();
        let sources = DataSources {
            symptoms: "{ not json",
            conditions: &json,
            korean_products: &json,
            drug_interactions: &json,
            emergency_guide: &json,
            safety: &json,
        };
        let err = ReferenceData::from_sources(&sources).unwrap_err();
        assert!(err.to_string().contains(SYMPTOMS_FILE));
    }
}
