//! Core data types for symptom triage and the OTC reference tables.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Symptom`]: A user-selectable complaint with English/Korean names and synonyms
//! - [`Condition`]: A candidate ailment with its symptom-weight profile, red-flag
//!   rules, OTC remedies and care pathway
//! - [`KoreanProduct`]: A Korean-medicine product mapped to US alternatives
//! - [`DrugInteractions`]: Dangerous, beneficial and supplement interaction tables
//! - [`EmergencyGuide`], [`SafetyGuidance`]: Static first-aid and safety content
//! - [`SymptomId`], [`ConditionId`], [`Likelihood`]: Identifier and result types
//!
//! ## Symptom Categories
//!
//! Symptoms carry a short category code that is shown with an English label:
//!
//! | Code | Label |
//! |------|-------|
//! | RESP | Respiratory |
//! | ENT  | Ear, Nose & Throat |
//! | GI   | Digestive |
//! | MSK  | Muscle & Joint |
//!
//! [`Symptom`]: symptom::Symptom
//! [`Condition`]: condition::Condition
//! [`KoreanProduct`]: product::KoreanProduct
//! [`DrugInteractions`]: interaction::DrugInteractions
//! [`EmergencyGuide`]: guide::EmergencyGuide
//! [`SafetyGuidance`]: guide::SafetyGuidance
//! [`SymptomId`]: types::SymptomId
//! [`ConditionId`]: types::ConditionId
//! [`Likelihood`]: types::Likelihood

pub mod condition;
pub mod guide;
pub mod interaction;
pub mod product;
pub mod symptom;
pub mod types;
