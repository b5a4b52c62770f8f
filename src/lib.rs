//! # medlink
//!
//! A library for matching self-reported symptoms to likely common conditions.
//!
//! Users pick symptoms from a fixed catalog. Each condition carries a weighted
//! symptom profile; `medlink` scores how much of each profile the selection
//! covers, ranks the best matches, and raises an urgent-care banner when a
//! red-flag symptom is present. Reference tables for OTC remedies, Korean-medicine
//! products, drug interactions, first aid and safety guidance ride along.
//!
//! This is not a diagnostic tool.
//!
//! ## Features
//!
//! - **Weighted matching**: Percentage of a condition's symptom weight covered by the selection
//! - **Stable ranking**: Top 3 by score, ties in catalog order, zero scores dropped
//! - **Red flags**: First matching rule per condition; first flag among results becomes a banner
//! - **Bilingual lookup**: Symptoms resolve by id, English or Korean name, or synonym
//! - **Validated data**: Bundled JSON checked at build time and again at load
//!
//! ## Example
//!
//! ```rust,no_run
//! use medlink::{MatchingEngine, ReferenceData};
//!
//! // Load the bundled reference data
//! let data = ReferenceData::load_embedded().unwrap();
//!
//! // Resolve free-text symptoms
//! let selection = data.resolve_selection(&["fever", "기침", "body aches"]);
//!
//! // Rank conditions
//! let engine = MatchingEngine::new(&data.conditions);
//! let report = engine.triage(&selection.ids);
//!
//! for m in &report.matches {
//!     println!("{}: {:.0}%", m.condition.name_en, m.score.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference data storage, indexing and search
//! - [`core`]: Core data types for symptoms, conditions and reference tables
//! - [`matching`]: Matching engine and scoring
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON web API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{CatalogError, ReferenceData};
pub use core::condition::Condition;
pub use core::symptom::Symptom;
pub use core::types::*;
pub use matching::engine::{MatchResult, MatchingConfig, MatchingEngine, TriageReport};
