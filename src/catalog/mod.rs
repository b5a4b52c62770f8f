//! Reference data storage, indexing and search.
//!
//! All tables are bundled JSON compiled into the binary and validated at load
//! time. A custom data directory (or an exported bundle file) can replace them.
//!
//! ## Bundled Tables
//!
//! - **symptoms.json**: selectable symptoms with English/Korean names and synonyms
//! - **conditions.json**: conditions with symptom weights, red flags, OTC options
//! - **korean_products.json**: Korean-medicine products and US alternatives
//! - **drug_interactions.json**: dangerous, beneficial and supplement interactions
//! - **emergency_guide.json**: burns, cuts, contacts and warning signs
//! - **safety.json**: when to seek care, medication safety and the disclaimer
//!
//! ## Example
//!
//! ```rust,no_run
//! use medlink::ReferenceData;
//! use medlink::core::types::ConditionId;
//!
//! let data = ReferenceData::load_embedded().unwrap();
//!
//! for condition in &data.conditions {
//!     println!("{}", condition.id);
//! }
//!
//! let flu = data.condition(&ConditionId::new("influenza"));
//! ```
//!
//! ## Custom Data
//!
//! ```rust,no_run
//! use medlink::ReferenceData;
//! use std::path::Path;
//!
//! // Export to a single JSON bundle
//! let data = ReferenceData::load_embedded().unwrap();
//! let json = data.to_json().unwrap();
//!
//! // Load a directory of table files, or a bundle
//! let custom = ReferenceData::load_from_path(Path::new("my_data/")).unwrap();
//! ```

pub mod index;
pub mod search;
pub mod store;
