//! Condition matching engine and scoring.
//!
//! - [`MatchingEngine`](engine::MatchingEngine): ranks every condition against a symptom selection
//! - [`MatchScore`](scoring::MatchScore): weighted coverage of a condition's symptom profile
//!
//! ## Scoring
//!
//! A condition's score is the sum of weights of its selected symptoms divided by
//! the sum of all its weights, times 100. Conditions with an empty profile score 0.
//!
//! ## Ranking
//!
//! 1. Score every condition and drop those scoring 0
//! 2. Stable sort by score, descending (ties keep catalog order)
//! 3. Keep the top 3
//! 4. The first red-flag recommendation in that list becomes the banner
//!
//! ## Example
//!
//! ```rust,no_run
//! use medlink::{MatchingEngine, ReferenceData};
//!
//! let data = ReferenceData::load_embedded().unwrap();
//! let selection = data.resolve_selection(&["fever", "body aches", "chills"]);
//!
//! let engine = MatchingEngine::new(&data.conditions);
//! let report = engine.triage(&selection.ids);
//!
//! for m in &report.matches {
//!     println!("{}: {:.0}% ({})", m.condition.name_en, m.score.score, m.score.likelihood);
//! }
//! if let Some(banner) = report.banner {
//!     println!("{banner}");
//! }
//! ```

pub mod engine;
pub mod scoring;
