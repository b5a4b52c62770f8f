//! Command-line interface for medlink.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **triage**: Rank likely conditions for a set of symptoms
//! - **symptoms**: List selectable symptoms by category
//! - **conditions**: List conditions or show one in detail
//! - **korean**: Look up Korean-medicine products and US alternatives
//! - **interactions**: Browse or search drug interactions
//! - **emergency**: Show the emergency and first-aid guide
//! - **safety**: Show when to seek care and medication safety tips
//! - **data**: Validate or export the reference data
//! - **serve**: Start the web API
//!
//! ## Usage
//!
//! ```text
//! # Rank conditions for some symptoms
//! medlink triage fever "body aches" chills
//!
//! # Korean names and synonyms work too
//! medlink triage 발열 기침
//!
//! # JSON output for scripting
//! medlink triage fever cough --format json
//!
//! # Use a custom data directory
//! MEDLINK_DATA_DIR=./my_data medlink conditions list
//!
//! # Start the web API
//! medlink serve --port 8080 --open
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::catalog::store::ReferenceData;

pub mod conditions;
pub mod data;
pub mod guide;
pub mod interactions;
pub mod korean;
pub mod symptoms;
pub mod triage;

#[derive(Parser)]
#[command(name = "medlink")]
#[command(author = "MedLink Contributors")]
#[command(version)]
#[command(about = "Match symptoms to likely conditions and OTC options")]
#[command(
    long_about = "medlink helps you make sense of common symptoms.\n\nIt matches the symptoms you select against a table of common conditions and provides:\n- The most likely conditions with a match score\n- Over-the-counter options and when to seek care\n- Urgent-care warnings when a red-flag symptom is present\n\nThis is not medical advice. Call 911 in an emergency."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Directory of reference data tables, or an exported bundle file
    #[arg(long, global = true, env = "MEDLINK_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank likely conditions for the given symptoms
    Triage(triage::TriageArgs),

    /// List selectable symptoms
    Symptoms(symptoms::SymptomsArgs),

    /// Browse conditions
    Conditions(conditions::ConditionsArgs),

    /// Look up Korean-medicine products
    Korean(korean::KoreanArgs),

    /// Browse or search drug interactions
    Interactions(interactions::InteractionsArgs),

    /// Show the emergency and first-aid guide
    Emergency(guide::EmergencyArgs),

    /// Show safety guidance
    Safety,

    /// Validate or export the reference data
    Data(data::DataArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load reference data from `data_dir`, or the bundled tables if none was given
///
/// # Errors
///
/// Returns an error if the data cannot be read, parsed or validated.
pub fn load_data(data_dir: Option<&Path>, verbose: bool) -> anyhow::Result<ReferenceData> {
    let data = match data_dir {
        Some(path) => ReferenceData::load_from_path(path)
            .map_err(|e| anyhow::anyhow!("Failed to load data from {}: {e}", path.display()))?,
        None => ReferenceData::load_embedded()?,
    };

    if verbose {
        eprintln!(
            "Loaded {} symptoms, {} conditions, {} Korean products",
            data.symptoms.len(),
            data.conditions.len(),
            data.korean_products.len()
        );
    }

    Ok(data)
}

/// Join a list for single-line display
pub(crate) fn join(items: &[String]) -> String {
    items.join(", ")
}

/// Print a bulleted list under a heading, skipping empty lists
pub(crate) fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("{heading}:");
    for item in items {
        println!("  - {item}");
    }
}

/// Character-safe truncation with an ellipsis
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer name", 8), "a lon...");
        // Multi-byte characters are never split
        assert_eq!(truncate("판콜에이 감기약", 6), "판콜에...");
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["medlink", "triage", "fever", "-f", "json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Triage(_)));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
