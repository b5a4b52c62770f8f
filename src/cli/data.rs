use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::catalog::store::ReferenceData;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Check the loaded data and report integrity warnings
    Validate {
        /// Fail if there are any integrity warnings
        #[arg(long)]
        strict: bool,
    },

    /// Export the loaded data to a single JSON bundle
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

/// Execute the data command
///
/// # Errors
///
/// Returns an error if strict validation finds warnings or the export cannot be written.
pub fn run(args: DataArgs, data: &ReferenceData, format: OutputFormat) -> anyhow::Result<()> {
    match args.command {
        DataCommands::Validate { strict } => run_validate(data, strict, format),
        DataCommands::Export { output } => run_export(&output, data),
    }
}

fn run_validate(data: &ReferenceData, strict: bool, format: OutputFormat) -> anyhow::Result<()> {
    let report = data.integrity();

    match format {
        OutputFormat::Text => {
            println!("Reference data");
            println!("  Symptoms:        {}", data.symptoms.len());
            println!("  Conditions:      {}", data.conditions.len());
            println!("  Korean products: {}", data.korean_products.len());
            println!(
                "  Interactions:    {} dangerous, {} beneficial, {} supplement",
                data.interactions.dangerous_combinations.len(),
                data.interactions.beneficial_combinations.len(),
                data.interactions.supplement_interactions.len()
            );
            println!();

            if report.is_clean() {
                println!("OK: no integrity warnings");
            } else {
                println!("{} integrity warning(s):", report.dangling_references.len());
                for d in &report.dangling_references {
                    let location = serde_json::to_value(d.location)?;
                    println!(
                        "  {}: unknown symptom '{}' in {}",
                        d.condition_id,
                        d.symptom_id,
                        location.as_str().unwrap_or_default()
                    );
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "symptoms": data.symptoms.len(),
                "conditions": data.conditions.len(),
                "korean_products": data.korean_products.len(),
                "clean": report.is_clean(),
                "integrity": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("condition_id\tsymptom_id\tlocation");
            for d in &report.dangling_references {
                let location = serde_json::to_value(d.location)?;
                println!(
                    "{}\t{}\t{}",
                    d.condition_id,
                    d.symptom_id,
                    location.as_str().unwrap_or_default()
                );
            }
        }
    }

    if strict && !report.is_clean() {
        anyhow::bail!(
            "Validation failed: {} integrity warning(s)",
            report.dangling_references.len()
        );
    }

    Ok(())
}

fn run_export(output: &Path, data: &ReferenceData) -> anyhow::Result<()> {
    let json = data.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} symptoms and {} conditions to {}",
        data.symptoms.len(),
        data.conditions.len(),
        output.display()
    );

    Ok(())
}
