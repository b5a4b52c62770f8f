use clap::{Args, Subcommand};

use crate::catalog::store::ReferenceData;
use crate::cli::{join, print_list, truncate, OutputFormat};
use crate::core::types::ConditionId;

#[derive(Args)]
pub struct ConditionsArgs {
    #[command(subcommand)]
    pub command: ConditionsCommands,
}

#[derive(Subcommand)]
pub enum ConditionsCommands {
    /// List all conditions
    List,

    /// Show details of a specific condition
    Show {
        /// Condition ID (e.g. "influenza")
        #[arg(required = true)]
        id: String,
    },
}

/// Execute the conditions command
///
/// # Errors
///
/// Returns an error if the condition is not found or output fails.
pub fn run(
    args: ConditionsArgs,
    data: &ReferenceData,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match args.command {
        ConditionsCommands::List => run_list(data, format, verbose),
        ConditionsCommands::Show { id } => run_show(&id, data, format),
    }
}

fn run_list(data: &ReferenceData, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let conditions = &data.conditions;

    match format {
        OutputFormat::Text => {
            let id_width = conditions
                .iter()
                .map(|c| c.id.0.len())
                .max()
                .unwrap_or(2)
                .max(2);
            let name_width = conditions
                .iter()
                .map(|c| c.name_en.chars().count().min(35))
                .max()
                .unwrap_or(4)
                .max(4);

            println!("Conditions ({})\n", conditions.len());
            println!(
                "{:<id_w$} {:<name_w$} {:>8} {:>9}",
                "ID",
                "Name",
                "Symptoms",
                "Red flags",
                id_w = id_width,
                name_w = name_width,
            );
            println!("{}", "-".repeat(id_width + name_width + 20));

            for c in conditions {
                println!(
                    "{:<id_w$} {:<name_w$} {:>8} {:>9}",
                    c.id.0,
                    truncate(&c.name_en, name_width),
                    c.symptom_weights.len(),
                    c.exclusion_red_flags.len(),
                    id_w = id_width,
                    name_w = name_width,
                );
                if verbose && !c.name_ko.is_empty() {
                    println!("  └─ {}", c.name_ko);
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = conditions
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "id": c.id.0,
                        "name_en": c.name_en,
                        "name_ko": c.name_ko,
                        "category": c.category,
                        "symptom_count": c.symptom_weights.len(),
                        "red_flag_count": c.exclusion_red_flags.len(),
                        "self_care_ok": c.care_pathway.self_care_ok,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname_en\tname_ko\tsymptom_count\tred_flag_count\tself_care_ok");
            for c in conditions {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    c.id,
                    c.name_en,
                    c.name_ko,
                    c.symptom_weights.len(),
                    c.exclusion_red_flags.len(),
                    c.care_pathway.self_care_ok
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, data: &ReferenceData, format: OutputFormat) -> anyhow::Result<()> {
    let condition = data
        .condition(&ConditionId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Condition '{id}' not found"))?;

    match format {
        OutputFormat::Text => {
            println!("Condition: {}\n", condition.name_en);
            println!("ID:       {}", condition.id);
            if !condition.name_ko.is_empty() {
                println!("Korean:   {}", condition.name_ko);
            }
            if let Some(category) = &condition.category {
                println!("Category: {category}");
            }
            if !condition.description_en.is_empty() {
                println!("\n{}", condition.description_en);
            }

            println!("\nSymptom weights:");
            for w in &condition.symptom_weights {
                let name = data
                    .symptom(&w.symptom_id)
                    .map_or(w.symptom_id.as_str(), |s| s.display_name_en.as_str());
                println!("  {:<28} {:>6.1}", name, w.weight);
            }

            if !condition.exclusion_red_flags.is_empty() {
                println!("\nRed flags:");
                for rule in &condition.exclusion_red_flags {
                    let ids: Vec<String> =
                        rule.if_symptoms_any.iter().map(ToString::to_string).collect();
                    println!("  If any of [{}]:", join(&ids));
                    println!("    {}", rule.recommendation);
                }
            }

            if !condition.otc_options.is_empty() {
                println!("\nOTC options:");
                for remedy in &condition.otc_options {
                    println!("  {}", remedy.category);
                    if let Some(goal) = &remedy.goal {
                        println!("    Goal:        {goal}");
                    }
                    if !remedy.brand_names.is_empty() {
                        println!("    Brands:      {}", join(&remedy.brand_names));
                    }
                    if !remedy.active_ingredients.is_empty() {
                        println!("    Ingredients: {}", join(&remedy.active_ingredients));
                    }
                    println!("    Dosage:      {}", remedy.dosage);
                    if !remedy.price_range.is_empty() {
                        println!("    Price:       {}", remedy.price_range);
                    }
                    if remedy.prescription_required {
                        println!("    Prescription required");
                    }
                    for warning in &remedy.warnings {
                        println!("    Caution:     {warning}");
                    }
                }
            }

            let care = &condition.care_pathway;
            println!("\nCare pathway:");
            println!(
                "  Self-care OK: {}",
                if care.self_care_ok { "yes" } else { "no" }
            );
            if !care.when_seek_care.is_empty() {
                println!("  Seek care:    {}", care.when_seek_care);
            }
            if !care.followup.is_empty() {
                println!("  Follow-up:    {}", care.followup);
            }
            print_list("  Urgent if", &care.urgent_if);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(condition)?);
        }
        OutputFormat::Tsv => {
            println!("symptom_id\tweight");
            for w in &condition.symptom_weights {
                println!("{}\t{}", w.symptom_id, w.weight);
            }
        }
    }

    Ok(())
}
