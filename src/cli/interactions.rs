use clap::Args;

use crate::catalog::search::{
    dangerous_by_severity, search_interactions, InteractionCategory, InteractionHits,
};
use crate::catalog::store::ReferenceData;
use crate::cli::{join, print_list, OutputFormat};
use crate::core::interaction::{
    humanize, BeneficialCombination, DangerousCombination, DrugInteractions,
    SupplementInteraction,
};
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct InteractionsArgs {
    /// Show one category in full
    #[arg(long, value_enum)]
    pub category: Option<InteractionCategory>,

    /// Search combinations, mechanisms and recommendations
    #[arg(long)]
    pub search: Option<String>,
}

/// Browse or search the interaction tables
///
/// # Errors
///
/// Returns an error if the search query is invalid or output fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: InteractionsArgs,
    data: &ReferenceData,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let interactions = &data.interactions;

    if let Some(query) = &args.search {
        validate_query(query)?;
        let mut hits = search_interactions(interactions, query);
        if let Some(category) = args.category {
            keep_only(&mut hits, category);
        }
        return print_hits(query, &hits, format);
    }

    match args.category {
        Some(category) => print_category(interactions, category, format),
        None => print_overview(interactions, format),
    }
}

fn keep_only(hits: &mut InteractionHits<'_>, category: InteractionCategory) {
    if category != InteractionCategory::Dangerous {
        hits.dangerous.clear();
    }
    if category != InteractionCategory::Beneficial {
        hits.beneficial.clear();
    }
    if category != InteractionCategory::Supplements {
        hits.supplements.clear();
    }
}

fn print_overview(interactions: &DrugInteractions, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Drug Interactions\n");
            for category in InteractionCategory::ALL {
                println!("  {:<26} {:>3}", category.title(), category.count(interactions));
            }
            println!("\nUse --category <name> for details or --search <term> to search.\n");
            print_list("Quick safety tips", &interactions.quick_safety_tips);
        }
        OutputFormat::Json => {
            let categories: Vec<serde_json::Value> = InteractionCategory::ALL
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "category": c,
                        "title": c.title(),
                        "count": c.count(interactions),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "categories": categories,
                "quick_safety_tips": interactions.quick_safety_tips,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("category\ttitle\tcount");
            for category in InteractionCategory::ALL {
                let key = serde_json::to_value(category)?;
                println!(
                    "{}\t{}\t{}",
                    key.as_str().unwrap_or_default(),
                    category.title(),
                    category.count(interactions)
                );
            }
        }
    }
    Ok(())
}

fn print_category(
    interactions: &DrugInteractions,
    category: InteractionCategory,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}\n", category.title());
            match category {
                InteractionCategory::Dangerous => {
                    for d in dangerous_by_severity(interactions) {
                        print_dangerous(d);
                    }
                }
                InteractionCategory::Beneficial => {
                    for b in &interactions.beneficial_combinations {
                        print_beneficial(b);
                    }
                }
                InteractionCategory::Supplements => {
                    for s in &interactions.supplement_interactions {
                        print_supplement(s);
                    }
                }
                InteractionCategory::Timing => {
                    for (slot, medications) in &interactions.timing_guidelines {
                        println!("{}: {}", humanize(slot), join(medications));
                    }
                    println!();
                    print_list("Tips", &interactions.general_timing_tips);
                }
            }
        }
        OutputFormat::Json => {
            let output = match category {
                InteractionCategory::Dangerous => {
                    serde_json::to_value(dangerous_by_severity(interactions))?
                }
                InteractionCategory::Beneficial => {
                    serde_json::to_value(&interactions.beneficial_combinations)?
                }
                InteractionCategory::Supplements => {
                    serde_json::to_value(&interactions.supplement_interactions)?
                }
                InteractionCategory::Timing => serde_json::json!({
                    "timing_guidelines": interactions.timing_guidelines,
                    "general_timing_tips": interactions.general_timing_tips,
                }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => match category {
            InteractionCategory::Dangerous => {
                println!("id\tcombination\tseverity\trecommendation");
                for d in dangerous_by_severity(interactions) {
                    println!(
                        "{}\t{}\t{}\t{}",
                        d.id,
                        d.combination.join(" + "),
                        d.severity,
                        d.recommendation
                    );
                }
            }
            InteractionCategory::Beneficial => {
                println!("id\tcombination\tbenefit\trecommendation");
                for b in &interactions.beneficial_combinations {
                    println!(
                        "{}\t{}\t{}\t{}",
                        b.id,
                        b.combination.join(" + "),
                        b.benefit,
                        b.recommendation
                    );
                }
            }
            InteractionCategory::Supplements => {
                println!("id\tcombination\teffect\trecommendation");
                for s in &interactions.supplement_interactions {
                    println!(
                        "{}\t{}\t{}\t{}",
                        s.id,
                        s.combination.join(" + "),
                        s.effect,
                        s.recommendation
                    );
                }
            }
            InteractionCategory::Timing => {
                println!("slot\tmedications");
                for (slot, medications) in &interactions.timing_guidelines {
                    println!("{slot}\t{}", medications.join(","));
                }
            }
        },
    }
    Ok(())
}

fn print_hits(query: &str, hits: &InteractionHits<'_>, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Interactions matching '{query}' ({})\n", hits.len());
            if hits.is_empty() {
                println!("No interactions found.");
            }
            for d in &hits.dangerous {
                print_dangerous(d);
            }
            for b in &hits.beneficial {
                print_beneficial(b);
            }
            for s in &hits.supplements {
                print_supplement(s);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(hits)?);
        }
        OutputFormat::Tsv => {
            println!("category\tid\tcombination");
            for d in &hits.dangerous {
                println!("dangerous\t{}\t{}", d.id, d.combination.join(" + "));
            }
            for b in &hits.beneficial {
                println!("beneficial\t{}\t{}", b.id, b.combination.join(" + "));
            }
            for s in &hits.supplements {
                println!("supplements\t{}\t{}", s.id, s.combination.join(" + "));
            }
        }
    }
    Ok(())
}

fn print_dangerous(d: &DangerousCombination) {
    println!("[{}] {}", d.severity, d.combination.join(" + "));
    println!("  Why:  {}", d.mechanism);
    println!("  Do:   {}", d.recommendation);
    if let Some(warning) = &d.warning {
        println!("  Note: {warning}");
    }
    if let Some(meds) = &d.affected_medications {
        println!("  Includes: {}", join(meds));
    }
    println!();
}

fn print_beneficial(b: &BeneficialCombination) {
    println!("[GOOD] {}", b.combination.join(" + "));
    println!("  Benefit: {}", b.benefit);
    println!("  Do:      {}", b.recommendation);
    println!();
}

fn print_supplement(s: &SupplementInteraction) {
    println!("[{}] {}", s.interaction.to_uppercase(), s.combination.join(" + "));
    println!("  Effect: {}", s.effect);
    println!("  Do:     {}", s.recommendation);
    if let Some(timing) = &s.timing {
        println!("  Timing: {timing}");
    }
    println!();
}
