use clap::Args;

use crate::catalog::search::group_symptoms;
use crate::catalog::store::ReferenceData;
use crate::cli::{join, OutputFormat};
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct SymptomsArgs {
    /// Only show one category, by code or label (e.g. "GI" or "Digestive")
    #[arg(long)]
    pub category: Option<String>,
}

/// List symptoms grouped by category
///
/// # Errors
///
/// Returns an error if the category filter is invalid or matches nothing.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: SymptomsArgs,
    data: &ReferenceData,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    if let Some(category) = &args.category {
        validate_query(category)?;
    }

    let groups = group_symptoms(&data.symptoms, args.category.as_deref());
    if groups.is_empty() {
        if let Some(category) = &args.category {
            anyhow::bail!("No symptoms in category '{category}'");
        }
    }

    match format {
        OutputFormat::Text => {
            let total: usize = groups.iter().map(|g| g.symptoms.len()).sum();
            println!("Symptoms ({total})\n");
            for group in &groups {
                println!("{} [{}]", group.label, group.code);
                for s in &group.symptoms {
                    if s.display_name_ko.is_empty() {
                        println!("  {:<24} {}", s.id.as_str(), s.display_name_en);
                    } else {
                        println!(
                            "  {:<24} {} / {}",
                            s.id.as_str(),
                            s.display_name_en,
                            s.display_name_ko
                        );
                    }
                    if verbose && !s.synonyms_en.is_empty() {
                        println!("  {:<24} also: {}", "", join(&s.synonyms_en));
                    }
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        OutputFormat::Tsv => {
            println!("id\tname_en\tname_ko\tcategory\tsynonyms_en\tsynonyms_ko");
            for group in &groups {
                for s in &group.symptoms {
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        s.id,
                        s.display_name_en,
                        s.display_name_ko,
                        s.category,
                        s.synonyms_en.join(","),
                        s.synonyms_ko.join(",")
                    );
                }
            }
        }
    }

    Ok(())
}
