use clap::Args;

use crate::catalog::search::search_products;
use crate::catalog::store::ReferenceData;
use crate::cli::{join, print_list, OutputFormat};
use crate::core::product::KoreanProduct;
use crate::utils::validation::validate_query;

#[derive(Args)]
pub struct KoreanArgs {
    /// Search by Korean or English name, category or ingredient
    pub query: Option<String>,

    /// Show one product by ID
    #[arg(long, conflicts_with = "query")]
    pub id: Option<String>,
}

/// Search Korean-medicine products or show one in detail
///
/// # Errors
///
/// Returns an error if the query is invalid, the product is not found, or output fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: KoreanArgs, data: &ReferenceData, format: OutputFormat) -> anyhow::Result<()> {
    if let Some(id) = &args.id {
        let product = data
            .korean_product(id)
            .ok_or_else(|| anyhow::anyhow!("Korean product '{id}' not found"))?;
        return show_product(product, format);
    }

    let query = args.query.as_deref().unwrap_or("");
    validate_query(query)?;
    let products = search_products(&data.korean_products, query);

    match format {
        OutputFormat::Text => {
            if query.is_empty() {
                println!("Korean medicine products ({})\n", products.len());
            } else {
                println!("Products matching '{query}' ({})\n", products.len());
            }
            if products.is_empty() {
                println!("No products found.");
            }
            for p in &products {
                println!("{:<14} {} ({})", p.id, p.name_ko, p.name_en);
                println!("{:<14} {} | US: {}", "", p.category, p.us_status.availability);
                if let Some(best) = p.us_alternatives.iter().max_by_key(|a| a.similarity) {
                    println!(
                        "{:<14} Try: {} ({} similarity)",
                        "",
                        join(&best.brands),
                        best.similarity
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        OutputFormat::Tsv => {
            println!(
                "id\tname_ko\tname_en\tcategory\t\
                 active_ingredients\tus_availability\tbest_similarity"
            );
            for p in &products {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    p.id,
                    p.name_ko,
                    p.name_en,
                    p.category,
                    p.active_ingredients.join(","),
                    p.us_status.availability,
                    p.best_similarity().map(|s| s.to_string()).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn show_product(product: &KoreanProduct, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} ({})\n", product.name_ko, product.name_en);
            println!("ID:          {}", product.id);
            println!("Category:    {}", product.category);
            println!("Ingredients: {}", join(&product.active_ingredients));
            println!(
                "US status:   {} - {}",
                product.us_status.availability, product.us_status.note
            );

            if !product.us_alternatives.is_empty() {
                println!("\nUS alternatives:");
                for alt in &product.us_alternatives {
                    println!("  {} ({} similarity)", join(&alt.brands), alt.similarity);
                    if !alt.active_ingredients.is_empty() {
                        println!("    Ingredients: {}", join(&alt.active_ingredients));
                    }
                    if !alt.price_range.is_empty() {
                        println!("    Price:       {}", alt.price_range);
                    }
                    if alt.rx_required {
                        println!("    Prescription required");
                    }
                }
            }

            if !product.cautions.is_empty() {
                println!();
                print_list("Cautions", &product.cautions);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(product)?);
        }
        OutputFormat::Tsv => {
            println!("brands\tactive_ingredients\tprice_range\trx_required\tsimilarity");
            for alt in &product.us_alternatives {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    alt.brands.join(","),
                    alt.active_ingredients.join(","),
                    alt.price_range,
                    alt.rx_required,
                    alt.similarity
                );
            }
        }
    }
    Ok(())
}
