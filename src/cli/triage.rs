//! Triage command - rank likely conditions for a set of symptoms.

use clap::Args;

use crate::catalog::store::ReferenceData;
use crate::cli::{join, print_list, OutputFormat};
use crate::core::types::SymptomId;
use crate::matching::engine::{
    MatchResult, MatchingConfig, MatchingEngine, TriageReport, DEFAULT_MAX_RESULTS,
};
use crate::utils::validation::validate_symptom_tokens;

/// Arguments for the triage command
#[derive(Args)]
pub struct TriageArgs {
    /// Symptoms by id, English or Korean name, or synonym
    /// (e.g. fever "body aches" 기침)
    #[arg(required = true)]
    pub symptoms: Vec<String>,

    /// Maximum number of conditions to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_matches: usize,

    /// Only show conditions scoring above this (0-100)
    #[arg(long, default_value = "0")]
    pub min_score: f64,
}

/// Execute the triage command
///
/// # Errors
///
/// Returns an error if the symptom list breaks the input limits or output fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: TriageArgs,
    data: &ReferenceData,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    validate_symptom_tokens(&args.symptoms)?;

    let selection = data.resolve_selection(&args.symptoms);

    if verbose {
        eprintln!(
            "Resolved {} symptom(s), {} unrecognized",
            selection.resolved.len(),
            selection.unrecognized.len()
        );
    }

    let config = MatchingConfig {
        max_results: args.max_matches,
        min_score: args.min_score,
    };
    let engine = MatchingEngine::with_config(&data.conditions, config);
    let report = engine.triage(&selection.ids);

    match format {
        OutputFormat::Text => {
            print_text(data, &selection.resolved, &selection.unrecognized, &report, verbose);
        }
        OutputFormat::Json => {
            print_json(data, &selection.resolved, &selection.unrecognized, &report)?;
        }
        OutputFormat::Tsv => print_tsv(data, &report),
    }

    Ok(())
}

fn symptom_name<'a>(data: &'a ReferenceData, id: &'a SymptomId) -> &'a str {
    data.symptom(id)
        .map_or(id.as_str(), |s| s.display_name_en.as_str())
}

fn matched_names(data: &ReferenceData, m: &MatchResult<'_>) -> Vec<String> {
    m.score
        .matched_symptoms
        .iter()
        .map(|id| symptom_name(data, id).to_string())
        .collect()
}

fn print_text(
    data: &ReferenceData,
    resolved: &[SymptomId],
    unrecognized: &[String],
    report: &TriageReport<'_>,
    verbose: bool,
) {
    let names: Vec<String> = resolved
        .iter()
        .map(|id| symptom_name(data, id).to_string())
        .collect();
    let selected = if names.is_empty() {
        "(none)".to_string()
    } else {
        join(&names)
    };
    println!("Selected symptoms: {selected}");
    if !unrecognized.is_empty() {
        println!("Not recognized:    {}", join(unrecognized));
    }
    println!();

    if let Some(banner) = report.banner {
        println!("!!! URGENT: {banner}");
        println!();
    }

    if report.matches.is_empty() {
        println!("No matching conditions found.");
        println!("If you are concerned about your symptoms, contact a healthcare provider.");
    }

    for (i, m) in report.matches.iter().enumerate() {
        let c = m.condition;
        if c.name_ko.is_empty() {
            println!("#{} {}", i + 1, c.name_en);
        } else {
            println!("#{} {} ({})", i + 1, c.name_en, c.name_ko);
        }
        println!(
            "   Match:    {:.0}% ({} likelihood)",
            m.score.score, m.score.likelihood
        );
        println!("   Matched:  {}", join(&matched_names(data, m)));
        if verbose {
            println!(
                "   Weight:   {:.1} of {:.1}",
                m.score.matched_weight, m.score.max_possible
            );
        }
        if !c.description_en.is_empty() {
            println!("   {}", c.description_en);
        }

        if let Some(flag) = m.red_flag {
            println!("   Warning:  {flag}");
        }

        if !c.otc_options.is_empty() {
            println!("   OTC options:");
            for remedy in &c.otc_options {
                let mut line = format!("     - {}", remedy.category);
                if !remedy.brand_names.is_empty() {
                    line.push_str(&format!(": {}", join(&remedy.brand_names)));
                }
                if remedy.prescription_required {
                    line.push_str(" [Rx]");
                }
                println!("{line}");
                if !remedy.dosage.is_empty() {
                    println!("       Dosage: {}", remedy.dosage);
                }
                if verbose {
                    for warning in &remedy.warnings {
                        println!("       Caution: {warning}");
                    }
                }
            }
        }

        let care = &c.care_pathway;
        println!(
            "   Self-care: {}",
            if care.self_care_ok { "usually OK" } else { "see a clinician" }
        );
        if !care.when_seek_care.is_empty() {
            println!("   Seek care: {}", care.when_seek_care);
        }
        if verbose {
            print_list("   Urgent if", &care.urgent_if);
        }
        println!();
    }

    println!("{}", data.safety.disclaimer);
}

fn print_json(
    data: &ReferenceData,
    resolved: &[SymptomId],
    unrecognized: &[String],
    report: &TriageReport<'_>,
) -> anyhow::Result<()> {
    let matches: Vec<serde_json::Value> = report
        .matches
        .iter()
        .map(|m| {
            serde_json::json!({
                "condition": {
                    "id": m.condition.id.0,
                    "name_en": m.condition.name_en,
                    "name_ko": m.condition.name_ko,
                    "description_en": m.condition.description_en,
                },
                "score": m.score.score,
                "likelihood": m.score.likelihood,
                "matched_symptoms": m.score.matched_symptoms,
                "matched_weight": m.score.matched_weight,
                "max_possible": m.score.max_possible,
                "red_flag": m.red_flag,
                "otc_options": m.condition.otc_options,
                "care_pathway": m.condition.care_pathway,
            })
        })
        .collect();

    let output = serde_json::json!({
        "symptoms": resolved,
        "unrecognized": unrecognized,
        "banner": report.banner,
        "matches": matches,
        "disclaimer": data.safety.disclaimer,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(data: &ReferenceData, report: &TriageReport<'_>) {
    println!("rank\tcondition_id\tname\tscore\tlikelihood\tmatched_symptoms\tred_flag");
    for (i, m) in report.matches.iter().enumerate() {
        let matched: Vec<&str> = m
            .score
            .matched_symptoms
            .iter()
            .map(SymptomId::as_str)
            .collect();
        println!(
            "{}\t{}\t{}\t{:.1}\t{}\t{}\t{}",
            i + 1,
            m.condition.id,
            m.condition.name_en,
            m.score.score,
            m.score.likelihood,
            matched.join(","),
            m.red_flag.unwrap_or("")
        );
    }
    // Keep the disclaimer off stdout so the table stays machine-readable
    eprintln!("{}", data.safety.disclaimer);
}
