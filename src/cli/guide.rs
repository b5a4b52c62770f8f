//! Emergency guide and safety guidance commands.

use clap::Args;

use crate::catalog::store::ReferenceData;
use crate::cli::{print_list, OutputFormat};
use crate::core::guide::{
    BurnsGuide, ContactLine, CutsGuide, EmergencyGuide, GuideSection, SafetyGuidance,
    WarningSigns, STROKE_FAST,
};
use crate::core::types::SafetySeverity;

#[derive(Args)]
pub struct EmergencyArgs {
    /// Show one section only
    #[arg(value_enum)]
    pub section: Option<GuideSection>,
}

/// Show the emergency guide, or one section of it
///
/// # Errors
///
/// Returns an error if output fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run_emergency(
    args: EmergencyArgs,
    data: &ReferenceData,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let guide = &data.emergency;
    let sections: Vec<GuideSection> = match args.section {
        Some(section) => vec![section],
        None => vec![
            GuideSection::Contacts,
            GuideSection::Signs,
            GuideSection::Burns,
            GuideSection::Cuts,
        ],
    };

    match format {
        OutputFormat::Text => {
            println!("IN AN EMERGENCY, CALL 911\n");
            for section in sections {
                print_section(guide, section);
            }
        }
        OutputFormat::Json => {
            let output = match args.section {
                Some(section) => serde_json::to_value(guide.section(section))?,
                None => serde_json::to_value(guide)?,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("section\titem");
            for section in sections {
                let key = serde_json::to_value(section)?;
                let key = key.as_str().unwrap_or_default();
                for item in section_items(guide, section) {
                    println!("{key}\t{item}");
                }
            }
        }
    }
    Ok(())
}

fn print_section(guide: &EmergencyGuide, section: GuideSection) {
    match section {
        GuideSection::Burns => print_burns(&guide.burns),
        GuideSection::Cuts => print_cuts(&guide.cuts_and_wounds),
        GuideSection::Contacts => {
            println!("== Emergency Contacts ==");
            let contacts = &guide.emergency_contacts;
            print_contact("Emergency", &contacts.immediate_emergency);
            print_contact("Poison control", &contacts.poison_control);
            print_contact("Nurse hotline", &contacts.nurse_hotline);
            println!();
        }
        GuideSection::Signs => {
            println!("== Warning Signs ==");
            let situations = &guide.emergency_situations;
            print_signs("Heart attack", &situations.heart_attack);
            print_signs("Stroke", &situations.stroke);
            println!("  Stroke check (F.A.S.T.):");
            for (letter, check) in STROKE_FAST {
                println!("    {letter}: {check}");
            }
            print_signs(
                "Severe allergic reaction",
                &situations.severe_allergic_reaction,
            );
            print_signs("Overdose", &guide.medication_emergencies.overdose);
            println!();
        }
    }
}

fn print_contact(label: &str, line: &ContactLine) {
    println!("{label}: {}", line.number);
    for when in &line.when_to_call {
        println!("  - {when}");
    }
}

fn print_signs(label: &str, signs: &WarningSigns) {
    println!("{label}:");
    for sign in &signs.signs {
        println!("  - {sign}");
    }
    print_list("  Do now", &signs.immediate_action);
}

fn print_burns(burns: &BurnsGuide) {
    println!("== Burns ==");
    println!("First degree: {}", burns.first_degree.description);
    print_list("  Treatment", &burns.first_degree.treatment);
    println!("  Heals in: {}", burns.first_degree.healing_time);

    println!("Second degree: {}", burns.second_degree.description);
    print_list("  Treatment", &burns.second_degree.treatment);
    print_list("  Do not", &burns.second_degree.what_not_to_do);
    println!("  Heals in: {}", burns.second_degree.healing_time);

    println!("Third degree: {}", burns.third_degree.description);
    println!("  {}", burns.third_degree.treatment);
    print_list("  While waiting", &burns.third_degree.immediate_care);

    print_list("Seek medical help if", &burns.when_to_seek_medical_help);
    println!();
}

fn print_cuts(cuts: &CutsGuide) {
    println!("== Cuts and Wounds ==");
    for step in cuts.ordered_steps() {
        println!("{}. {}", step.step, step.action);
        for instruction in &step.instructions {
            println!("   - {instruction}");
        }
    }
    print_list("Daily care", &cuts.follow_up_care.daily_care);
    print_list("Signs of infection", &cuts.follow_up_care.signs_of_infection);
    print_list("Seek medical help if", &cuts.when_to_seek_medical_help);
    print_list("Do not", &cuts.what_not_to_do);
    println!();
}

/// Flattened one-line items of a section, for TSV output
fn section_items(guide: &EmergencyGuide, section: GuideSection) -> Vec<String> {
    match section {
        GuideSection::Burns => {
            let b = &guide.burns;
            let mut items = vec![
                format!("first_degree: {}", b.first_degree.description),
                format!("second_degree: {}", b.second_degree.description),
                format!("third_degree: {}", b.third_degree.treatment),
            ];
            items.extend(b.when_to_seek_medical_help.iter().cloned());
            items
        }
        GuideSection::Cuts => guide
            .cuts_and_wounds
            .ordered_steps()
            .iter()
            .map(|s| format!("{}. {}", s.step, s.action))
            .collect(),
        GuideSection::Contacts => {
            let c = &guide.emergency_contacts;
            vec![
                format!("emergency: {}", c.immediate_emergency.number),
                format!("poison_control: {}", c.poison_control.number),
                format!("nurse_hotline: {}", c.nurse_hotline.number),
            ]
        }
        GuideSection::Signs => {
            let s = &guide.emergency_situations;
            [
                ("heart_attack", &s.heart_attack),
                ("stroke", &s.stroke),
                ("severe_allergic_reaction", &s.severe_allergic_reaction),
                ("overdose", &guide.medication_emergencies.overdose),
            ]
            .into_iter()
            .flat_map(|(name, w)| w.signs.iter().map(move |sign| format!("{name}: {sign}")))
            .collect()
        }
    }
}

/// Show safety guidance
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_safety(data: &ReferenceData, format: OutputFormat) -> anyhow::Result<()> {
    let safety: &SafetyGuidance = &data.safety;

    match format {
        OutputFormat::Text => {
            println!("Safety Guidance\n");
            for contact in &safety.emergency_contacts {
                println!("{:<16} {:<16} {}", contact.name, contact.number, contact.description);
            }
            println!();

            for section in &safety.sections {
                let marker = match section.severity {
                    SafetySeverity::Emergency => "!!!",
                    SafetySeverity::Urgent => "!!",
                    SafetySeverity::Caution => "!",
                };
                println!("{marker} {}", section.title);
                for item in &section.items {
                    println!("  - {item}");
                }
                println!();
            }

            print_list("Medication safety", &safety.medication_safety_tips);
            for notice in &safety.special_notices {
                println!("\n{}: {}", notice.title, notice.text);
            }
            println!("\n{}", safety.disclaimer);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(safety)?);
        }
        OutputFormat::Tsv => {
            println!("section\tseverity\titem");
            for section in &safety.sections {
                let severity = serde_json::to_value(section.severity)?;
                for item in &section.items {
                    println!(
                        "{}\t{}\t{item}",
                        section.title,
                        severity.as_str().unwrap_or_default()
                    );
                }
            }
        }
    }
    Ok(())
}
