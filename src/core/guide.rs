//! Static first-aid and safety reference content.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::SafetySeverity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstDegreeBurn {
    pub description: String,
    pub treatment: Vec<String>,
    pub healing_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondDegreeBurn {
    pub description: String,
    pub treatment: Vec<String>,
    #[serde(default)]
    pub what_not_to_do: Vec<String>,
    pub healing_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdDegreeBurn {
    pub description: String,
    /// Single instruction, always an emergency call
    pub treatment: String,
    #[serde(default)]
    pub immediate_care: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnsGuide {
    pub first_degree: FirstDegreeBurn,
    pub second_degree: SecondDegreeBurn,
    pub third_degree: ThirdDegreeBurn,
    #[serde(default)]
    pub when_to_seek_medical_help: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstAidStep {
    pub step: u32,
    pub action: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FollowUpCare {
    #[serde(default)]
    pub daily_care: Vec<String>,
    #[serde(default)]
    pub signs_of_infection: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutsGuide {
    pub first_aid_steps: BTreeMap<String, FirstAidStep>,
    #[serde(default)]
    pub follow_up_care: FollowUpCare,
    #[serde(default)]
    pub when_to_seek_medical_help: Vec<String>,
    #[serde(default)]
    pub what_not_to_do: Vec<String>,
}

impl CutsGuide {
    /// First-aid steps in step-number order
    pub fn ordered_steps(&self) -> Vec<&FirstAidStep> {
        let mut steps: Vec<&FirstAidStep> = self.first_aid_steps.values().collect();
        steps.sort_by_key(|s| s.step);
        steps
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLine {
    pub number: String,
    #[serde(default)]
    pub when_to_call: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContacts {
    pub immediate_emergency: ContactLine,
    pub poison_control: ContactLine,
    pub nurse_hotline: ContactLine,
}

/// Warning signs and what to do about them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningSigns {
    pub signs: Vec<String>,
    #[serde(default)]
    pub immediate_action: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencySituations {
    pub heart_attack: WarningSigns,
    pub stroke: WarningSigns,
    pub severe_allergic_reaction: WarningSigns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEmergencies {
    pub overdose: WarningSigns,
}

/// The emergency and first-aid guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyGuide {
    pub burns: BurnsGuide,
    pub cuts_and_wounds: CutsGuide,
    pub emergency_contacts: EmergencyContacts,
    pub emergency_situations: EmergencySituations,
    pub medication_emergencies: MedicationEmergencies,
}

/// Sections of the emergency guide that can be shown on their own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GuideSection {
    Burns,
    Cuts,
    Contacts,
    Signs,
}

impl GuideSection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "burns" => Some(Self::Burns),
            "cuts" | "cuts_and_wounds" | "wounds" => Some(Self::Cuts),
            "contacts" => Some(Self::Contacts),
            "signs" => Some(Self::Signs),
            _ => None,
        }
    }
}

/// Warning signs for life-threatening situations, with the stroke check
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SignsView<'a> {
    pub emergency_situations: &'a EmergencySituations,
    pub medication_emergencies: &'a MedicationEmergencies,
    pub stroke_fast: &'static [(&'static str, &'static str)],
}

/// One section of the emergency guide
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum SectionView<'a> {
    Burns(&'a BurnsGuide),
    Cuts(&'a CutsGuide),
    Contacts(&'a EmergencyContacts),
    Signs(SignsView<'a>),
}

impl EmergencyGuide {
    pub fn section(&self, section: GuideSection) -> SectionView<'_> {
        match section {
            GuideSection::Burns => SectionView::Burns(&self.burns),
            GuideSection::Cuts => SectionView::Cuts(&self.cuts_and_wounds),
            GuideSection::Contacts => SectionView::Contacts(&self.emergency_contacts),
            GuideSection::Signs => SectionView::Signs(SignsView {
                emergency_situations: &self.emergency_situations,
                medication_emergencies: &self.medication_emergencies,
                stroke_fast: STROKE_FAST,
            }),
        }
    }
}

/// F.A.S.T. stroke check, shown with the emergency signs
pub const STROKE_FAST: &[(&str, &str)] = &[
    ("Face", "Smile appears uneven"),
    ("Arms", "Can't raise both arms"),
    ("Speech", "Slurred or strange words"),
    ("Time", "Call 911 immediately"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyContact {
    pub name: String,
    pub number: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySection {
    pub title: String,
    pub severity: SafetySeverity,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialNotice {
    pub title: String,
    pub text: String,
}

/// When to seek care, medication safety and the disclaimer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyGuidance {
    #[serde(default)]
    pub emergency_contacts: Vec<SafetyContact>,
    #[serde(default)]
    pub sections: Vec<SafetySection>,
    #[serde(default)]
    pub medication_safety_tips: Vec<String>,
    #[serde(default)]
    pub special_notices: Vec<SpecialNotice>,
    pub disclaimer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_section_parse() {
        assert_eq!(GuideSection::parse("Burns"), Some(GuideSection::Burns));
        assert_eq!(GuideSection::parse("wounds"), Some(GuideSection::Cuts));
        assert_eq!(GuideSection::parse("signs"), Some(GuideSection::Signs));
        assert_eq!(GuideSection::parse("dentistry"), None);
    }

    #[test]
    fn test_ordered_steps() {
        let step = |n: u32, action: &str| FirstAidStep {
            step: n,
            action: action.to_string(),
            instructions: Vec::new(),
        };
        let mut first_aid_steps = BTreeMap::new();
        // Keys sort alphabetically in the opposite order of the step numbers
        first_aid_steps.insert("a_protect".to_string(), step(3, "Protect"));
        first_aid_steps.insert("b_clean".to_string(), step(2, "Clean"));
        first_aid_steps.insert("c_stop".to_string(), step(1, "Stop"));
        let guide = CutsGuide {
            first_aid_steps,
            follow_up_care: FollowUpCare::default(),
            when_to_seek_medical_help: Vec::new(),
            what_not_to_do: Vec::new(),
        };
        let actions: Vec<&str> = guide
            .ordered_steps()
            .iter()
            .map(|s| s.action.as_str())
            .collect();
        assert_eq!(actions, vec!["Stop", "Clean", "Protect"]);
    }

    #[test]
    fn test_signs_section_serializes_stroke_check() {
        let data = crate::catalog::store::ReferenceData::load_embedded().unwrap();
        let value = serde_json::to_value(data.emergency.section(GuideSection::Signs)).unwrap();
        assert!(value["emergency_situations"]["stroke"]["signs"].is_array());
        assert_eq!(value["stroke_fast"][0][0], "Face");

        let value = serde_json::to_value(data.emergency.section(GuideSection::Contacts)).unwrap();
        assert!(value["poison_control"]["number"].is_string());
    }
}
