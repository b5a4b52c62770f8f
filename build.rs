use std::collections::HashSet;
use std::path::Path;

const DATA_FILES: &[(&str, &str)] = &[
    ("data/symptoms.json", "symptoms"),
    ("data/conditions.json", "conditions"),
    ("data/korean_products.json", "korean_products"),
    ("data/drug_interactions.json", "drug_interactions"),
    ("data/emergency_guide.json", "emergency_guide"),
    ("data/safety.json", "safety"),
];

fn main() {
    for (path, root_key) in DATA_FILES {
        let table = load_table(Path::new(path));
        assert!(
            table.get(root_key).is_some(),
            "\n\nDATA BUILD ERROR: Missing '{root_key}' field\n\
             Path: {path}\n"
        );
    }

    let symptoms = load_table(Path::new("data/symptoms.json"));
    let conditions = load_table(Path::new("data/conditions.json"));

    let symptom_ids = validate_symptoms(&symptoms);
    let condition_count = validate_conditions(&conditions, &symptom_ids);

    println!(
        "cargo:warning=Validated data: {} symptoms, {condition_count} conditions",
        symptom_ids.len()
    );

    set_build_dependencies();
}

fn load_table(path: &Path) -> serde_json::Value {
    assert!(
        path.exists(),
        "\n\nDATA BUILD ERROR: File not found\n\
         Path: {}\n",
        path.display()
    );

    let contents = std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nDATA BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    });

    serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nDATA BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            path.display()
        );
    })
}

fn array<'a>(table: &'a serde_json::Value, key: &str) -> &'a [serde_json::Value] {
    table
        .get(key)
        .and_then(serde_json::Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_else(|| {
            panic!("\n\nDATA BUILD ERROR: '{key}' must be an array\n");
        })
}

fn validate_symptoms(symptoms: &serde_json::Value) -> HashSet<String> {
    let mut ids = HashSet::new();

    for (i, symptom) in array(symptoms, "symptoms").iter().enumerate() {
        let id = symptom
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nDATA BUILD ERROR: Symptom at index {i} missing 'id' field\n");
            });

        assert!(
            symptom.get("label_en").is_some() || symptom.get("display_name_en").is_some(),
            "\n\nDATA BUILD ERROR: Symptom '{id}' (index {i}) missing English label\n"
        );
        assert!(
            ids.insert(id.to_string()),
            "\n\nDATA BUILD ERROR: Duplicate symptom id '{id}'\n"
        );
    }

    ids
}

fn validate_conditions(conditions: &serde_json::Value, symptom_ids: &HashSet<String>) -> usize {
    let list = array(conditions, "conditions");
    let mut seen = HashSet::new();

    for (i, condition) in list.iter().enumerate() {
        let id = condition
            .get("id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nDATA BUILD ERROR: Condition at index {i} missing 'id' field\n");
            });
        assert!(
            seen.insert(id.to_string()),
            "\n\nDATA BUILD ERROR: Duplicate condition id '{id}'\n"
        );

        validate_weights(condition, id, symptom_ids);
        validate_red_flags(condition, id, symptom_ids);
    }

    list.len()
}

fn validate_weights(condition: &serde_json::Value, id: &str, symptom_ids: &HashSet<String>) {
    let weights = condition
        .get("symptom_weights")
        .and_then(serde_json::Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    let mut total = 0.0;
    for entry in weights {
        let symptom = entry
            .get("symptom_id")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("<unknown>");

        let weight = entry.get("weight").and_then(serde_json::Value::as_f64);
        assert!(
            weight.is_some_and(|w| w.is_finite() && w > 0.0),
            "\n\nDATA BUILD ERROR: Condition '{id}' has invalid weight for '{symptom}'\n\
             Weights must be positive numbers.\n"
        );
        total += weight.unwrap_or_default();

        assert!(
            symptom_ids.contains(symptom),
            "\n\nDATA BUILD ERROR: Condition '{id}' weights unknown symptom '{symptom}'\n\
             Add it to data/symptoms.json or fix the id.\n"
        );
    }

    assert!(
        total.is_finite(),
        "\n\nDATA BUILD ERROR: Condition '{id}' symptom weights sum to a non-finite total\n"
    );
}

fn validate_red_flags(condition: &serde_json::Value, id: &str, symptom_ids: &HashSet<String>) {
    let rules = condition
        .get("exclusion_red_flags")
        .and_then(serde_json::Value::as_array)
        .map_or(&[][..], Vec::as_slice);

    for (j, rule) in rules.iter().enumerate() {
        let triggers = rule
            .get("if_symptoms_any")
            .and_then(serde_json::Value::as_array)
            .map_or(&[][..], Vec::as_slice);

        assert!(
            !triggers.is_empty(),
            "\n\nDATA BUILD ERROR: Condition '{id}' red flag {j} has no trigger symptoms\n"
        );

        for trigger in triggers {
            let symptom = trigger.as_str().unwrap_or("<unknown>");
            assert!(
                symptom_ids.contains(symptom),
                "\n\nDATA BUILD ERROR: Condition '{id}' red flag {j} uses unknown symptom '{symptom}'\n"
            );
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if any data table changes
    for (path, _) in DATA_FILES {
        println!("cargo:rerun-if-changed={path}");
    }

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
