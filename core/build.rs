//! Build script: reads /vocabulary/sets.json and generates Rust source code
//! that statically constructs every word set.
//! This lets the core crate embed vocabulary without any runtime JSON parsing,
//! keeping it fully no_std compatible.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;

// ── JSON schema types (build-time only) ──────────────────────────────────────

#[derive(Deserialize)]
struct JsonWordSet {
    id: String,
    name: String,
    description: String,
    words: Vec<(String, String)>,
}

// ── Code generation helpers ──────────────────────────────────────────────────

fn gen_pair((left, right): &(String, String)) -> String {
    // Debug formatting yields a valid, escaped Rust string literal
    format!("WordPair::new({left:?}, {right:?})")
}

fn gen_set(set: &JsonWordSet) -> String {
    let words: Vec<String> = set.words.iter().map(gen_pair).collect();
    let words_str = if words.is_empty() {
        "vec![]".to_string()
    } else {
        format!(
            "vec![\n                {}\n            ]",
            words.join(",\n                ")
        )
    };

    format!(
        r#"        WordSet {{
            id: String::from({id:?}),
            name: String::from({name:?}),
            description: String::from({description:?}),
            words: {words_str},
        }}"#,
        id = set.id,
        name = set.name,
        description = set.description,
    )
}

fn validate(sets: &[JsonWordSet]) {
    let mut seen = BTreeSet::new();
    for set in sets {
        if set.id.trim().is_empty() {
            panic!("Word set with empty id: {}", set.name);
        }
        if !seen.insert(set.id.as_str()) {
            panic!("Duplicate word set id: {}", set.id);
        }
        for (left, right) in &set.words {
            if left.trim().is_empty() || right.trim().is_empty() {
                panic!("Empty word in set {}: ({left:?}, {right:?})", set.id);
            }
        }
    }
}

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let sets_path = Path::new(&manifest_dir).join("../vocabulary/sets.json");

    // Tell Cargo to re-run if the JSON file changes
    println!("cargo:rerun-if-changed={}", sets_path.display());

    let sets_json = fs::read_to_string(&sets_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", sets_path.display()));
    let sets: Vec<JsonWordSet> =
        serde_json::from_str(&sets_json).expect("Failed to parse sets.json");

    validate(&sets);

    let set_entries: Vec<String> = sets.iter().map(gen_set).collect();

    // ── Write output ─────────────────────────────────────────────────────────
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest = Path::new(&out_dir).join("vocabulary_generated.rs");

    let generated = format!(
        r#"// Auto-generated from sets.json. DO NOT EDIT

/// Returns all word sets defined in sets.json, in file order.
pub fn get_all_word_sets() -> Vec<WordSet> {{
    vec![
{}
    ]
}}
"#,
        set_entries.join(",\n"),
    );

    fs::write(&dest, generated).expect("Failed to write generated vocabulary file");
}
