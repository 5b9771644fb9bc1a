//! Runs the JSON fixture manifest through the inference engine.
//!
//! Usage: `cargo run -p dev-test-runner [-- path/to/cases.json]`
use std::path::PathBuf;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Case {
    name: String,
    document: Value,
    expect: Expect,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
enum Expect {
    /// Connect JSON form of the inferred schema.
    Schema(Value),
    /// `InferenceError::kind()` identifier.
    Error(String),
}

fn default_manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures/cases.json")
}

/// Deserialize with JSON-path context in error messages.
fn load_manifest(path: &PathBuf) -> Result<Manifest> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&src);
    serde_path_to_error::deserialize::<_, Manifest>(de)
        .map_err(|err| anyhow!("at JSON path {} → {}", err.path(), err.inner()))
        .with_context(|| format!("invalid fixture manifest {}", path.display()))
}

fn check(case: &Case) -> Result<(), String> {
    let result = outbox_schema::infer_schema(&case.document);
    match (&case.expect, result) {
        (Expect::Schema(want), Ok(schema)) => {
            let got = outbox_schema::emit::to_connect_json(&schema);
            if &got == want {
                Ok(())
            } else {
                Err(format!("schema mismatch\n  want: {want}\n  got:  {got}"))
            }
        }
        (Expect::Error(want), Err(error)) if error.kind() == want => Ok(()),
        (Expect::Error(want), Err(error)) => Err(format!("expected {want}, got {}: {error}", error.kind())),
        (Expect::Error(want), Ok(schema)) => Err(format!("expected {want}, inferred {schema}")),
        (Expect::Schema(_), Err(error)) => Err(format!("unexpected error: {error}")),
    }
}

fn main() -> Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(default_manifest);
    let manifest = load_manifest(&path)?;

    let mut failed = 0;
    for case in &manifest.cases {
        match check(case) {
            Ok(()) => eprintln!("✅ {}", case.name.green()),
            Err(msg) => {
                failed += 1;
                eprintln!("❌ {}: {msg}", case.name.red());
            }
        }
    }

    eprintln!("{} passed, {} failed", manifest.cases.len() - failed, failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
