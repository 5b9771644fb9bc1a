//! Minimal CLI: documents in → one inferred schema per document out
use std::io::Read;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::error::InferenceError;
use crate::schema::Schema;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer Connect-style struct schemas from JSON/NDJSON documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// more logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print one schema per input document
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /payload/after)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is a document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// reject documents nested deeper than this before inferring
    #[arg(long)]
    max_depth: Option<usize>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    /// pretty Connect JSON schema per document
    Connect,
    /// one-line `struct{..}` rendering per document
    Compact,
    /// one JSON line per document: {"source", "schema"}
    Ndjson,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[arg(long, value_enum, default_value_t = Format::Connect)]
    format: Format,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One loaded document and where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub value: Value,
}

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    schema: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for (label, source) in read_sources(&self.input)? {
            for (source, value) in parse_source(&label, &source, self.ndjson)? {
                self.preprocess(source, value, &mut docs)?;
            }
        }
        tracing::debug!(documents = docs.len(), "loaded input documents");
        Ok(docs)
    }

    fn preprocess(&self, source: String, value: Value, out: &mut Vec<Document>) -> Result<()> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            // missing target → absent document
            Some(ptr) => value.pointer(ptr).cloned().unwrap_or_else(|| {
                tracing::warn!(%source, pointer = ptr, "JSON pointer matched nothing");
                Value::Null
            }),
        };
        let Some(jq_expr) = self.jq_expr.as_deref() else {
            out.push(Document { source, value });
            return Ok(());
        };
        let outputs = crate::jq_exec::run_filter(jq_expr, &value)
            .with_context(|| format!("failed to apply jq expression to {source}"))?;
        let many = outputs.len() > 1;
        for (i, value) in outputs.into_iter().enumerate() {
            let source = if many { format!("{source}#{i}") } else { source.clone() };
            out.push(Document { source, value });
        }
        Ok(())
    }

    fn check_depth(&self, doc: &Document) -> Result<()> {
        let Some(max) = self.max_depth else { return Ok(()) };
        let depth = crate::inference::nesting_depth(&doc.value);
        if depth > max {
            bail!("document nested {depth} levels deep exceeds --max-depth {max}");
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    /// Returns the number of documents that failed inference.
    pub fn run(&self) -> Result<usize> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(0)
                }

                let settings = &target.input_settings;
                let docs = settings.load_documents()?;

                // stateless engine: infer documents independently, keep input order
                let results: Vec<Result<Schema>> = docs
                    .par_iter()
                    .map(|doc| {
                        settings.check_depth(doc)?;
                        crate::inference::infer_schema(&doc.value).map_err(anyhow::Error::from)
                    })
                    .collect();

                let mut rendered = String::new();
                let mut failures = 0;
                for (doc, result) in docs.iter().zip(results) {
                    match result {
                        Ok(schema) => {
                            rendered.push_str(&render(&doc.source, &schema, target.format)?);
                            rendered.push('\n');
                        }
                        Err(error) => {
                            failures += 1;
                            report_failure(&doc.source, &error);
                        }
                    }
                }

                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &rendered)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                } else {
                    print!("{rendered}");
                }
                Ok(failures)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn render(source: &str, schema: &Schema, format: Format) -> Result<String> {
    let out = match format {
        Format::Connect => serde_json::to_string_pretty(&crate::emit::to_connect_json(schema))?,
        Format::Compact => format!("{source}: {schema}"),
        Format::Ndjson => serde_json::to_string(&Report {
            source,
            schema: crate::emit::to_connect_json(schema),
        })?,
    };
    Ok(out)
}

fn report_failure(source: &str, error: &anyhow::Error) {
    let kind = error
        .downcast_ref::<InferenceError>()
        .map(InferenceError::kind)
        .unwrap_or("rejected");
    eprintln!("{} {} ({kind}): {error:#}", "error:".red().bold(), source.bold());
}

/// (label, contents) for every input, in argument order.
fn read_sources(inputs: &[String]) -> Result<Vec<(String, String)>> {
    let mut sources = Vec::new();
    for raw in inputs {
        if raw == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            sources.push(("<stdin>".to_owned(), buf));
            continue;
        }
        for path in resolve_file_path_pattern(raw)? {
            let label = path.to_string_lossy().to_string();
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read source file {label}"))?;
            sources.push((label, contents));
        }
    }
    Ok(sources)
}

/// Split one source into labelled documents.
fn parse_source(label: &str, source: &str, ndjson: bool) -> Result<Vec<(String, Value)>> {
    if !ndjson {
        let value = serde_json::from_str::<Value>(source)
            .with_context(|| format!("failed to parse JSON source {label}"))?;
        return Ok(vec![(label.to_owned(), value)]);
    }
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_label = format!("{label}:{}", i + 1);
            let value = serde_json::from_str::<Value>(line)
                .with_context(|| format!("failed to parse NDJSON line {line_label}"))?;
            Ok((line_label, value))
        })
        .collect()
}

fn resolve_file_path_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    if !has_glob_chars(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }
    let mut out = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
        out.push(entry?);
    }
    if out.is_empty() {
        // explicit glob that matched nothing is an error, not an empty run
        bail!("glob pattern matched no files: {pattern}");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> InputSettings {
        InputSettings {
            ndjson: false,
            json_pointer: None,
            jq_expr: None,
            max_depth: None,
            input: vec![],
        }
    }

    #[test]
    fn ndjson_lines_are_labelled_and_blank_lines_skipped() {
        let docs = parse_source("in.ndjson", "{\"a\":1}\n\n{\"b\":2}\n", true).unwrap();
        let labels: Vec<&str> = docs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["in.ndjson:1", "in.ndjson:3"]);
        assert_eq!(docs[1].1, json!({"b": 2}));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(parse_source("x.json", "{", false).is_err());
        assert!(parse_source("x.ndjson", "{}\nnope", true).is_err());
    }

    #[test]
    fn json_pointer_selects_subnode_or_absent() {
        let s = InputSettings { json_pointer: Some("/payload".into()), ..settings() };
        let mut out = Vec::new();
        s.preprocess("a".into(), json!({"payload": {"id": 1}}), &mut out).unwrap();
        s.preprocess("b".into(), json!({"other": 1}), &mut out).unwrap();
        assert_eq!(out[0].value, json!({"id": 1}));
        assert_eq!(out[1].value, Value::Null);
    }

    #[test]
    fn jq_outputs_become_documents() {
        let s = InputSettings { jq_expr: Some(".rows[]".into()), ..settings() };
        let mut out = Vec::new();
        s.preprocess("f".into(), json!({"rows": [{"a": 1}, {"a": 2}]}), &mut out).unwrap();
        let labels: Vec<&str> = out.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(labels, vec!["f#0", "f#1"]);
    }

    #[test]
    fn max_depth_rejects_deep_documents() {
        let s = InputSettings { max_depth: Some(2), ..settings() };
        let shallow = Document { source: "s".into(), value: json!({"a": {"b": 1}}) };
        let deep = Document { source: "d".into(), value: json!({"a": {"b": [1]}}) };
        assert!(s.check_depth(&shallow).is_ok());
        assert!(s.check_depth(&deep).is_err());
    }

    #[test]
    fn render_formats() {
        let schema = crate::inference::infer_schema(&json!({"id": 1})).unwrap();
        assert_eq!(render("doc", &schema, Format::Compact).unwrap(), "doc: struct{id: int32}");
        let line = render("doc", &schema, Format::Ndjson).unwrap();
        let parsed: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["source"], "doc");
        assert_eq!(parsed["schema"]["fields"][0]["field"], "id");
    }

    #[test]
    fn literal_paths_pass_through() {
        let out = resolve_file_path_pattern("some/file.json").unwrap();
        assert_eq!(out, vec![PathBuf::from("some/file.json")]);
    }
}
