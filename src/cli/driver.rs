//! Input gathering, table building and rendering for the CLI.

use crate::cli::args::CliArgs;
use crate::{BuildOutput, Error, build_from_source};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write;
use tracing::{debug, info};

/// Source processed when no input is given.
pub const SAMPLE_SOURCE: &str = "
typedef struct foobar {
    int f;
    int b;
    struct foobar * fb;
} foobar;
int q[100];
foobar w[100];
int z;
int foo(int a, int b) {
    int x;
    int y;
    return (x+y);
};
int bar(int c, int d) {
    int y;
    int z;
};
test() {};
typedef int strange_unit;
strange_unit bob;
";

/// One named source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub name: String,
    pub text: String,
}

impl SourceInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceInput {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Collect the inputs named by `args`: the positional source first, then each
/// `--file` in order, or the sample when neither is given.
pub fn gather_sources(args: &CliArgs) -> Result<Vec<SourceInput>> {
    let mut inputs = Vec::with_capacity(args.files.len() + 1);
    if let Some(source) = &args.source {
        inputs.push(SourceInput::new("<argument>", source.as_str()));
    }
    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        inputs.push(SourceInput::new(path.display().to_string(), text));
    }
    if inputs.is_empty() {
        inputs.push(SourceInput::new("<sample>", SAMPLE_SOURCE));
    }
    Ok(inputs)
}

/// Build every input in parallel. Results keep the input order; the first
/// failure (in input order) is returned with its location.
pub fn build_all(inputs: &[SourceInput]) -> Result<Vec<BuildOutput>> {
    debug!(inputs = inputs.len(), "building symbol tables");
    let results: Vec<Result<BuildOutput>> = inputs
        .par_iter()
        .map(|input| {
            build_from_source(&input.name, &input.text).map_err(|err| {
                let location = describe_location(input, &err);
                anyhow::Error::new(err).context(format!("failed to build {location}"))
            })
        })
        .collect();
    results.into_iter().collect()
}

fn describe_location(input: &SourceInput, err: &Error) -> String {
    match err.span() {
        Some(span) => {
            let (line, col) = span.line_col(&input.text);
            format!("{}:{line}:{col}", input.name)
        }
        None => input.name.clone(),
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("failed to serialize symbol table")
}

/// Render the tree dump (unless `--no-tree`) and both tables.
pub fn render(output: &BuildOutput, args: &CliArgs) -> Result<String> {
    let mut out = String::new();
    if !args.no_tree {
        out.push_str(&output.tree());
    }
    let _ = writeln!(out, "{}", to_json(&output.tables.values, args.compact)?);
    let _ = writeln!(out, "{}", to_json(&output.tables.types, args.compact)?);
    Ok(out)
}

/// Run the CLI pipeline and return the text to print on stdout.
pub fn run(args: &CliArgs) -> Result<String> {
    let inputs = gather_sources(args)?;
    let outputs = build_all(&inputs)?;
    let multiple = outputs.len() > 1;

    let mut out = String::new();
    for output in &outputs {
        if multiple {
            let _ = writeln!(out, "==> {} <==", output.file_name);
        }
        out.push_str(&render(output, args)?);
        info!(file = %output.file_name, "rendered symbol tables");
    }
    Ok(out)
}
