//! Minimal CLI: infer → declaration text (or a JSON report).

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use serde_json::Value;

use crate::{Inference, Inferred};

/// Ambient alias the declarations lean on for untyped slots; prepended to
/// text output whenever the fallback is referenced.
const JSON_ALIAS: &str =
    "type Json = string | number | boolean | null | Json[] | { [key: string]: Json };";

/// infer structural types from JSON samples and emit named declarations
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// Context name used to derive the root type identifier
    #[arg(long, default_value = "root")]
    root: String,

    /// Seed for reproducible sampling and name disambiguation
    #[arg(long)]
    seed: Option<u64>,

    /// Emit a machine-readable JSON report instead of declaration text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let mut documents = self.load_documents()?;
        // A single document stands alone; several pool into one sample.
        let combined = if documents.len() == 1 {
            documents.remove(0)
        } else {
            Value::Array(documents)
        };

        let mut inference = match self.seed {
            Some(seed) => Inference::seeded(seed),
            None => Inference::new(),
        };
        inference.reserve_name("Json");
        let inferred = inference.infer(&combined, &self.root)?;

        let output = if self.json {
            serde_json::to_string_pretty(&inferred).context("failed to serialize report")?
        } else {
            render_text(&inferred)
        };
        match self.out.as_ref() {
            Some(out) => {
                if let Some(parent) = out.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                std::fs::write(out, &output)
                    .with_context(|| format!("failed to write {}", out.display()))?;
            }
            None => println!("{output}"),
        }
        Ok(())
    }

    fn load_documents(&self) -> anyhow::Result<Vec<Value>> {
        let source_paths = expand_inputs(&self.input)?;
        let mut documents = Vec::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {}", source_path.display()))?;
            let value = serde_json::from_str::<Value>(&source).with_context(|| {
                format!("failed to parse JSON source file {}", source_path.display())
            })?;
            documents.push(value);
        }
        if documents.is_empty() {
            bail!("no input documents");
        }
        Ok(documents)
    }
}

fn render_text(inferred: &Inferred) -> String {
    let mut sections = Vec::new();
    sections.push(format!("// root type: {}", inferred.expression));
    let uses_fallback = inferred.expression.contains("Json")
        || inferred.declarations.iter().any(|d| d.text.contains("Json"));
    if uses_fallback {
        sections.push(JSON_ALIAS.to_string());
    }
    for declaration in &inferred.declarations {
        sections.push(declaration.text.clone());
    }
    sections.join("\n\n")
}

/// Turn each input into concrete document paths. Anything carrying glob
/// metacharacters goes through the `glob` crate and must match at least one
/// file; everything else is taken as a literal path.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{')) {
            paths.push(PathBuf::from(input));
            continue;
        }
        let before = paths.len();
        let matches =
            glob::glob(input).with_context(|| format!("invalid glob pattern: {input}"))?;
        for entry in matches {
            paths.push(entry.with_context(|| format!("unreadable match for {input}"))?);
        }
        if paths.len() == before {
            bail!("no files match {input}");
        }
    }
    Ok(paths)
}
