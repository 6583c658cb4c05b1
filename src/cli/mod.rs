//! Command-line interface for spanlint.
//!
//! Provides commands for validating a candidate span file against a
//! source text and for checking policy files.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::domain::CandidateSpan;
use crate::pipeline::validate_spans;
use crate::policy::{ProcessingOptions, ValidationPolicy};

/// spanlint - validation and correction for LLM-produced text spans
#[derive(Parser, Debug)]
#[command(name = "spanlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate candidate spans against a source text
    Validate {
        /// Source text file the spans are anchored to
        #[arg(short, long)]
        source: PathBuf,

        /// Candidates JSON file (array of spans; reads stdin if not
        /// provided)
        #[arg(short, long)]
        candidates: Option<PathBuf>,

        /// Policy YAML file (defaults apply if not provided)
        #[arg(short, long)]
        policy: Option<PathBuf>,

        /// Drop spans below this confidence
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Keep at most this many spans
        #[arg(long)]
        max_spans: Option<usize>,

        /// Drop defective candidates instead of failing (attempt 2)
        #[arg(long)]
        lenient: bool,
    },

    /// Check that a policy file parses and is valid
    PolicyCheck {
        /// Policy YAML file
        path: PathBuf,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Validate {
                source,
                candidates,
                policy,
                min_confidence,
                max_spans,
                lenient,
            } => {
                let source_text = std::fs::read_to_string(&source)
                    .with_context(|| format!("Failed to read source file: {}", source.display()))?;

                let raw = match candidates {
                    Some(path) => std::fs::read_to_string(&path).with_context(|| {
                        format!("Failed to read candidates file: {}", path.display())
                    })?,
                    None => {
                        let mut buffer = String::new();
                        io::stdin()
                            .read_to_string(&mut buffer)
                            .context("Failed to read candidates from stdin")?;
                        buffer
                    }
                };
                let candidates: Vec<CandidateSpan> =
                    serde_json::from_str(&raw).context("Failed to parse candidates JSON")?;

                let policy = match policy {
                    Some(path) => ValidationPolicy::from_file(&path)?,
                    None => ValidationPolicy::default(),
                };
                policy.validate()?;

                let mut options = ProcessingOptions::default();
                if let Some(min_confidence) = min_confidence {
                    options.min_confidence = min_confidence;
                }
                if let Some(max_spans) = max_spans {
                    options.max_spans = max_spans;
                }

                let attempt = if lenient { 2 } else { 1 };
                let result =
                    validate_spans(&candidates, &source_text, &policy, &options, attempt);

                println!("{}", serde_json::to_string_pretty(&result)?);

                if !result.ok {
                    std::process::exit(1);
                }
                Ok(())
            }

            Commands::PolicyCheck { path } => {
                let policy = ValidationPolicy::from_file(&path)?;
                policy.validate()?;
                println!(
                    "policy ok: {} roles, overlap {}",
                    policy.allowed_roles.len(),
                    if policy.allow_overlap { "allowed" } else { "forbidden" }
                );
                Ok(())
            }
        }
    }
}
