//! Annotate command implementation
//!
//! This module implements the `annotate` command, which detects PII with the
//! built-in pattern recognizer and reports the spans as JSON.

use super::{build_annotator, finish_exit_code, load_settings, run_inputs, EXIT_CONFIG_ERROR};
use crate::anonymization::Anonymizer;
use crate::output::{to_json_string, write_json};
use crate::pipeline::{OperationType, Pipeline};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the annotate command
#[derive(Args, Debug)]
pub struct AnnotateArgs {
    /// Text files to annotate (reads stdin when omitted)
    pub files: Vec<String>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnnotateArgs {
    /// Execute the annotate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.files.len(), "Starting annotate command");

        let annotator = match load_settings(config_path).and_then(|c| build_annotator(&c)) {
            Ok(annotator) => annotator,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let pipeline = Pipeline::new(annotator, Anonymizer::default())
            .with_operations(vec![OperationType::ExtractText, OperationType::AnnotatePii]);
        let run = run_inputs(&pipeline, &self.files).await?;

        match &self.output {
            Some(path) => {
                write_json(path, &run)?;
                eprintln!("✅ Annotations written to {}", path.display());
            }
            None => println!("{}", to_json_string(&run)?),
        }

        Ok(finish_exit_code(&run))
    }
}
