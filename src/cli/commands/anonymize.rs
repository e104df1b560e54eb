//! Anonymize command implementation
//!
//! This module implements the `anonymize` command, which detects PII and
//! replaces it using the configured (or overridden) strategy.

use super::{build_annotator, finish_exit_code, load_settings, run_inputs, EXIT_CONFIG_ERROR};
use crate::anonymization::Anonymizer;
use crate::config::loader::split_list;
use crate::config::PiiConfig;
use crate::domain::Result;
use crate::output::write_json;
use crate::pipeline::{OperationType, Pipeline};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Text files to anonymize (reads stdin when omitted)
    pub files: Vec<String>,

    /// Override the strategy (redact, replace, hash)
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Override the hash algorithm (md5, sha256, sha3_256)
    #[arg(long, value_name = "ALGORITHM")]
    pub hash_type: Option<String>,

    /// Override the entity allow-list (comma-separated)
    #[arg(short, long, value_name = "TYPES")]
    pub entities: Option<String>,

    /// Write the full JSON report to this file instead of printing text
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(inputs = self.files.len(), "Starting anonymize command");

        let pipeline = match self.build_pipeline(config_path) {
            Ok(pipeline) => pipeline,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let run = run_inputs(&pipeline, &self.files).await?;
        for (source, outcome) in run.text_outcomes() {
            if let Some(result) = &outcome.anonymized {
                tracing::info!(
                    source,
                    replacements = result.total_replacements(),
                    by_type = ?result.stats_by_type(),
                    "Input anonymized"
                );
            }
        }

        match &self.output {
            Some(path) => {
                write_json(path, &run)?;
                eprintln!("✅ Anonymization report written to {}", path.display());
            }
            None => {
                let outcomes = run.text_outcomes();
                let labelled = outcomes.len() > 1;
                for (source, outcome) in outcomes {
                    if labelled {
                        println!("==> {source} <==");
                    }
                    match (&outcome.anonymized, &outcome.error) {
                        (Some(result), _) => println!("{}", result.anonymized_text),
                        // Reported by finish_exit_code
                        (None, Some(_)) => {}
                        (None, None) => println!("{}", outcome.text),
                    }
                }
            }
        }

        Ok(finish_exit_code(&run))
    }

    fn build_pipeline(&self, config_path: &str) -> Result<Pipeline> {
        let mut config = load_settings(config_path)?;
        self.apply_overrides(&mut config);
        config.validate()?;

        let annotator = build_annotator(&config)?;
        let anonymizer = Anonymizer::from_config(&config.anonymizer)?;
        let pipeline = Pipeline::new(annotator, anonymizer)
            .with_operations(vec![OperationType::ExtractText, OperationType::AnonymizePii]);
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn apply_overrides(&self, config: &mut PiiConfig) {
        if let Some(ref strategy) = self.strategy {
            config.anonymizer.strategy = strategy.clone();
        }
        if let Some(ref hash_type) = self.hash_type {
            config.anonymizer.hash_type = hash_type.clone();
        }
        if let Some(ref entities) = self.entities {
            config.anonymizer.entities = split_list(entities);
        }
    }
}
