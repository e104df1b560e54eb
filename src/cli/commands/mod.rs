//! CLI command implementations
//!
//! Commands return their process exit code:
//! - `0` success
//! - `1` completed, but some inputs could not be read or processed
//! - `2` configuration error
//! - `5` fatal error

pub mod annotate;
pub mod anonymize;
pub mod init;
pub mod validate;

use crate::annotation::{Annotator, RegexRecognizer};
use crate::config::{load_config_or_default, PiiConfig};
use crate::domain::Result;
use crate::pipeline::{FileTextExtractor, ImageOutcome, Pipeline, PipelineRun, TextOutcome};
use serde::Serialize;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

/// Configuration error exit code
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Partial failure exit code
pub const EXIT_PARTIAL: i32 = 1;

/// Fatal error exit code
pub const EXIT_FATAL: i32 = 5;

/// Result of running a command's inputs through the pipeline
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum InputRun {
    /// Inputs read from files
    Files(PipelineRun<ImageOutcome>),
    /// A single input read from stdin
    Stdin(PipelineRun<TextOutcome>),
}

impl InputRun {
    /// Number of inputs that could not be read or processed
    pub fn failed_inputs(&self) -> usize {
        let unreadable = match self {
            Self::Files(run) => run.outcomes.iter().filter(|o| o.is_failed()).count(),
            Self::Stdin(_) => 0,
        };
        let unprocessed = self
            .text_outcomes()
            .iter()
            .filter(|(_, outcome)| outcome.error.is_some())
            .count();
        unreadable + unprocessed
    }

    /// Text outcomes of every readable input, with their source name
    pub fn text_outcomes(&self) -> Vec<(&str, &TextOutcome)> {
        match self {
            Self::Files(run) => run
                .outcomes
                .iter()
                .filter_map(|outcome| match outcome {
                    ImageOutcome::Processed { source, result } => Some((source.as_str(), result)),
                    ImageOutcome::Failed { .. } => None,
                })
                .collect(),
            Self::Stdin(run) => run.outcomes.iter().map(|o| ("<stdin>", o)).collect(),
        }
    }
}

/// Load the configuration, falling back to defaults when the file is absent
pub(crate) fn load_settings(config_path: &str) -> Result<PiiConfig> {
    load_config_or_default(config_path)
}

/// Build an annotator backed by the built-in regex recognizer
pub(crate) fn build_annotator(config: &PiiConfig) -> Result<Arc<Annotator>> {
    let recognizer = RegexRecognizer::from_config(&config.recognizer)?;
    Ok(Arc::new(Annotator::new(
        Arc::new(recognizer),
        &config.annotator,
    )?))
}

/// Run `files` (or stdin when empty) through `pipeline`
pub(crate) async fn run_inputs(pipeline: &Pipeline, files: &[String]) -> Result<InputRun> {
    if files.is_empty() {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(InputRun::Stdin(
            pipeline.run_text_pipeline(&[text]).await,
        ));
    }

    Ok(InputRun::Files(
        pipeline.run_ocr_pipeline(&FileTextExtractor, files).await,
    ))
}

/// Report failed inputs on stderr and pick the exit code
pub(crate) fn finish_exit_code(run: &InputRun) -> i32 {
    if let InputRun::Files(files) = run {
        for outcome in &files.outcomes {
            if let ImageOutcome::Failed { source, error } = outcome {
                eprintln!("❌ {source}: {error}");
            }
        }
    }
    for (source, outcome) in run.text_outcomes() {
        if let Some(ref error) = outcome.error {
            eprintln!("❌ {source}: {error}");
        }
    }

    if run.failed_inputs() > 0 {
        EXIT_PARTIAL
    } else {
        0
    }
}
