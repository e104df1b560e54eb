//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiscrub using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// piiscrub - PII detection and anonymization
#[derive(Parser, Debug)]
#[command(name = "piiscrub")]
#[command(version, about, long_about = None)]
#[command(author = "piiscrub Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "piiscrub.toml", env = "PIISCRUB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIISCRUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect PII in text files (or stdin) and print the spans as JSON
    Annotate(commands::annotate::AnnotateArgs),

    /// Detect and anonymize PII in text files (or stdin)
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
