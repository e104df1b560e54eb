//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the piiscrub configuration file.

use super::EXIT_CONFIG_ERROR;
use crate::annotation::PatternRegistry;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates every section
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let registry = match &config.recognizer.pattern_library {
            Some(path) => PatternRegistry::from_file(path),
            None => PatternRegistry::default_patterns(),
        };
        let pattern_count = match registry {
            Ok(registry) => registry.all_patterns().len(),
            Err(e) => {
                println!("❌ Pattern library failed to load");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let entities = if config.anonymizer.entities.is_empty() {
            "all".to_string()
        } else {
            config.anonymizer.entities.join(", ")
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Chunk Length: {}", config.annotator.chunk_length);
        println!("  Max Input Length: {}", config.annotator.max_input_length);
        println!("  Max Concurrency: {}", config.annotator.max_concurrency);
        println!("  Offset Mode: {:?}", config.annotator.offset_mode);
        println!(
            "  Pattern Library: {}",
            config
                .recognizer
                .pattern_library
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
        );
        println!("  Patterns: {pattern_count}");
        println!("  Strategy: {}", config.anonymizer.strategy);
        println!("  Hash Type: {}", config.anonymizer.hash_type);
        println!("  Entities: {entities}");
        println!("  Offset Policy: {:?}", config.anonymizer.offset_policy);
        println!();
        Ok(0)
    }
}
