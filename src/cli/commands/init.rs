//! Init command implementation
//!
//! This module implements the `init` command for generating a commented
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiscrub.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing piiscrub configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: piiscrub validate-config");
                println!("  3. Run: piiscrub anonymize notes.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the commented default configuration
    fn generate_config() -> String {
        r#"# piiscrub Configuration File
# PII detection and anonymization
#
# Every setting is optional; the values below are the defaults.
# Any value can be overridden with PIISCRUB_<SECTION>_<KEY>, for example
# PIISCRUB_ANONYMIZER_STRATEGY=hash. Values may reference environment
# variables with ${VAR_NAME}.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Annotation
# ============================================================================
[annotator]
# Chunk length in characters; entities split across chunks are not detected
chunk_length = 1000

# Longer inputs are truncated to this many characters before recognition
max_input_length = 1000000

# Maximum concurrent recognizer calls (1-256)
max_concurrency = 8

# Offsets of detected spans: "document" (whole text) or "chunk" (per chunk)
offset_mode = "document"

# Drop detections scoring below this value (0.0 - 1.0)
# score_threshold = 0.5

# ============================================================================
# Built-in pattern recognizer
# ============================================================================
[recognizer]
# Custom pattern library (TOML); built-in patterns when unset
# pattern_library = "patterns/pii_patterns.toml"

# Patterns with a lower confidence are not run
confidence_threshold = 0.5

# ============================================================================
# Anonymization
# ============================================================================
[anonymizer]
# Strategy: "redact", "replace" or "hash"
strategy = "redact"

# Hash algorithm for the hash strategy: "md5", "sha256" or "sha3_256"
hash_type = "sha256"

# Entity types to anonymize; empty means all
# PERSON, ORGANIZATION, LOCATION, EMAIL, PHONE_NUMBER, DATE, NUMBER, CREDIT_CARD, UNKNOWN
entities = []

# Spans outside the text: "reject" (fail the call) or "skip" (drop the span)
offset_policy = "reject"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging
local_enabled = false

# Log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
