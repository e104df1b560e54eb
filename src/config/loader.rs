//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiConfig;
use crate::annotation::OffsetMode;
use crate::anonymization::OffsetPolicy;
use crate::domain::{PiiError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PIISCRUB";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`PiiConfig`]
/// 4. Applies environment variable overrides (`PIISCRUB_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PiiError::InvalidConfiguration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or an
/// override or section is invalid. Unknown strategy and hash names surface
/// as [`PiiError::UnsupportedStrategy`] and
/// [`PiiError::UnsupportedHashAlgorithm`].
///
/// # Examples
///
/// ```no_run
/// use piiscrub::config::load_config;
///
/// let config = load_config("piiscrub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiiError::InvalidConfiguration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiiError::InvalidConfiguration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;
    let mut config: PiiConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

/// Loads `path` if it exists, otherwise defaults with env overrides applied
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PiiConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = PiiConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Line endings are preserved.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PiiError::InvalidConfiguration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
    }

    if !missing_vars.is_empty() {
        return Err(PiiError::InvalidConfiguration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `PIISCRUB_*` prefix
///
/// Environment variables follow the pattern `PIISCRUB_<SECTION>_<KEY>`,
/// for example `PIISCRUB_ANNOTATOR_CHUNK_LENGTH` or
/// `PIISCRUB_ANONYMIZER_STRATEGY`. List values are comma separated.
///
/// # Errors
///
/// Returns [`PiiError::InvalidConfiguration`] if a numeric, boolean or enum
/// value does not parse.
pub fn apply_env_overrides(config: &mut PiiConfig) -> Result<()> {
    // Application
    if let Some(val) = env_var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Annotator
    if let Some(val) = env_var("ANNOTATOR_CHUNK_LENGTH") {
        config.annotator.chunk_length = parse_env("ANNOTATOR_CHUNK_LENGTH", &val)?;
    }
    if let Some(val) = env_var("ANNOTATOR_MAX_INPUT_LENGTH") {
        config.annotator.max_input_length = parse_env("ANNOTATOR_MAX_INPUT_LENGTH", &val)?;
    }
    if let Some(val) = env_var("ANNOTATOR_MAX_CONCURRENCY") {
        config.annotator.max_concurrency = parse_env("ANNOTATOR_MAX_CONCURRENCY", &val)?;
    }
    if let Some(val) = env_var("ANNOTATOR_OFFSET_MODE") {
        config.annotator.offset_mode = match val.to_lowercase().as_str() {
            "document" => OffsetMode::Document,
            "chunk" => OffsetMode::Chunk,
            _ => return Err(invalid_env("ANNOTATOR_OFFSET_MODE", &val)),
        };
    }
    if let Some(val) = env_var("ANNOTATOR_SCORE_THRESHOLD") {
        config.annotator.score_threshold = Some(parse_env("ANNOTATOR_SCORE_THRESHOLD", &val)?);
    }

    // Recognizer
    if let Some(val) = env_var("RECOGNIZER_PATTERN_LIBRARY") {
        config.recognizer.pattern_library = Some(PathBuf::from(val));
    }
    if let Some(val) = env_var("RECOGNIZER_CONFIDENCE_THRESHOLD") {
        config.recognizer.confidence_threshold =
            parse_env("RECOGNIZER_CONFIDENCE_THRESHOLD", &val)?;
    }

    // Anonymizer
    if let Some(val) = env_var("ANONYMIZER_STRATEGY") {
        config.anonymizer.strategy = val;
    }
    if let Some(val) = env_var("ANONYMIZER_HASH_TYPE") {
        config.anonymizer.hash_type = val;
    }
    if let Some(val) = env_var("ANONYMIZER_ENTITIES") {
        config.anonymizer.entities = split_list(&val);
    }
    if let Some(val) = env_var("ANONYMIZER_OFFSET_POLICY") {
        config.anonymizer.offset_policy = match val.to_lowercase().as_str() {
            "reject" => OffsetPolicy::Reject,
            "skip" => OffsetPolicy::Skip,
            _ => return Err(invalid_env("ANONYMIZER_OFFSET_POLICY", &val)),
        };
    }

    // Logging
    if let Some(val) = env_var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

/// Split a comma-separated list, dropping blank items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

fn parse_env<T: FromStr>(key: &str, val: &str) -> Result<T> {
    val.trim().parse().map_err(|_| invalid_env(key, val))
}

fn invalid_env(key: &str, val: &str) -> PiiError {
    PiiError::InvalidConfiguration(format!("Invalid {ENV_PREFIX}_{key} value: {val}"))
}
