//! JSON output
//!
//! Annotation, anonymization and pipeline results serialize with `serde`.
//! These helpers write them as pretty-printed JSON.

use crate::domain::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialize `value` as pretty-printed JSON
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` as pretty-printed JSON to `path`, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut content = to_json_string(value)?;
    content.push('\n');
    fs::write(path, content)?;

    tracing::debug!(path = %path.display(), "Results written");
    Ok(())
}
