//! Text extraction capability
//!
//! OCR is an external collaborator. The pipeline consumes it through the
//! [`TextExtractor`] trait; [`FileTextExtractor`] covers sources that are
//! already plain text on disk.

use crate::domain::{PiiError, Result};
use async_trait::async_trait;

/// Extracts raw text from a source such as an image path or URL
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Extract the text of one source
    ///
    /// Failures are reported as [`PiiError::Extraction`]; the pipeline
    /// records them against the source and carries on.
    async fn extract_text(&self, source: &str) -> Result<String>;
}

/// Reads UTF-8 text files
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

#[async_trait]
impl TextExtractor for FileTextExtractor {
    fn name(&self) -> &str {
        "file"
    }

    async fn extract_text(&self, source: &str) -> Result<String> {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| PiiError::Extraction(format!("Failed to read {source}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_extractor_reads_text() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "Contact jane@example.com").expect("Failed to write temp file");

        let text = FileTextExtractor
            .extract_text(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(text, "Contact jane@example.com");
    }

    #[tokio::test]
    async fn test_file_extractor_missing_file() {
        let result = FileTextExtractor
            .extract_text("/nonexistent/scan.txt")
            .await;
        assert!(matches!(result, Err(PiiError::Extraction(_))));
    }
}
