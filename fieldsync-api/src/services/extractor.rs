/// PDF data extraction contract
///
/// This module defines the trait the upload route runs stored PDFs through,
/// plus the production stub. Extraction happens synchronously within the
/// upload request; the extracted value (or `None`) is persisted alongside
/// the upload record.
///
/// # Extractor Contract
///
/// Implementations must:
/// 1. Implement the `PdfExtractor` trait (async)
/// 2. Read the file at the given path themselves if they need its content
/// 3. Return `Ok(Some(json))` with extracted data, or `Ok(None)` when the
///    document yields nothing
///
/// # Example
///
/// ```
/// use fieldsync_api::services::extractor::{PdfExtractor, StubExtractor};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let extractor = StubExtractor;
/// let extracted = extractor.extract(Path::new("report.pdf")).await.unwrap();
/// assert!(extracted.unwrap().as_object().unwrap().is_empty());
/// # }
/// ```

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tracing::debug;

/// Extractor error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// Extraction failed
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

/// Extractor result type alias
pub type ExtractorResult<T> = Result<T, ExtractorError>;

/// Core extractor trait
///
/// The upload route holds one implementation behind `Arc<dyn PdfExtractor>`
/// so tests can substitute a failing double.
#[async_trait]
pub trait PdfExtractor: Send + Sync {
    /// Returns the extractor name
    ///
    /// Used for logging.
    fn name(&self) -> &str;

    /// Extracts structured data from the PDF at `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Location of the stored PDF on disk
    ///
    /// # Returns
    ///
    /// `Ok(Some(json))` with extracted data, `Ok(None)` when the document
    /// yields nothing, `Err` when extraction itself failed.
    async fn extract(&self, path: &Path) -> ExtractorResult<Option<JsonValue>>;
}

/// Placeholder extractor
///
/// Real PDF parsing is out of scope; every document "extracts" to an empty
/// JSON object so the rest of the pipeline (storage, response shape) is
/// exercised end to end.
pub struct StubExtractor;

#[async_trait]
impl PdfExtractor for StubExtractor {
    fn name(&self) -> &str {
        "stub"
    }

    async fn extract(&self, path: &Path) -> ExtractorResult<Option<JsonValue>> {
        debug!("extractor '{}' processing {}", self.name(), path.display());
        Ok(Some(JsonValue::Object(serde_json::Map::new())))
    }
}
