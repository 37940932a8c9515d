/// Outbound service clients
///
/// This module groups the clients the route handlers call out through:
/// the Gemini chat proxy and the PDF data extractor. Both are constructed
/// once at startup and shared through `AppState`.

pub mod chat;
pub mod extractor;

pub use chat::AiClient;
pub use extractor::{ExtractorError, PdfExtractor, StubExtractor};
