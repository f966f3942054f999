//! OCR collaborator seam. The engine core never touches image bytes; an
//! extractor turns them into text upstream of bill analysis.

use crate::CoreError;

pub trait TextExtractor: Send + Sync {
    /// Extracts readable text from an uploaded bill image. Failures surface
    /// as [`CoreError::Extraction`] and propagate unchanged to the caller.
    fn extract_text(&self, image: &[u8]) -> Result<String, CoreError>;
}
