//! Image-to-text seam.
//!
//! Students sometimes attach a screenshot of an error message to their
//! question. Text extraction itself is an external collaborator — the
//! gateway only wires it in: decoded image bytes go in, extracted text is
//! appended to the question. The engine never knows augmentation happened,
//! and an extraction failure falls back to the bare question.

/// Extracts text from raw image bytes.
pub trait ImageTextExtractor: Send + Sync {
    fn extract(&self, image: &[u8]) -> anyhow::Result<String>;
}
