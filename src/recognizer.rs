//! Seam to the external OCR engine.
//!
//! The engine itself (Tesseract, a cloud API, ...) lives outside this
//! crate. Implementations report text and a 0-100 confidence per page;
//! the core normalizes the confidence and never retries a failed page.

use tracing::{debug, warn};

use crate::document::{MultiPageDocument, RecognitionResult};
use crate::error::{PipelineError, RecognizerError};
use crate::pipeline::Pipeline;

/// One rasterized page, ready for recognition.
#[derive(Debug, Clone)]
pub struct PageImage {
    /// 1-based.
    pub page_number: u32,
    /// Encoded image bytes (PNG, JPEG, ...).
    pub data: Vec<u8>,
}

impl PageImage {
    pub fn new(page_number: u32, data: Vec<u8>) -> Self {
        Self { page_number, data }
    }
}

/// Text and confidence exactly as the engine reported them.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub text: String,
    /// Average word confidence, 0-100.
    pub confidence_percent: f64,
}

/// Trait for OCR engines.
pub trait TextRecognizer: Send + Sync {
    fn name(&self) -> &str;

    /// Check if the engine can be used (binary installed, model present).
    fn is_available(&self) -> bool {
        true
    }

    /// Languages passed to the engine, in engine notation.
    fn languages(&self) -> &str {
        "ara+fra"
    }

    fn recognize(&self, image: &PageImage) -> Result<EngineOutput, RecognizerError>;
}

/// Recognize every page, then correct them as one document.
///
/// Stops at the first page the engine fails on.
pub fn recognize_document(
    recognizer: &dyn TextRecognizer,
    pipeline: &Pipeline,
    pages: &[PageImage],
) -> Result<MultiPageDocument, PipelineError> {
    if !recognizer.is_available() {
        let page = pages.first().map(|p| p.page_number).unwrap_or(1);
        return Err(PipelineError::Engine {
            page,
            source: RecognizerError::Unavailable(recognizer.name().to_string()),
        });
    }

    let mut results = Vec::with_capacity(pages.len());
    for page in pages {
        let output = recognizer.recognize(page).map_err(|source| {
            warn!(engine = recognizer.name(), page = page.page_number, error = %source, "recognition failed");
            PipelineError::Engine {
                page: page.page_number,
                source,
            }
        })?;
        debug!(
            engine = recognizer.name(),
            page = page.page_number,
            confidence = output.confidence_percent,
            chars = output.text.chars().count(),
            "page recognized"
        );
        results.push(RecognitionResult::from_engine(
            output.text,
            output.confidence_percent,
            page.page_number,
        ));
    }

    Ok(pipeline.run_pages(&results))
}
