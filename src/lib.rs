//! Post-OCR correction for bilingual Arabic/French administrative
//! documents.
//!
//! Raw engine text goes through a fixed sequence of regex rewrite stages
//! (artifact cleanup, ligature repair, misrecognition fixes, RTL repair,
//! dialect finalization), then entities are extracted and the document is
//! classified. See [`pipeline::Pipeline`].

pub mod classify;
pub mod cleaner;
pub mod config;
pub mod document;
pub mod entities;
pub mod error;
pub mod finalize;
pub mod inversion;
pub mod ligature;
pub mod misrecognition;
pub mod pipeline;
pub mod recognizer;
pub mod rules;
pub mod script;
pub mod stage;
pub mod word_order;

#[cfg(feature = "python")]
mod python;

pub use classify::{classify, DocumentType};
pub use cleaner::{clean, ArtifactCleaner};
pub use config::{DigitConfig, DigitScope, PipelineConfig, WordOrderConfig};
pub use document::{CorrectedDocument, DocumentMetadata, MultiPageDocument, RecognitionResult, PAGE_SEPARATOR};
pub use entities::{extract, EntityBag};
pub use error::{ConfigError, PipelineError, RecognizerError, StageError};
pub use finalize::finalize;
pub use inversion::fix_inversions;
pub use ligature::repair_ligatures;
pub use misrecognition::{correct_misrecognitions, MisrecognitionCorrector};
pub use pipeline::{run_ocr_correction_pipeline, Pipeline};
pub use recognizer::{recognize_document, EngineOutput, PageImage, TextRecognizer};
pub use script::{analyze, LanguageTag, ScriptProfile};
pub use stage::{CorrectionStage, StageKind};
pub use word_order::{fix_word_order, WordOrderCorrector, WordOrderDecision};
