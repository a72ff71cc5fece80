//! End-to-end orchestration of the correction stages.
//!
//! The orchestrator is the only caller of the stages and owns the text
//! buffer threaded through them. Stage order is fixed:
//!
//! ```text
//! analyze -> clean -> ligatures -> misrecognitions -> inversions
//!         -> word order (Arabic-dominant pages only) -> finalize
//!         -> extract entities -> classify
//! ```
//!
//! Pages below the Latin threshold only get whitespace cleanup before
//! extraction.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::classify::{classify, DocumentType};
use crate::cleaner::{clean_whitespace, ArtifactCleaner};
use crate::config::PipelineConfig;
use crate::document::{CorrectedDocument, DocumentMetadata, MultiPageDocument, RecognitionResult, PAGE_SEPARATOR};
use crate::entities::{extract, EntityBag};
use crate::misrecognition::MisrecognitionCorrector;
use crate::script::{analyze, detect_language};
use crate::stage::{
    CleanerStage, CorrectionStage, FinalizerStage, InversionStage, LigatureStage,
    MisrecognitionStage, StageKind, WordOrderStage,
};
use crate::word_order::{WordOrderCorrector, WordOrderDecision};

/// What happened to the text on its way through the stages.
#[derive(Default)]
struct StageReport {
    degraded: Vec<&'static str>,
    decisions: Vec<WordOrderDecision>,
}

pub struct Pipeline {
    config: PipelineConfig,
    stages: Vec<(StageKind, Box<dyn CorrectionStage>)>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let stages = StageKind::ORDER
            .iter()
            .map(|&kind| (kind, Self::builtin_stage(kind, &config)))
            .collect();
        Self { config, stages }
    }

    fn builtin_stage(kind: StageKind, config: &PipelineConfig) -> Box<dyn CorrectionStage> {
        match kind {
            StageKind::Cleaner => Box::new(CleanerStage(ArtifactCleaner::new(
                config.arabic_spacing_ratio,
                config.latin_skip_ratio,
            ))),
            StageKind::Ligatures => Box::new(LigatureStage),
            StageKind::Misrecognition => {
                Box::new(MisrecognitionStage(MisrecognitionCorrector::new(config.digits)))
            }
            StageKind::Inversion => Box::new(InversionStage),
            StageKind::WordOrder => Box::new(WordOrderStage(WordOrderCorrector::new(
                config.word_order.line_share,
            ))),
            StageKind::Finalizer => Box::new(FinalizerStage),
        }
    }

    /// Replace the stage at `kind`, keeping its position in the order.
    pub fn with_stage(mut self, kind: StageKind, stage: Box<dyn CorrectionStage>) -> Self {
        if let Some(slot) = self.stages.iter_mut().find(|(k, _)| *k == kind) {
            slot.1 = stage;
        }
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn word_order_applies(&self, text: &str) -> bool {
        self.config.word_order.enabled
            && analyze(text).ratio > self.config.word_order.document_ratio
    }

    /// Run one stage, falling back to its input if it fails or panics.
    fn run_stage(stage: &dyn CorrectionStage, text: String, report: &mut StageReport) -> String {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| stage.apply_with_decisions(&text)));
        match outcome {
            Ok(Ok((corrected, decisions))) => {
                report.decisions.extend(decisions);
                corrected
            }
            Ok(Err(e)) => {
                warn!(stage = stage.name(), error = %e, "stage failed, forwarding its input");
                report.degraded.push(stage.name());
                text
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                warn!(stage = stage.name(), error = %message, "stage panicked, forwarding its input");
                report.degraded.push(stage.name());
                text
            }
        }
    }

    fn correct(&self, raw_text: &str, report: &mut StageReport) -> String {
        let mut text = raw_text.to_string();
        for (kind, stage) in &self.stages {
            if *kind == StageKind::WordOrder && !self.word_order_applies(&text) {
                debug!("word order correction skipped");
                continue;
            }
            text = Self::run_stage(stage.as_ref(), text, report);
        }
        text.trim().to_string()
    }

    /// Correct, classify and annotate one page.
    pub fn run(&self, result: &RecognitionResult) -> CorrectedDocument {
        let start = Instant::now();
        let script_profile = analyze(&result.raw_text);
        let mut report = StageReport::default();

        let text = if script_profile.ratio < self.config.latin_skip_ratio {
            debug!(ratio = script_profile.ratio, "latin-dominant page, whitespace cleanup only");
            clean_whitespace(&result.raw_text).trim().to_string()
        } else {
            self.correct(&result.raw_text, &mut report)
        };

        let (document_type, entities) = annotate(&text);
        let metadata = metadata_for(&text);
        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            page = result.page_number,
            language = %script_profile.language_tag,
            ratio = script_profile.ratio,
            document_type = %document_type,
            degraded = report.degraded.len(),
            reversed_lines = report.decisions.len(),
            elapsed_ms = processing_time_ms,
            "page corrected"
        );

        CorrectedDocument {
            text,
            script_profile,
            document_type,
            entities,
            processing_time_ms,
            confidence: result.confidence,
            page_number: result.page_number,
            metadata,
            degraded_stages: report.degraded,
            word_order_decisions: report.decisions,
        }
    }

    /// Run every page independently (in parallel) and reassemble them by
    /// page number.
    pub fn run_pages(&self, results: &[RecognitionResult]) -> MultiPageDocument {
        let start = Instant::now();
        let mut ordered: Vec<&RecognitionResult> = results.iter().collect();
        ordered.sort_by_key(|r| r.page_number);

        let pages: Vec<CorrectedDocument> = ordered.par_iter().map(|r| self.run(r)).collect();

        let text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);
        let average_confidence = if pages.is_empty() {
            0.0
        } else {
            pages.iter().map(|p| p.confidence).sum::<f64>() / pages.len() as f64
        };
        let (document_type, entities) = annotate(&text);

        MultiPageDocument {
            pages,
            text,
            average_confidence,
            document_type,
            entities,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Entities and category of corrected text. A bare decree number with no
/// category keyword still marks the document as a decree.
fn annotate(text: &str) -> (DocumentType, EntityBag) {
    let entities = extract(text);
    let mut document_type = classify(text);
    if document_type == DocumentType::LegalDocument && entities.decret_number.is_some() {
        document_type = DocumentType::Decret;
    }
    (document_type, entities)
}

fn metadata_for(text: &str) -> DocumentMetadata {
    let profile = analyze(text);
    DocumentMetadata {
        total_characters: text.chars().count(),
        arabic_characters: profile.arabic_letter_count,
        latin_characters: profile.latin_letter_count,
        word_count: text.split_whitespace().count(),
        processing_mode: profile.language_tag.processing_mode(),
        detected_language: detect_language(text),
    }
}

/// Run the default pipeline on one page of raw OCR text.
///
/// Assumes recognition already happened: engine or rasterizer failures
/// belong to the caller. `confidence` may be given on the engine's 0-100
/// scale; values above 1 are read as percentages.
pub fn run_ocr_correction_pipeline(raw_text: &str, confidence: f64) -> CorrectedDocument {
    let result = if confidence > 1.0 {
        RecognitionResult::from_engine(raw_text, confidence, 1)
    } else {
        RecognitionResult::new(raw_text, confidence, 1)
    };
    Pipeline::default().run(&result)
}
