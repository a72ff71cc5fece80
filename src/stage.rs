//! The correction stages as interchangeable pipeline steps.

use crate::cleaner::ArtifactCleaner;
use crate::error::StageError;
use crate::finalize::finalize;
use crate::inversion::fix_inversions;
use crate::ligature::repair_ligatures;
use crate::misrecognition::MisrecognitionCorrector;
use crate::word_order::{WordOrderCorrector, WordOrderDecision};

/// Position of a stage in the fixed pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Cleaner,
    Ligatures,
    Misrecognition,
    Inversion,
    WordOrder,
    Finalizer,
}

impl StageKind {
    pub const ORDER: [StageKind; 6] = [
        StageKind::Cleaner,
        StageKind::Ligatures,
        StageKind::Misrecognition,
        StageKind::Inversion,
        StageKind::WordOrder,
        StageKind::Finalizer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKind::Cleaner => "artifact_cleaner",
            StageKind::Ligatures => "ligature_repairer",
            StageKind::Misrecognition => "misrecognition_corrector",
            StageKind::Inversion => "rtl_inversion_fixer",
            StageKind::WordOrder => "word_order_corrector",
            StageKind::Finalizer => "dialect_finalizer",
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A text-to-text correction step.
///
/// Stages must not keep the text they are given. An `Err` (or a panic)
/// makes the pipeline skip the stage and pass its input on unchanged.
pub trait CorrectionStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str) -> Result<String, StageError>;

    /// Like [`apply`](Self::apply), also reporting any line reversed on the
    /// way. Only the word-order stage has something to report.
    fn apply_with_decisions(
        &self,
        text: &str,
    ) -> Result<(String, Vec<WordOrderDecision>), StageError> {
        self.apply(text).map(|corrected| (corrected, Vec::new()))
    }
}

pub struct CleanerStage(pub ArtifactCleaner);

impl CorrectionStage for CleanerStage {
    fn name(&self) -> &'static str {
        StageKind::Cleaner.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(self.0.clean(text))
    }
}

pub struct LigatureStage;

impl CorrectionStage for LigatureStage {
    fn name(&self) -> &'static str {
        StageKind::Ligatures.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(repair_ligatures(text))
    }
}

pub struct MisrecognitionStage(pub MisrecognitionCorrector);

impl CorrectionStage for MisrecognitionStage {
    fn name(&self) -> &'static str {
        StageKind::Misrecognition.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(self.0.correct(text))
    }
}

pub struct InversionStage;

impl CorrectionStage for InversionStage {
    fn name(&self) -> &'static str {
        StageKind::Inversion.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(fix_inversions(text))
    }
}

pub struct WordOrderStage(pub WordOrderCorrector);

impl CorrectionStage for WordOrderStage {
    fn name(&self) -> &'static str {
        StageKind::WordOrder.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(self.0.apply(text).0)
    }

    fn apply_with_decisions(
        &self,
        text: &str,
    ) -> Result<(String, Vec<WordOrderDecision>), StageError> {
        Ok(self.0.apply(text))
    }
}

pub struct FinalizerStage;

impl CorrectionStage for FinalizerStage {
    fn name(&self) -> &'static str {
        StageKind::Finalizer.as_str()
    }

    fn apply(&self, text: &str) -> Result<String, StageError> {
        Ok(finalize(text))
    }
}
