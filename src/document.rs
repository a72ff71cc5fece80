//! Input and output records of the pipeline.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::classify::DocumentType;
use crate::entities::EntityBag;
use crate::error::PipelineError;
use crate::script::{LanguageGuess, ScriptProfile};
use crate::word_order::WordOrderDecision;

/// Separator placed between page texts when pages are reassembled.
pub const PAGE_SEPARATOR: &str = "\n\n--- PAGE SUIVANTE ---\n\n";

/// One page of raw engine output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionResult {
    pub raw_text: String,
    /// Average recognition confidence in [0, 1].
    pub confidence: f64,
    /// 1-based.
    pub page_number: u32,
}

impl RecognitionResult {
    pub fn new(raw_text: impl Into<String>, confidence: f64, page_number: u32) -> Self {
        Self {
            raw_text: raw_text.into(),
            confidence: normalize_unit(confidence),
            page_number: page_number.max(1),
        }
    }

    /// Build from engine output, whose confidence is on a 0-100 scale.
    pub fn from_engine(raw_text: impl Into<String>, confidence_percent: f64, page_number: u32) -> Self {
        Self::new(raw_text, confidence_percent / 100.0, page_number)
    }
}

fn normalize_unit(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Accepts `{"rawText": "...", "confidence": 0.85, "pageNumber": 1}`.
/// `confidence` and `pageNumber` are optional.
impl TryFrom<&Value> for RecognitionResult {
    type Error = PipelineError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let raw = value.get("rawText").unwrap_or(&Value::Null);
        let raw_text = raw.as_str().ok_or(PipelineError::InputType {
            found: json_type_name(raw),
        })?;

        let confidence = match value.get("confidence") {
            None | Some(Value::Null) => 0.0,
            Some(c) => {
                let c = c.as_f64().ok_or(PipelineError::InvalidConfidence(f64::NAN))?;
                if !c.is_finite() {
                    return Err(PipelineError::InvalidConfidence(c));
                }
                c
            }
        };

        let page_number = value
            .get("pageNumber")
            .and_then(Value::as_u64)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);

        Ok(Self::new(raw_text, confidence, page_number))
    }
}

/// Diagnostics computed on the corrected text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub total_characters: usize,
    pub arabic_characters: usize,
    pub latin_characters: usize,
    pub word_count: usize,
    pub processing_mode: &'static str,
    pub detected_language: Option<LanguageGuess>,
}

/// Corrected, classified and annotated page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectedDocument {
    pub text: String,
    /// Profile of the raw input text.
    pub script_profile: ScriptProfile,
    pub document_type: DocumentType,
    pub entities: EntityBag,
    pub processing_time_ms: f64,
    pub confidence: f64,
    pub page_number: u32,
    pub metadata: DocumentMetadata,
    /// Stages that failed and were skipped.
    pub degraded_stages: Vec<&'static str>,
    /// Lines whose word order was reversed.
    pub word_order_decisions: Vec<WordOrderDecision>,
}

impl CorrectedDocument {
    /// Flat key/value view for form auto-fill.
    pub fn to_form_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("documentType".into(), Value::from(self.document_type.label()));
        fields.insert("confidence".into(), Value::from(self.confidence));
        fields.insert(
            "language".into(),
            Value::from(self.script_profile.language_tag.iso_code()),
        );
        fields.insert("text".into(), Value::from(self.text.clone()));
        if let Ok(Value::Object(entities)) = serde_json::to_value(&self.entities) {
            fields.extend(entities);
        }
        fields.insert("processingTime".into(), Value::from(self.processing_time_ms));
        fields.insert("pageNumber".into(), Value::from(self.page_number));
        fields
    }
}

/// Pages reassembled in page-number order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiPageDocument {
    pub pages: Vec<CorrectedDocument>,
    pub text: String,
    pub average_confidence: f64,
    pub document_type: DocumentType,
    pub entities: EntityBag,
    pub processing_time_ms: f64,
}

impl MultiPageDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_confidence_normalized() {
        let result = RecognitionResult::from_engine("نص", 85.0, 1);
        assert!((result.confidence - 0.85).abs() < 1e-9);
        assert_eq!(RecognitionResult::from_engine("x", 250.0, 1).confidence, 1.0);
        assert_eq!(RecognitionResult::new("x", f64::NAN, 0).confidence, 0.0);
        assert_eq!(RecognitionResult::new("x", 0.5, 0).page_number, 1);
    }

    #[test]
    fn test_try_from_json() {
        let value = json!({"rawText": "مرسوم", "confidence": 0.9, "pageNumber": 3});
        let result = RecognitionResult::try_from(&value).unwrap();
        assert_eq!(result.raw_text, "مرسوم");
        assert_eq!(result.page_number, 3);
    }

    #[test]
    fn test_non_string_text_is_input_type_error() {
        let err = RecognitionResult::try_from(&json!({"rawText": 42})).unwrap_err();
        assert!(matches!(err, PipelineError::InputType { found: "number" }));

        let err = RecognitionResult::try_from(&json!({"confidence": 0.5})).unwrap_err();
        assert!(matches!(err, PipelineError::InputType { found: "null" }));
    }

    #[test]
    fn test_bad_confidence_rejected() {
        let err = RecognitionResult::try_from(&json!({"rawText": "a", "confidence": "high"}))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfidence(_)));
    }
}
