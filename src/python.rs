//! Python bindings (`--features python`).

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyFloat, PyInt, PyList};

use crate::classify::classify;
use crate::entities::extract;
use crate::error::PipelineError;
use crate::pipeline::run_ocr_correction_pipeline as run_pipeline;
use crate::script::analyze;

fn py_type_label(obj: &Bound<'_, PyAny>) -> &'static str {
    if obj.is_none() {
        "None"
    } else if obj.is_instance_of::<PyInt>() {
        "int"
    } else if obj.is_instance_of::<PyFloat>() {
        "float"
    } else if obj.is_instance_of::<PyBytes>() {
        "bytes"
    } else if obj.is_instance_of::<PyList>() {
        "list"
    } else if obj.is_instance_of::<PyDict>() {
        "dict"
    } else {
        "object"
    }
}

fn text_arg(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    obj.extract::<String>().map_err(|_| {
        let err = PipelineError::InputType {
            found: py_type_label(obj),
        };
        PyTypeError::new_err(err.to_string())
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> PyResult<String> {
    serde_json::to_string(value)
        .map_err(|e| PyValueError::new_err(format!("Failed to serialize result: {}", e)))
}

/// Correct one page of raw OCR text. Returns the document as JSON.
#[pyfunction]
#[pyo3(signature = (raw_text, confidence=0.0))]
fn run_ocr_correction_pipeline(raw_text: &Bound<'_, PyAny>, confidence: f64) -> PyResult<String> {
    let text = text_arg(raw_text)?;
    if !confidence.is_finite() {
        return Err(PyValueError::new_err(
            PipelineError::InvalidConfidence(confidence).to_string(),
        ));
    }
    to_json(&run_pipeline(&text, confidence))
}

/// Returns (arabic_letter_count, latin_letter_count, ratio, language_tag).
#[pyfunction]
fn analyze_script(text: &Bound<'_, PyAny>) -> PyResult<(usize, usize, f64, String)> {
    let profile = analyze(&text_arg(text)?);
    Ok((
        profile.arabic_letter_count,
        profile.latin_letter_count,
        profile.ratio,
        profile.language_tag.as_str().to_string(),
    ))
}

#[pyfunction]
fn classify_document(text: &Bound<'_, PyAny>) -> PyResult<String> {
    Ok(classify(&text_arg(text)?).label().to_string())
}

/// Returns the entity bag as JSON.
#[pyfunction]
fn extract_entities(text: &Bound<'_, PyAny>) -> PyResult<String> {
    to_json(&extract(&text_arg(text)?))
}

#[pymodule]
fn rust_ocr_dz(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run_ocr_correction_pipeline, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_script, m)?)?;
    m.add_function(wrap_pyfunction!(classify_document, m)?)?;
    m.add_function(wrap_pyfunction!(extract_entities, m)?)?;
    Ok(())
}
