//! Document category detection from keywords in either script.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    DecretExecutif,
    Arrete,
    Ordonnance,
    Loi,
    Circulaire,
    Instruction,
    Decision,
    /// Decree reference without a category keyword.
    Decret,
    LegalDocument,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::DecretExecutif => "Décret Exécutif",
            DocumentType::Arrete => "Arrêté",
            DocumentType::Ordonnance => "Ordonnance",
            DocumentType::Loi => "Loi",
            DocumentType::Circulaire => "Circulaire",
            DocumentType::Instruction => "Instruction",
            DocumentType::Decision => "Décision",
            DocumentType::Decret => "Décret",
            DocumentType::LegalDocument => "Legal Document",
        }
    }

    pub fn is_decree(&self) -> bool {
        matches!(self, DocumentType::DecretExecutif | DocumentType::Decret)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for DocumentType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

struct Category {
    kind: DocumentType,
    /// Matched against the accent-folded, uppercased text.
    latin: Regex,
    arabic: Option<&'static str>,
}

fn category(kind: DocumentType, latin: &str, arabic: Option<&'static str>) -> Category {
    Category {
        kind,
        latin: Regex::new(latin).unwrap(),
        arabic,
    }
}

lazy_static! {
    // Priority order: the first category found wins.
    static ref CATEGORIES: Vec<Category> = vec![
        category(DocumentType::DecretExecutif, r"\bDECRET\s+EXECUTIF\b", Some("مرسوم تنفيذي")),
        category(DocumentType::Arrete, r"\bARRETE\b", None),
        category(DocumentType::Ordonnance, r"\bORDONNANCE\b", Some("أمر")),
        category(DocumentType::Loi, r"\bLOI\s+N°", Some("قانون")),
        category(DocumentType::Circulaire, r"\bCIRCULAIRE\b", Some("منشور")),
        category(DocumentType::Instruction, r"\bINSTRUCTION\b", Some("تعليمة")),
        category(DocumentType::Decision, r"\bDECISION\b", Some("قرار")),
    ];
}

/// Uppercase and strip accents, so `Décret` and OCR's `DECRET` compare equal.
pub fn fold_latin(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

pub fn classify(text: &str) -> DocumentType {
    let folded = fold_latin(text);
    CATEGORIES
        .iter()
        .find(|c| c.latin.is_match(&folded) || c.arabic.is_some_and(|k| text.contains(k)))
        .map(|c| c.kind)
        .unwrap_or(DocumentType::LegalDocument)
}
