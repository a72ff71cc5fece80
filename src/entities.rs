//! Structured fields pulled out of corrected legal text.
//!
//! Each field is matched independently; the first match wins for the
//! scalar fields. Patterns use Unicode `\d`, so numbers are still found
//! after the digits were rewritten to Arabic-indic.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub const MAX_ARTICLES: usize = 20;
pub const MAX_SIGNATORIES: usize = 10;

/// Extracted document fields. Absent scalars stay `None`, never `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decret_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_hijri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_gregorian: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    pub articles: Vec<String>,
    pub signatories: Vec<String>,
}

impl EntityBag {
    pub fn is_empty(&self) -> bool {
        self.decret_number.is_none()
            && self.date_hijri.is_none()
            && self.date_gregorian.is_none()
            && self.institution.is_none()
            && self.articles.is_empty()
            && self.signatories.is_empty()
    }
}

lazy_static! {
    static ref DECREE_NUMBER: Regex =
        Regex::new(r"(?i)(?:D[ÉE]CRET\s+EX[ÉE]CUTIF\s+N°\s*|رقم\s*)(\d+-\d+|\d+/\d+)").unwrap();

    static ref HIJRI_DATE: Regex =
        Regex::new(r"(\d+\s+[\x{0600}-\x{06FF}]+\s+\d{4}|\d+\s*هـ\s*\d{4})").unwrap();

    static ref GREGORIAN_DATE: Regex = Regex::new(
        r"(?i)\b(\d{1,2}(?:er)?\s+(?:janvier|février|fevrier|mars|avril|mai|juin|juillet|août|aout|septembre|octobre|novembre|décembre|decembre)\s+\d{4})"
    )
    .unwrap();

    // Tried in order, first hit wins.
    static ref INSTITUTION: Vec<Regex> = vec![
        Regex::new(r"(?i)(Ministère[^.]*\.)").unwrap(),
        Regex::new(r"(?i)(République\s+Algérienne[^.]*\.)").unwrap(),
        Regex::new(r"(وزارة[^.]*\.)").unwrap(),
        Regex::new(r"(الجمهورية\s+الجزائرية[^.]*\.)").unwrap(),
    ];

    static ref ARTICLE: Regex =
        Regex::new(r"(?i)(?:\bArticle\s+\d+|المادة\s+\d+)[^:\n]*:").unwrap();

    // A title right before the marker, or right after it. Never crosses a line.
    static ref SIGNATORY: Regex = Regex::new(
        r"(?i)(?:(\bL[ea][^\S\n]+[\w ]+|الوزير[\w ]*|رئيس[\w ]*)\[Signature\]|\[Signature\][^\S\n]*(\bL[ea][^\S\n]+[\w ]+|الوزير[\w ]*|رئيس[\w ]*))"
    )
    .unwrap();
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

pub fn extract(text: &str) -> EntityBag {
    let decret_number = first_group(&DECREE_NUMBER, text);
    let date_hijri = first_group(&HIJRI_DATE, text);
    let date_gregorian = first_group(&GREGORIAN_DATE, text);
    let institution = INSTITUTION.iter().find_map(|re| first_group(re, text));

    let articles = ARTICLE
        .find_iter(text)
        .take(MAX_ARTICLES)
        .map(|m| m.as_str().trim().to_string())
        .collect();

    let signatories = SIGNATORY
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .take(MAX_SIGNATORIES)
        .collect();

    EntityBag {
        decret_number,
        date_hijri,
        date_gregorian,
        institution,
        articles,
        signatories,
    }
}
