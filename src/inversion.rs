//! Separator insertion between runs of different scripts.
//!
//! The recognizer's segmentation glues digits and uppercase Latin runs onto
//! neighbouring Arabic letters. Splitting them is mechanical and needs no
//! script-ratio gate.

use lazy_static::lazy_static;

use crate::rules::{apply_rules, Rule};

// Arabic letters plus tatweel, so "هـ1441" splits too.
const ARABIC_RUN: &str = r"[\x{0621}-\x{064A}\x{0671}-\x{06D3}]";
const UPPER_LATIN: &str = r"[A-ZÀ-ÖØ-Þ]";

lazy_static! {
    static ref INVERSION_RULES: Vec<Rule> = vec![
        Rule::new(
            "digits-inside-arabic",
            &format!(r"({ARABIC_RUN})(\d+)({ARABIC_RUN})"),
            "${1} ${2} ${3}",
        ),
        Rule::new("digits-then-arabic", &format!(r"(\d+)({ARABIC_RUN})"), "${1} ${2}"),
        Rule::new("arabic-then-digits", &format!(r"({ARABIC_RUN})(\d+)"), "${1} ${2}"),
        Rule::new(
            "upper-then-arabic",
            &format!(r"({UPPER_LATIN}+)({ARABIC_RUN})"),
            "${1} ${2}",
        ),
        Rule::new(
            "arabic-then-upper",
            &format!(r"({ARABIC_RUN})({UPPER_LATIN}+)"),
            "${1} ${2}",
        ),
    ];
}

pub fn fix_inversions(text: &str) -> String {
    let (fixed, subs) = apply_rules(text, &INVERSION_RULES);
    tracing::debug!(subs, "rtl inversion fix");
    fixed
}
