//! Correction of systematic OCR confusions.
//!
//! One ordered table. Entries run one after the other and later entries
//! see what earlier ones produced: the literal garbles must run before the
//! digit rules, since some of them contain digits (`E33a`).

use lazy_static::lazy_static;

use crate::config::{DigitConfig, DigitScope};
use crate::rules::{Rule, ARABIC_LETTER};
use crate::script::analyze;

/// When a table entry is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Only where the governing span is majority Arabic.
    ArabicMajority,
}

pub struct Substitution {
    pub rule: Rule,
    pub gate: Gate,
    /// Re-applied until nothing matches. Needed where neighbouring matches
    /// share a letter, since one regex pass never overlaps them.
    pub until_stable: bool,
}

fn always(name: &'static str, pattern: &str, replacement: &'static str) -> Substitution {
    Substitution {
        rule: Rule::new(name, pattern, replacement),
        gate: Gate::Always,
        until_stable: false,
    }
}

fn digit(latin: char, arabic_indic: &'static str) -> Substitution {
    Substitution {
        rule: Rule::new("digit", &latin.to_string(), arabic_indic),
        gate: Gate::ArabicMajority,
        until_stable: false,
    }
}

lazy_static! {
    pub static ref MISRECOGNITION_TABLE: Vec<Substitution> = vec![
        // Latin garbles the engine produces for Algerian letterhead phrases
        always("garble-joumhouria", r"\bAS\s+élu\b", "الجمهورية"),
        always("garble-djazairia", r"\bE33a\b", "الجزائرية"),
        always("garble-mouarrakh", r"\bLace\s+phil\b", "المؤرخ في"),
        always("garble-mouafiq", r"\bApaahiis\b", "الموافق"),
        always("garble-rajab", r"\bRu\s+plume\s+Lune\b", "من شهر رجب"),
        always("garble-li", r"\by\s+Vé\s+appaall\b", "لـ"),

        // Latin l/I read inside an Arabic word is lam. In "بlبlب" the
        // matches share the middle letter, hence the repeat.
        Substitution {
            rule: Rule::new(
                "latin-lam",
                &format!(r"({ARABIC_LETTER})[lI]({ARABIC_LETTER})"),
                "${1}ل${2}",
            ),
            gate: Gate::Always,
            until_stable: true,
        },

        digit('0', "٠"),
        digit('1', "١"),
        digit('2', "٢"),
        digit('3', "٣"),
        digit('4', "٤"),
        digit('5', "٥"),
        digit('6', "٦"),
        digit('7', "٧"),
        digit('8', "٨"),
        digit('9', "٩"),
    ];
}

fn apply_one(text: &str, entry: &Substitution, subs: &mut u64) -> String {
    let rule = &entry.rule;
    let mut current = text.to_string();
    loop {
        let count = rule.pattern.find_iter(&current).count();
        if count == 0 {
            break;
        }
        *subs += count as u64;
        current = rule.pattern.replace_all(&current, rule.replacement).into_owned();
        if !entry.until_stable {
            break;
        }
    }
    current
}

/// Applies [`MISRECOGNITION_TABLE`] with a configurable digit gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisrecognitionCorrector {
    digits: DigitConfig,
}

impl MisrecognitionCorrector {
    pub fn new(digits: DigitConfig) -> Self {
        Self { digits }
    }

    fn gated_allowed(&self, span: &str) -> bool {
        self.digits.enabled && analyze(span).ratio > self.digits.threshold
    }

    /// The gate is decided on the span as it is when a gated entry runs,
    /// since earlier entries may rewrite or merge lines.
    pub fn correct(&self, text: &str) -> String {
        let mut result = text.to_string();
        let mut subs: u64 = 0;

        for entry in MISRECOGNITION_TABLE.iter() {
            result = match (entry.gate, self.digits.scope) {
                (Gate::Always, _) => apply_one(&result, entry, &mut subs),
                (Gate::ArabicMajority, DigitScope::Document) => {
                    if self.gated_allowed(&result) {
                        apply_one(&result, entry, &mut subs)
                    } else {
                        result
                    }
                }
                (Gate::ArabicMajority, DigitScope::Line) => result
                    .split('\n')
                    .map(|line| {
                        if self.gated_allowed(line) {
                            apply_one(line, entry, &mut subs)
                        } else {
                            line.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
        }

        tracing::debug!(subs, scope = ?self.digits.scope, "misrecognition correction");
        result
    }
}

/// [`MisrecognitionCorrector::correct`] with the default digit gate.
pub fn correct_misrecognitions(text: &str) -> String {
    MisrecognitionCorrector::default().correct(text)
}
