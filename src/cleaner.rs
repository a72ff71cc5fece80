//! Removal of OCR artifacts: presentation forms, control characters,
//! noise symbols and excess whitespace.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::rules::{apply_rules, Rule};
use crate::script::analyze;

/// Literal marker the layout step leaves where a signature was detected.
/// It is never treated as bracket noise.
pub const SIGNATURE_MARKER: &str = "[Signature]";

lazy_static! {
    // Two tiers; the second re-collapses what the first leaves, so every
    // horizontal run ends on a single space.
    static ref ARABIC_SPACING: Vec<Rule> = vec![
        Rule::new("gap-4+", r"[^\S\n]{4,}", "  "),
        Rule::new("gap-2-3", r"[^\S\n]{2,3}", " "),
    ];

    static ref LATIN_SPACING: Vec<Rule> = vec![
        Rule::new("gap-2+", r"[^\S\n]{2,}", " "),
        Rule::new("line-edges", r"[^\S\n]*\n[^\S\n]*", "\n"),
    ];

    static ref BLANK_LINES: Regex = Regex::new(r"\n(?:[^\S\n]*\n){2,}").unwrap();
}

/// Arabic-block symbols OCR reads as ASCII punctuation, and pure noise.
fn denylist_substitute(c: char) -> Option<Option<char>> {
    match c {
        '|' => Some(Some('ل')),
        ']' => Some(Some('ي')),
        '[' => Some(Some('ب')),
        '{' => Some(Some('ج')),
        '}' => Some(Some('ح')),
        '`' => Some(Some('ء')),
        '~' => Some(Some('ن')),
        '@' | '#' | '$' | '%' => Some(None),
        _ => None,
    }
}

fn is_presentation_form(c: char) -> bool {
    matches!(c, '\u{FB50}'..='\u{FDFF}' | '\u{FE70}'..='\u{FEFE}')
}

/// Fold Arabic presentation forms to their base letters (NFKC) and drop
/// byte-order marks. Everything else passes through untouched.
pub fn fold_presentation_forms(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\u{FEFF}' {
            continue;
        }
        if is_presentation_form(c) {
            out.extend(std::iter::once(c).nfkc());
        } else {
            out.push(c);
        }
    }
    out
}

/// Strip C0 and C1 controls. Tab and line feed are kept; carriage
/// returns go, so CRLF input ends up LF.
pub fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|&c| {
            let code = c as u32;
            let control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
            !control || c == '\n' || c == '\t'
        })
        .collect()
}

fn substitute_noise_segment(segment: &str, out: &mut String) {
    for c in segment.chars() {
        match denylist_substitute(c) {
            Some(Some(replacement)) => out.push(replacement),
            Some(None) => {}
            None => out.push(c),
        }
    }
}

/// Replace the noise denylist, leaving signature markers intact.
pub fn substitute_noise(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pieces = text.split(SIGNATURE_MARKER).peekable();
    while let Some(piece) = pieces.next() {
        substitute_noise_segment(piece, &mut out);
        if pieces.peek().is_some() {
            out.push_str(SIGNATURE_MARKER);
        }
    }
    out
}

fn collapse_whitespace(text: &str, arabic_heavy: bool) -> String {
    let rules: &[Rule] = if arabic_heavy {
        &ARABIC_SPACING
    } else {
        &LATIN_SPACING
    };
    let (collapsed, _) = apply_rules(text, rules);
    BLANK_LINES.replace_all(&collapsed, "\n\n").into_owned()
}

/// Whitespace and control-character cleanup only. Used on Latin-dominant
/// pages, which must not see any Arabic-specific rewrite.
pub fn clean_whitespace(text: &str) -> String {
    collapse_whitespace(&strip_controls(text), false)
}

/// Artifact cleaning with configurable script gates.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactCleaner {
    /// Ratio strictly above which the Arabic spacing tiers apply.
    pub spacing_ratio: f64,
    /// Ratio at or above which the noise denylist is substituted.
    pub denylist_ratio: f64,
}

impl Default for ArtifactCleaner {
    fn default() -> Self {
        Self {
            spacing_ratio: 0.5,
            denylist_ratio: 0.1,
        }
    }
}

impl ArtifactCleaner {
    pub fn new(spacing_ratio: f64, denylist_ratio: f64) -> Self {
        Self {
            spacing_ratio,
            denylist_ratio,
        }
    }

    pub fn clean(&self, text: &str) -> String {
        let stripped = strip_controls(&fold_presentation_forms(text));
        let profile = analyze(&stripped);

        let substituted = if profile.ratio >= self.denylist_ratio {
            substitute_noise(&stripped)
        } else {
            stripped
        };

        let arabic_heavy = profile.ratio > self.spacing_ratio;
        tracing::debug!(ratio = profile.ratio, arabic_heavy, "artifact cleaning");
        collapse_whitespace(&substituted, arabic_heavy)
    }
}

/// [`ArtifactCleaner::clean`] with the default gates.
pub fn clean(text: &str) -> String {
    ArtifactCleaner::default().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_controls_keeps_newlines_and_tabs() {
        assert_eq!(strip_controls("a\u{0000}b\r\nc\td\u{0085}"), "ab\nc\td");
    }

    #[test]
    fn test_arabic_double_space_collapses() {
        assert_eq!(clean("الجمهورية  الجزائرية"), "الجمهورية الجزائرية");
        assert_eq!(clean("من      في"), "من في");
    }

    #[test]
    fn test_latin_spacing_trims_line_edges() {
        assert_eq!(clean("Article 1 :   texte  \n   suite"), "Article 1 : texte\nsuite");
    }

    #[test]
    fn test_blank_lines_collapse_to_two() {
        assert_eq!(clean("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean("من\n \n \n \nفي"), "من\n\nفي");
    }

    #[test]
    fn test_denylist_applies_to_arabic_text() {
        assert_eq!(clean("ا|جزائر"), "الجزائر");
        assert_eq!(clean("وزارة @# العدل"), "وزارة العدل");
    }

    #[test]
    fn test_denylist_skipped_for_latin_text() {
        let text = "Taux: 50% [voir annexe] | total @ 3";
        assert_eq!(clean(text), text);
    }

    #[test]
    fn test_signature_marker_survives_denylist() {
        assert_eq!(clean("الوزير [Signature] |"), "الوزير [Signature] ل");
    }

    #[test]
    fn test_presentation_forms_fold() {
        // lam-alef ligature and isolated beh
        assert_eq!(fold_presentation_forms("\u{FEFB}\u{FE8F}"), "لاب");
        assert_eq!(fold_presentation_forms("\u{FEFF}abc"), "abc");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let fixtures = [
            "",
            "   ",
            "الجمهورية     الجزائرية\n\n\n\nرقم  07-20",
            "Décret  exécutif   N° 21-45 \n\n\n Article 1 :",
            "وزارة @  العدل | ]  [ \t\t سطر",
            "mix عربي  and   latin %% text\r\n\r\n\r\nend",
            "\u{FEFB} \u{FE70}  ب",
            "a @ b @ c الجزائر $ د",
        ];
        for t in fixtures {
            let once = clean(t);
            assert_eq!(clean(&once), once, "not idempotent for {t:?}");
        }
    }

    #[test]
    fn test_clean_whitespace_leaves_arabic_symbols() {
        assert_eq!(clean_whitespace("a  |  b\u{0007}"), "a | b");
    }
}
