//! Arabic/Latin script ratio analysis.
//!
//! Every stage that branches on script calls [`analyze`] on the text it
//! was handed. Profiles are never carried from one stage to the next,
//! since the stages in between change letter counts.

use serde::Serialize;

/// Ratio strictly above which a span is tagged [`LanguageTag::Arabic`].
pub const ARABIC_TAG_RATIO: f64 = 0.7;
/// Ratio strictly above which a span is tagged [`LanguageTag::Mixed`].
pub const MIXED_TAG_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Arabic,
    Latin,
    Mixed,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Arabic => "arabic",
            LanguageTag::Latin => "latin",
            LanguageTag::Mixed => "mixed",
        }
    }

    /// Short engine-style code (`ara`, `fra`, `mixed`).
    pub fn iso_code(&self) -> &'static str {
        match self {
            LanguageTag::Arabic => "ara",
            LanguageTag::Latin => "fra",
            LanguageTag::Mixed => "mixed",
        }
    }

    /// Human-readable processing mode shown next to results.
    pub fn processing_mode(&self) -> &'static str {
        match self {
            LanguageTag::Arabic => "Arabe uniquement",
            LanguageTag::Latin => "Français uniquement",
            LanguageTag::Mixed => "Bilingue (Arabe + Français)",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Letter counts and the derived Arabic ratio of a text span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptProfile {
    pub arabic_letter_count: usize,
    pub latin_letter_count: usize,
    pub ratio: f64,
    pub language_tag: LanguageTag,
}

impl ScriptProfile {
    pub fn from_counts(arabic_letter_count: usize, latin_letter_count: usize) -> Self {
        let total = arabic_letter_count + latin_letter_count;
        let ratio = if total == 0 {
            0.0
        } else {
            arabic_letter_count as f64 / total as f64
        };

        Self {
            arabic_letter_count,
            latin_letter_count,
            ratio,
            language_tag: tag_for_ratio(ratio),
        }
    }
}

fn tag_for_ratio(ratio: f64) -> LanguageTag {
    if ratio > ARABIC_TAG_RATIO {
        LanguageTag::Arabic
    } else if ratio > MIXED_TAG_RATIO {
        LanguageTag::Mixed
    } else {
        LanguageTag::Latin
    }
}

/// Code point in one of the Arabic blocks (base, supplement, extended-A,
/// presentation forms A and B).
pub fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}' |
        '\u{0750}'..='\u{077F}' |
        '\u{08A0}'..='\u{08FF}' |
        '\u{FB50}'..='\u{FDFF}' |
        '\u{FE70}'..='\u{FEFF}'
    )
}

/// ASCII letter or accented Latin-1 letter (× and ÷ excluded).
pub fn is_latin_letter(c: char) -> bool {
    matches!(c,
        'A'..='Z' | 'a'..='z' |
        '\u{00C0}'..='\u{00D6}' |
        '\u{00D8}'..='\u{00F6}' |
        '\u{00F8}'..='\u{00FF}'
    )
}

/// Count Arabic and Latin letters in `text`.
pub fn analyze(text: &str) -> ScriptProfile {
    let (arabic, latin) = text.chars().fold((0usize, 0usize), |(a, l), c| {
        if is_arabic_char(c) {
            (a + 1, l)
        } else if is_latin_letter(c) {
            (a, l + 1)
        } else {
            (a, l)
        }
    });
    ScriptProfile::from_counts(arabic, latin)
}

/// Share of Arabic code points among the non-whitespace characters of a line.
pub fn line_arabic_share(line: &str) -> f64 {
    let (arabic, non_ws) = line
        .chars()
        .filter(|c| !c.is_whitespace())
        .fold((0usize, 0usize), |(a, n), c| {
            (a + usize::from(is_arabic_char(c)), n + 1)
        });
    if non_ws == 0 {
        0.0
    } else {
        arabic as f64 / non_ws as f64
    }
}

/// Statistical language guess, reported next to the script ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageGuess {
    pub code: &'static str,
    pub confidence: f64,
    pub reliable: bool,
}

pub fn detect_language(text: &str) -> Option<LanguageGuess> {
    whatlang::detect(text).map(|info| LanguageGuess {
        code: info.lang().code(),
        confidence: info.confidence(),
        reliable: info.is_reliable(),
    })
}
