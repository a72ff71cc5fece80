//! Heuristic repair of RTL lines whose words came out in reverse order.
//!
//! This misfires on legitimate lines that open with a numeral, so every
//! reversal is logged and the stage can be switched off in the config.

use serde::Serialize;

use crate::script::line_arabic_share;

const SENTENCE_PUNCTUATION: [char; 5] = ['.', '،', '؛', '!', '؟'];

/// A line that was reversed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOrderDecision {
    pub line: usize,
    pub original: String,
    pub reversed: String,
}

fn starts_with_digit(token: &str) -> bool {
    token.chars().next().is_some_and(|c| {
        c.is_ascii_digit() || matches!(c, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
    })
}

fn ends_with_arabic_letter(token: &str) -> bool {
    token
        .chars()
        .next_back()
        .is_some_and(|c| matches!(c, '\u{0621}'..='\u{063A}' | '\u{0641}'..='\u{064A}'))
}

fn ends_with_punctuation(token: &str) -> bool {
    token.ends_with(SENTENCE_PUNCTUATION)
}

fn starts_with_punctuation(token: &str) -> bool {
    token.starts_with(SENTENCE_PUNCTUATION)
}

fn looks_inverted(first: &str, last: &str) -> bool {
    let numeral_first =
        starts_with_digit(first) && ends_with_arabic_letter(last) && !ends_with_punctuation(first);
    let sentence_end_first = ends_with_punctuation(first) && !starts_with_punctuation(last);
    numeral_first || sentence_end_first
}

#[derive(Debug, Clone, Copy)]
pub struct WordOrderCorrector {
    /// Arabic share strictly above which a line is examined.
    pub line_share: f64,
}

impl Default for WordOrderCorrector {
    fn default() -> Self {
        Self { line_share: 0.8 }
    }
}

impl WordOrderCorrector {
    pub fn new(line_share: f64) -> Self {
        Self { line_share }
    }

    /// Reverse the lines that look inverted, returning every decision made.
    pub fn apply(&self, text: &str) -> (String, Vec<WordOrderDecision>) {
        let mut decisions = Vec::new();

        let lines: Vec<String> = text
            .split('\n')
            .enumerate()
            .map(|(index, line)| {
                if line_arabic_share(line) <= self.line_share {
                    return line.to_string();
                }
                let mut words: Vec<&str> = line.split_whitespace().collect();
                if words.len() < 2 {
                    return line.to_string();
                }
                let (first, last) = (words[0], words[words.len() - 1]);
                if !looks_inverted(first, last) {
                    return line.to_string();
                }

                words.reverse();
                let reversed = words.join(" ");
                tracing::info!(line = index, original = line, reversed = %reversed, "word order reversed");
                decisions.push(WordOrderDecision {
                    line: index,
                    original: line.to_string(),
                    reversed: reversed.clone(),
                });
                reversed
            })
            .collect();

        (lines.join("\n"), decisions)
    }
}

/// [`WordOrderCorrector::apply`] with the default line share, text only.
pub fn fix_word_order(text: &str) -> String {
    WordOrderCorrector::default().apply(text).0
}
