//! Ordered regex rewrite tables shared by the correction stages.

use regex::Regex;

/// Character class for Arabic letters (hamza through yeh, plus the extended
/// letters used in Maghrebi text). Tatweel and harakat are excluded.
pub const ARABIC_LETTER: &str = r"[\x{0621}-\x{063A}\x{0641}-\x{064A}\x{0671}-\x{06D3}]";

/// One rewrite in a table. `replacement` uses `${n}` group references.
pub struct Rule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl Rule {
    /// Compile a table rule. Table patterns are literals, so a failure here
    /// is a programming error caught by the module tests.
    pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }
}

/// Apply every rule of `rules` in order, each one against the output of the
/// previous. Returns the rewritten text and the number of matches replaced.
pub fn apply_rules(text: &str, rules: &[Rule]) -> (String, u64) {
    let mut result = text.to_string();
    let mut total_subs: u64 = 0;

    for rule in rules {
        let count = rule.pattern.find_iter(&result).count();
        if count > 0 {
            result = rule
                .pattern
                .replace_all(&result, rule.replacement)
                .into_owned();
            total_subs += count as u64;
        }
    }

    (result, total_subs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let rules = vec![Rule::new("a-to-b", "a", "b"), Rule::new("b-to-c", "b", "c")];
        // the second rule sees the first one's output
        assert_eq!(apply_rules("ab", &rules), ("cc".to_string(), 3));
    }

    #[test]
    fn test_no_match_is_untouched() {
        let rules = vec![Rule::new("x", "x", "y")];
        assert_eq!(apply_rules("abc", &rules), ("abc".to_string(), 0));
    }

    #[test]
    fn test_arabic_letter_class() {
        let re = Regex::new(&format!("^{ARABIC_LETTER}+$")).unwrap();
        assert!(re.is_match("إلىالجزائرية"));
        assert!(!re.is_match("ـ"));
        assert!(!re.is_match("a"));
    }
}
