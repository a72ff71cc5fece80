//! Repair of Arabic words the recognizer split at disconnected glyphs.
//!
//! The table runs top to bottom. The definite-article rule comes first so
//! ال-prefixed words are settled before the broken-word and generic rules
//! see them.

use lazy_static::lazy_static;

use crate::rules::{apply_rules, Rule, ARABIC_LETTER};

lazy_static! {
    static ref LIGATURE_RULES: Vec<Rule> = {
        let gap = r"[^\S\n]+";
        let opt_gap = r"[^\S\n]*";
        vec![
            // definite article
            Rule::new(
                "article-al",
                &format!(r"\bال{gap}({ARABIC_LETTER})"),
                "ال${1}",
            ),

            // high-frequency words segmented into single letters
            Rule::new(
                "marsoum",
                &format!(r"\bم{gap}ر{gap}س{gap}و{gap}م\b"),
                "مرسوم",
            ),
            Rule::new(
                "yuhaddid",
                &format!(r"\bي{gap}ح{gap}د{gap}د\b"),
                "يحدد",
            ),
            Rule::new(
                "allah",
                &format!(r"\b(?:ا{opt_gap}ل{gap}ل|ال{opt_gap}ل){gap}ه\b"),
                "الله",
            ),
            Rule::new("lillah", &format!(r"\bل{gap}ل{gap}ه\b"), "لله"),
            Rule::new("ala", &format!(r"\bع{gap}ل{gap}ى\b"), "على"),
            Rule::new("ila", &format!(r"\bإ{gap}ل{gap}ى\b"), "إلى"),
            Rule::new("min", &format!(r"\bم{gap}ن\b"), "من"),
            Rule::new("fi", &format!(r"\bف{gap}ي\b"), "في"),

            // isolated letters that belong to a neighbouring word
            Rule::new(
                "heh-fragment",
                &format!(r"\bه{gap}({ARABIC_LETTER})"),
                "ه${1}",
            ),
            Rule::new(
                "teh-marbuta",
                &format!(r"({ARABIC_LETTER}){gap}ة\b"),
                "${1}ة",
            ),
            Rule::new(
                "yeh-hamza",
                &format!(r"({ARABIC_LETTER}){gap}ئ\b"),
                "${1}ئ",
            ),
        ]
    };
}

/// Rejoin split Arabic graphemes and words.
pub fn repair_ligatures(text: &str) -> String {
    let (repaired, subs) = apply_rules(text, &LIGATURE_RULES);
    tracing::debug!(subs, "ligature repair");
    repaired
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_min_rejoins() {
        assert_eq!(repair_ligatures("م ن"), "من");
    }

    #[test]
    fn test_definite_article_joins() {
        assert_eq!(repair_ligatures("ال ك"), "الك");
        assert_eq!(repair_ligatures("ال جمهورية"), "الجمهورية");
    }

    #[test]
    fn test_article_rule_needs_word_start() {
        // "رجال" ends in ال but is a complete word
        assert_eq!(repair_ligatures("رجال الدولة"), "رجال الدولة");
    }

    #[test]
    fn test_broken_words() {
        assert_eq!(repair_ligatures("م ر س و م تنفيذي"), "مرسوم تنفيذي");
        assert_eq!(repair_ligatures("ي ح د د"), "يحدد");
        assert_eq!(repair_ligatures("ع ل ى"), "على");
        assert_eq!(repair_ligatures("إ ل ى"), "إلى");
        assert_eq!(repair_ligatures("ف ي"), "في");
    }

    #[test]
    fn test_allah_variants() {
        assert_eq!(repair_ligatures("ا ل ل ه"), "الله");
        assert_eq!(repair_ligatures("ال ل ه"), "الله");
        assert_eq!(repair_ligatures("ل ل ه"), "لله");
    }

    #[test]
    fn test_words_ending_in_min_letters_untouched() {
        assert_eq!(repair_ligatures("السلام نحن"), "السلام نحن");
    }

    #[test]
    fn test_isolated_letters_join() {
        assert_eq!(repair_ligatures("ه ذا"), "هذا");
        assert_eq!(repair_ligatures("الجمهوري ة"), "الجمهورية");
        assert_eq!(repair_ligatures("مسا ئ"), "مسائ");
    }

    #[test]
    fn test_no_join_across_lines() {
        assert_eq!(repair_ligatures("م\nن"), "م\nن");
    }

    #[test]
    fn test_hijri_marker_untouched() {
        assert_eq!(repair_ligatures("في 1 هـ 1441"), "في 1 هـ 1441");
    }

    #[test]
    fn test_latin_text_untouched() {
        let text = "Le Ministre de la Justice";
        assert_eq!(repair_ligatures(text), text);
    }

    #[test]
    fn test_repair_is_deterministic() {
        let text = "ال ك م ن ف ي";
        assert_eq!(repair_ligatures(text), repair_ligatures(text));
        assert_eq!(repair_ligatures(text), "الك من في");
    }
}
