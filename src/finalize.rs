//! Last corrections tuned to Algerian official documents: dates, decree
//! markers, letterhead phrases and punctuation and bracket spacing.

use lazy_static::lazy_static;

use crate::rules::{apply_rules, Rule, ARABIC_LETTER};

lazy_static! {
    static ref FINAL_RULES: Vec<Rule> = {
        let gap = r"[^\S\n]+";
        let opt_gap = r"[^\S\n]*";
        vec![
            // hijri date: 12 هـ 1441
            Rule::new(
                "hijri-date",
                &format!(r"(\d+){opt_gap}هـ{opt_gap}(\d+)"),
                "${1} هـ ${2}",
            ),

            // letterhead phrases
            Rule::new(
                "joumhouria-djazairia",
                &format!(r"الجمهورية{gap}الجزائرية"),
                "الجمهورية الجزائرية",
            ),
            Rule::new("mouarrakh-fi", &format!(r"المؤرخ{gap}في"), "المؤرخ في"),

            // decree number markers
            Rule::new("raqm", &format!(r"رقم{opt_gap}(\d+)"), "رقم ${1}"),
            Rule::new("numero", &format!(r"(?i)\b(N°){opt_gap}(\d+)"), "${1} ${2}"),

            // French letterhead phrases, casing kept
            Rule::new(
                "republique-algerienne",
                &format!(r"(?i)\b(République){gap}(Algérienne)\b"),
                "${1} ${2}",
            ),
            Rule::new(
                "democratique-populaire",
                &format!(r"(?i)\b(Démocratique){gap}(et){gap}(Populaire)\b"),
                "${1} ${2} ${3}",
            ),
            Rule::new(
                "decret-executif",
                &format!(r"(?i)\b(Décret){gap}(Exécutif)\b"),
                "${1} ${2}",
            ),
            Rule::new(
                "journal-officiel",
                &format!(r"(?i)\b(Journal){gap}(Officiel)\b"),
                "${1} ${2}",
            ),

            // Arabic punctuation sits on the preceding word
            Rule::new("arabic-punct-before", r"[^\S\n]+([؟،؛])", "${1}"),

            // no padding inside guillemets or parentheses
            Rule::new("guillemet-open", r"«[^\S\n]+", "«"),
            Rule::new("guillemet-close", r"[^\S\n]+»", "»"),
            Rule::new("paren-open", r"\([^\S\n]+", "("),
            Rule::new("paren-close", r"[^\S\n]+\)", ")"),

            // line edges
            Rule::new("trailing-space", r"[^\S\n]+\n", "\n"),
            Rule::new("leading-space", r"\n[^\S\n]+", "\n"),

            // one space after sentence punctuation glued to a letter
            Rule::new(
                "punctuation-space",
                &format!(r"([.،؛!؟])({ARABIC_LETTER}|[A-Za-zÀ-ÖØ-öø-ÿ])"),
                "${1} ${2}",
            ),
        ]
    };
}

pub fn finalize(text: &str) -> String {
    let (finalized, subs) = apply_rules(text, &FINAL_RULES);
    tracing::debug!(subs, "dialect finalization");
    finalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hijri_date_spacing() {
        assert_eq!(finalize("1هـ1441"), "1 هـ 1441");
        assert_eq!(finalize("١٥   هـ ١٤٤١"), "١٥ هـ ١٤٤١");
    }

    #[test]
    fn test_institutional_phrases() {
        assert_eq!(finalize("الجمهورية   الجزائرية"), "الجمهورية الجزائرية");
        assert_eq!(finalize("المؤرخ \t في"), "المؤرخ في");
    }

    #[test]
    fn test_decree_markers() {
        assert_eq!(finalize("رقم07-20"), "رقم 07-20");
        assert_eq!(finalize("N°21-45"), "N° 21-45");
        assert_eq!(finalize("n°   7"), "n° 7");
    }

    #[test]
    fn test_french_phrases_keep_case() {
        assert_eq!(
            finalize("RÉPUBLIQUE   ALGÉRIENNE  DÉMOCRATIQUE  ET   POPULAIRE"),
            "RÉPUBLIQUE ALGÉRIENNE  DÉMOCRATIQUE ET POPULAIRE"
        );
        assert_eq!(finalize("Décret    exécutif"), "Décret exécutif");
    }

    #[test]
    fn test_line_edges_trimmed() {
        assert_eq!(finalize("سطر   \n   سطر"), "سطر\nسطر");
        assert_eq!(finalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_arabic_punctuation_and_brackets() {
        assert_eq!(
            finalize("الجزائر ، وزارة ( العدل ) « نص »"),
            "الجزائر، وزارة (العدل) «نص»"
        );
        assert_eq!(finalize("هل صدر ؟نعم"), "هل صدر؟ نعم");
        // a bracket opening a line keeps the line break
        assert_eq!(finalize("سطر\n( ملحق )"), "سطر\n(ملحق)");
    }

    #[test]
    fn test_space_after_punctuation() {
        assert_eq!(finalize("الجزائر.وزارة"), "الجزائر. وزارة");
        assert_eq!(finalize("نعم،لا"), "نعم، لا");
        assert_eq!(finalize("fin.Début"), "fin. Début");
        // decimals and existing spaces untouched
        assert_eq!(finalize("3.5 et. fin"), "3.5 et. fin");
    }
}
