use std::io::Write;

use rust_ocr_dz::{
    analyze, clean, classify, correct_misrecognitions, extract, repair_ligatures,
    run_ocr_correction_pipeline, CorrectionStage, DigitScope, DocumentType, LanguageTag, Pipeline,
    PipelineConfig, RecognitionResult, StageError, StageKind, PAGE_SEPARATOR,
};

const E2E_INPUT: &str = "الجمهورية  الجزائرية رقم 07-20 المؤرخ في 1 هـ 1441";

struct ThrowingLigatures;

impl CorrectionStage for ThrowingLigatures {
    fn name(&self) -> &'static str {
        "throwing_ligatures"
    }

    fn apply(&self, _text: &str) -> Result<String, StageError> {
        Err(StageError::new("throwing_ligatures", "unexpected glyph table"))
    }
}

#[test]
fn test_end_to_end_decree() {
    let doc = run_ocr_correction_pipeline(E2E_INPUT, 85.0);

    assert!(doc.document_type.is_decree());
    assert!(doc.document_type.label().contains("Décret"));
    assert_eq!(doc.script_profile.language_tag, LanguageTag::Arabic);
    assert!(!doc.text.contains("  "));
    assert!(doc.text.starts_with("الجمهورية الجزائرية"));
    assert_eq!(doc.text, "الجمهورية الجزائرية رقم ٠٧-٢٠ المؤرخ في ١ هـ ١٤٤١");
    assert_eq!(doc.entities.decret_number.as_deref(), Some("٠٧-٢٠"));
    assert!((doc.confidence - 0.85).abs() < 1e-9);
    assert_eq!(doc.page_number, 1);
    assert!(doc.degraded_stages.is_empty());
}

#[test]
fn test_document_json_shape() {
    let doc = run_ocr_correction_pipeline(E2E_INPUT, 85.0);
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["scriptProfile"]["languageTag"], "arabic");
    assert_eq!(json["documentType"], "Décret");
    assert_eq!(json["entities"]["decretNumber"], "٠٧-٢٠");
    assert_eq!(json["metadata"]["processingMode"], "Arabe uniquement");

    let fields = doc.to_form_fields();
    assert_eq!(fields["language"], "ara");
    assert_eq!(fields["decretNumber"], "٠٧-٢٠");
}

#[test]
fn test_failed_ligature_stage_leaves_cleaner_output() {
    let raw = "الجمهورية  م ن الجزائرية";
    let pipeline =
        Pipeline::default().with_stage(StageKind::Ligatures, Box::new(ThrowingLigatures));

    let doc = pipeline.run(&RecognitionResult::new(raw, 0.9, 1));

    assert_eq!(doc.text, clean(raw));
    assert_eq!(doc.degraded_stages, vec!["throwing_ligatures"]);
}

#[test]
fn test_clean_idempotent_on_mixed_pages() {
    let pages = [
        E2E_INPUT,
        "DÉCRET EXÉCUTIF N° 21-45  du 12 janvier 2021\n\n\n\nArticle 1 :   objet",
        "وزارة |  العدل ]  @ [Signature]  Le Ministre\r\n",
    ];
    for page in pages {
        let once = clean(page);
        assert_eq!(clean(&once), once);
    }
}

#[test]
fn test_ratio_boundaries() {
    let empty = analyze("");
    assert_eq!(empty.ratio, 0.0);
    assert_eq!(empty.language_tag, LanguageTag::Latin);

    let arabic = analyze("مرسوم");
    assert_eq!(arabic.ratio, 1.0);
    assert_eq!(arabic.language_tag, LanguageTag::Arabic);
}

#[test]
fn test_digit_substitution_follows_script() {
    let latin = "Le decret du mois de mai ب 2023";
    assert_eq!(correct_misrecognitions(latin), latin);

    let arabic = "سنة 2023 في بلدةx";
    assert_eq!(correct_misrecognitions(arabic), "سنة ٢٠٢٣ في بلدةx");
}

#[test]
fn test_ligature_cases() {
    assert_eq!(repair_ligatures("م ن"), "من");
    assert_eq!(repair_ligatures("ال ك"), "الك");
}

#[test]
fn test_french_entities() {
    let bag = extract("DÉCRET EXÉCUTIF N° 21-45 ... Article 1: ... [Signature] Le Ministre");
    assert_eq!(bag.decret_number.as_deref(), Some("21-45"));
    assert!(bag.articles.iter().any(|a| a.starts_with("Article 1")));
    assert!(bag.signatories.iter().any(|s| s.ends_with("Le Ministre")));
}

#[test]
fn test_type_priority() {
    assert_eq!(classify("Loi N° 90-11 et Arrêté"), DocumentType::Arrete);
    assert_eq!(classify("Arrêté et Décret exécutif"), DocumentType::DecretExecutif);
    assert_eq!(classify("Décision portant Instruction"), DocumentType::Instruction);
    assert_eq!(classify("Ordonnance et Arrêté"), DocumentType::Arrete);
    assert_eq!(classify("Loi N° 90-11 et Ordonnance"), DocumentType::Ordonnance);
    assert_eq!(classify("Circulaire et Loi N° 90-11"), DocumentType::Loi);
    assert_eq!(classify("Instruction et Circulaire"), DocumentType::Circulaire);
    assert_eq!(classify("منشور تطبيقا لقانون"), DocumentType::Loi);
}

#[test]
fn test_latin_page_is_only_whitespace_cleaned() {
    let doc = run_ocr_correction_pipeline("Taux  de 50% | total   2023", 0.7);
    assert_eq!(doc.text, "Taux de 50% | total 2023");
    assert_eq!(doc.script_profile.language_tag, LanguageTag::Latin);
    assert_eq!(doc.document_type, DocumentType::LegalDocument);
}

#[test]
fn test_pages_reassembled_in_order() {
    let pages = vec![
        RecognitionResult::new("Article 2 : champ", 0.6, 2),
        RecognitionResult::new("Article 1 : objet", 0.8, 1),
    ];
    let doc = Pipeline::default().run_pages(&pages);

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.pages[0].page_number, 1);
    assert_eq!(
        doc.text,
        format!("Article 1 : objet{PAGE_SEPARATOR}Article 2 : champ")
    );
    assert!((doc.average_confidence - 0.7).abs() < 1e-9);
    assert_eq!(doc.entities.articles, vec!["Article 1 :", "Article 2 :"]);
}

#[test]
fn test_config_file_line_scope() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[digits]\nscope = \"line\"").unwrap();

    let config = PipelineConfig::load(file.path()).unwrap();
    assert_eq!(config.digits.scope, DigitScope::Line);

    let text = "مرسوم رقم 12\nDécret N° 12";
    let doc = Pipeline::new(config).run(&RecognitionResult::new(text, 0.9, 1));
    assert_eq!(doc.text, "مرسوم رقم ١٢\nDécret N° 12");

    // document scope rewrites both lines, the page being majority Arabic
    let doc = Pipeline::default().run(&RecognitionResult::new(text, 0.9, 1));
    assert_eq!(doc.text, "مرسوم رقم ١٢\nDécret N° ١٢");
}

#[test]
fn test_config_file_digits_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.toml");
    std::fs::write(&path, "[digits]\nenabled = false\n").unwrap();

    let pipeline = Pipeline::new(PipelineConfig::load(&path).unwrap());
    let doc = pipeline.run(&RecognitionResult::new("سنة 2023 في الجزائر", 0.9, 1));
    assert_eq!(doc.text, "سنة 2023 في الجزائر");
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PipelineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, rust_ocr_dz::ConfigError::Read { .. }));
}
