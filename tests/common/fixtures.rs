//! Small annotated corpora shaped like the real study inputs
//!
//! Kannada paragraphs carry unreliable embedded numbers and are joined
//! through an override table; Tamil couplets carry an id column.

use moral_agreement::{Record, Table};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

const H1: &str = "Human 1 Evaluation";
const H2: &str = "Human 2 Evaluation Ranked";

fn human_row(text: &str, h1: Option<&str>, h2: Option<&str>) -> Record {
    Record::new(0)
        .with_field("Text (Kannada)", text)
        .with_field(H1, h1)
        .with_field(H2, h2)
}

/// Ten annotated paragraphs. Row 9's text has no number.
pub fn kannada_human() -> Table {
    vec![
        human_row("Paragraph 3: ...", Some("care.virtue\nfairness.vice"), Some("care.virtue")),
        human_row("Paragraph 1: ...", Some("loyalty.vice"), Some("loyalty.vice")),
        human_row("Paragraph 7: ...", Some("authority.virtue"), Some("authority.vice")),
        human_row("Paragraph 2: ...", Some("sanctity.vice"), Some("sanctity.vice")),
        human_row("Paragraph 9: ...", Some("fairness.virtue"), Some("care.virtue, fairness.virtue")),
        human_row("Paragraph 4: ...", Some("care.vice"), Some("care.vice")),
        human_row("Paragraph 6: ...", Some("liberty.virtue"), None),
        human_row("Paragraph 5: ...", Some("loyalty.virtue"), Some("loyalty.virtue")),
        human_row("Paragraph 8: ...", Some("sanctity.virtue"), Some("care.virtue")),
        human_row("ಕಥೆಯ ಅಂತ್ಯ", Some("care.virtue"), Some("care.virtue")),
    ]
    .into_iter()
    .collect()
}

/// Method output keyed by `paragraph_num`; unit 210 has no human row.
pub fn kannada_method() -> Table {
    let rows = [
        (81, Some("care.virtue"), Some("care.virtue")),
        (16, Some("loyalty.vice"), None),
        (183, Some("authority.vice"), Some("fairness.vice")),
        (160, Some("sanctity.virtue"), Some("sanctity.vice")),
        (148, Some("fairness.virtue"), None),
        (102, Some("care.vice"), Some("care.vice")),
        (72, Some("liberty.vice"), None),
        (41, Some("loyalty.virtue"), Some("loyalty.virtue")),
        (60, Some("care.virtue"), Some("sanctity.virtue")),
        (206, Some("care.virtue"), None),
        (210, Some("care.vice"), None),
    ];
    rows.into_iter()
        .map(|(id, emb, lex)| {
            Record::new(0)
                .with_field("paragraph_num", id as i64)
                .with_field("dominant_embedding", emb)
                .with_field("dominant_lexicon", lex)
        })
        .collect()
}

/// Tamil couplets with an explicit id column.
pub fn tamil_human() -> Table {
    let rows = [
        (1, "care.virtue", "care.virtue"),
        (2, "fairness.virtue", "fairness.virtue"),
        (3, "authority.virtue", "loyalty.virtue"),
        (4, "sanctity.virtue", "sanctity.virtue"),
    ];
    rows.into_iter()
        .map(|(id, h1, h2)| {
            Record::new(0)
                .with_field("couplet_num", id as i64)
                .with_field(H1, h1)
                .with_field(H2, h2)
        })
        .collect()
}

/// Tamil method output keyed by `couplet_num`, embedding only.
pub fn tamil_method() -> Table {
    let rows = [
        (1, "care.virtue"),
        (2, "fairness.vice"),
        (3, "loyalty.virtue"),
        (4, "sanctity.virtue"),
    ];
    rows.into_iter()
        .map(|(id, emb)| {
            Record::new(0)
                .with_field("couplet_num", id as i64)
                .with_field("dominant_embedding", emb)
        })
        .collect()
}

/// A complete study: two corpora, one coding set, three score vectors.
pub fn study_yaml() -> String {
    r#"
corpora:
  - name: kannada
    pattern_unreliable: true
    identifier:
      strategy: override
      positions: { 0: 81, 1: 16, 2: 183, 3: 160, 4: 148, 5: 102, 6: 72, 7: 41, 8: 60, 9: 206 }
    human_rows:
      - { "Text (Kannada)": "Paragraph 3", "Human 1 Evaluation": "care.virtue\nfairness.vice", "Human 2 Evaluation Ranked": "care.virtue" }
      - { "Text (Kannada)": "Paragraph 1", "Human 1 Evaluation": "loyalty.vice", "Human 2 Evaluation Ranked": "loyalty.vice" }
      - { "Text (Kannada)": "Paragraph 7", "Human 1 Evaluation": "authority.virtue", "Human 2 Evaluation Ranked": "authority.vice" }
    method_rows:
      - { paragraph_num: 81, dominant_embedding: care.virtue, dominant_lexicon: care.virtue }
      - { paragraph_num: 16, dominant_embedding: loyalty.vice, dominant_lexicon: null }
      - { paragraph_num: 183, dominant_embedding: authority.vice, dominant_lexicon: fairness.vice }
  - name: tamil
    identifier:
      strategy: column
      candidates: [couplet_num]
    method:
      id_candidates: [verse_num, couplet_num]
    human_rows:
      - { couplet_num: 1, "Human 1 Evaluation": care.virtue, "Human 2 Evaluation Ranked": care.virtue }
      - { couplet_num: 2, "Human 1 Evaluation": fairness.virtue, "Human 2 Evaluation Ranked": loyalty.virtue }
    method_rows:
      - { couplet_num: 1, dominant_embedding: care.virtue }
      - { couplet_num: 2, dominant_embedding: fairness.virtue }
codings:
  - name: translation
    codings:
      - { name: mt_vs_h1, codes: [1, 1, 0, 1, 0, 1, 1, 1, 0, 1] }
      - { name: mt_vs_h2, codes: [1, 0, 0, 1, 0, 1, 1, 1, 1, 1] }
    compare:
      - [mt_vs_h1, mt_vs_h2]
distributions:
  - name: english
    scores: [[care, 0.31], [fairness, 0.22], [loyalty, 0.12], [authority, 0.18], [sanctity, 0.09]]
  - name: thirukkural
    scores: [[care, 0.28], [fairness, 0.25], [loyalty, 0.10], [authority, 0.21], [sanctity, 0.07]]
  - name: aathichudi
    scores: [[care, 0.12], [fairness, 0.15], [loyalty, 0.30], [authority, 0.08], [sanctity, 0.26]]
"#
    .to_string()
}

/// Tamil texts whose unit numbers restart per text, pooled into one corpus,
/// beside a small Kannada corpus.
pub fn tamil_texts_yaml() -> String {
    r#"
corpora:
  - name: kannada
    identifier: { strategy: pattern, field: "Text (Kannada)" }
    human_rows:
      - { "Text (Kannada)": "ಪ್ಯಾರಾ ೧೬", "Human 1 Evaluation": loyalty.vice, "Human 2 Evaluation Ranked": loyalty.vice }
      - { "Text (Kannada)": "Paragraph 81", "Human 1 Evaluation": care.virtue, "Human 2 Evaluation Ranked": fairness.vice }
    method_rows:
      - { paragraph_num: 81, dominant_embedding: care.virtue }
      - { paragraph_num: 16, dominant_embedding: loyalty.vice }
  - name: tamil
    identifier: { strategy: column, candidates: [Unit_ID] }
    text_field: Text_Name
    human_rows:
      - { Text_Name: Thirukkural, Unit_ID: 1, "Human 1 Evaluation": care.virtue, "Human 2 Evaluation Ranked": care.virtue }
      - { Text_Name: Thirukkural, Unit_ID: 2, "Human 1 Evaluation": fairness.virtue, "Human 2 Evaluation Ranked": fairness.virtue }
      - { Text_Name: Aathichoodi, Unit_ID: 1, "Human 1 Evaluation": loyalty.vice, "Human 2 Evaluation Ranked": loyalty.vice }
      - { Text_Name: Aathichoodi, Unit_ID: 2, "Human 1 Evaluation": authority.virtue, "Human 2 Evaluation Ranked": care.virtue }
      - { Text_Name: Moothurai, Unit_ID: 1, "Human 1 Evaluation": care.vice, "Human 2 Evaluation Ranked": care.vice }
    method_tables:
      Thirukkural:
        - { couplet_num: 1, dominant_embedding: care.virtue }
        - { couplet_num: 2, dominant_embedding: fairness.virtue }
      Aathichoodi:
        - { verse_num: 1, dominant_embedding: loyalty.vice }
        - { verse_num: 2, dominant_embedding: sanctity.vice }
codings:
  - name: translation
    codings:
      - { name: mt_vs_h1, codes: [1, 0, 1] }
"#
    .to_string()
}

/// Write `yaml` to a study file inside a fresh temporary directory.
pub fn write_study(yaml: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("study.yaml");
    let mut file = std::fs::File::create(&path).expect("create study file");
    file.write_all(yaml.as_bytes()).expect("write study file");
    (dir, path)
}
