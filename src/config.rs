//! Study configuration
//!
//! A study file (YAML) describes the corpora to score, how each corpus
//! resolves unit identifiers, the tables themselves, optional cross-corpus
//! score vectors and optional equivalence codings. Everything that varies per
//! corpus lives here so the scoring code never guesses at column layouts.
//!
//! ```yaml
//! corpora:
//!   - name: kannada
//!     pattern_unreliable: true
//!     identifier:
//!       strategy: override
//!       positions: { 0: 81, 1: 16 }
//!     human_rows: [...]
//!     method_rows: [...]
//!   - name: tamil
//!     identifier: { strategy: column, candidates: [Unit_ID] }
//!     text_field: Text_Name
//!     human_rows: [...]
//!     method_tables:
//!       Thirukkural: [...]
//!       Aathichoodi: [...]
//! ```
//!
//! A corpus whose units are numbered per text gives `text_field` and one
//! method table per text under `method_tables` instead of `method_rows`.

use crate::agreement::EquivalenceCoding;
use crate::distribution::ScoreVector;
use crate::error::ConfigError;
use crate::identifier::{
    CandidateKeys, IdentifierResolver, OverrideTable, PatternExtraction,
};
use crate::study::MethodTables;
use crate::table::Table;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Identifier columns tried, in order, when none are configured.
pub const DEFAULT_ID_CANDIDATES: [&str; 6] = [
    "paragraph_num",
    "id",
    "couplet_num",
    "verse_num",
    "unit_num",
    "line_num",
];

/// Top-level study description
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudyConfig {
    #[serde(default)]
    pub corpora: Vec<CorpusConfig>,
    /// Aggregate score vectors for cross-corpus comparison
    #[serde(default)]
    pub distributions: Vec<ScoreVector>,
    #[serde(default)]
    pub codings: Vec<CodingSetConfig>,
}

/// One annotated corpus
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    pub name: String,
    /// Embedded numbers in this corpus's text cannot be trusted; the
    /// override table is used instead.
    #[serde(default)]
    pub pattern_unreliable: bool,
    #[serde(default)]
    pub human: HumanFields,
    pub identifier: IdentifierConfig,
    #[serde(default)]
    pub method: MethodFields,
    #[serde(default)]
    pub human_rows: Table,
    #[serde(default)]
    pub method_rows: Table,
    /// Human column naming the text a row belongs to
    #[serde(default)]
    pub text_field: Option<String>,
    /// Method output per text, keyed by the names `text_field` holds
    #[serde(default)]
    pub method_tables: BTreeMap<String, Table>,
}

/// Column names in the human-annotation table
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HumanFields {
    pub human1: String,
    pub human2: String,
}

impl Default for HumanFields {
    fn default() -> Self {
        Self {
            human1: "Human 1 Evaluation".to_string(),
            human2: "Human 2 Evaluation Ranked".to_string(),
        }
    }
}

/// Column names in the automated-method table
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MethodFields {
    /// Prioritized identifier columns; the first one present is used
    pub id_candidates: Vec<String>,
    pub embedding: String,
    pub lexicon: String,
}

impl Default for MethodFields {
    fn default() -> Self {
        Self {
            id_candidates: DEFAULT_ID_CANDIDATES.iter().map(|c| c.to_string()).collect(),
            embedding: "dominant_embedding".to_string(),
            lexicon: "dominant_lexicon".to_string(),
        }
    }
}

impl MethodFields {
    pub fn candidate_keys(&self) -> CandidateKeys {
        CandidateKeys::new(self.id_candidates.iter().cloned())
    }
}

/// How human-annotation rows find their unit identifier
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum IdentifierConfig {
    /// First number embedded in a text field
    Pattern { field: String },
    /// Explicit row position → identifier table
    Override { positions: BTreeMap<usize, u64> },
    /// Identifier column, chosen once from candidates
    Column { candidates: Vec<String> },
}

impl IdentifierConfig {
    /// Build the resolver for a human-annotation table.
    pub fn resolver(&self, human: &Table) -> Result<Box<dyn IdentifierResolver>, ConfigError> {
        match self {
            IdentifierConfig::Pattern { field } => Ok(Box::new(PatternExtraction::new(field))),
            IdentifierConfig::Override { positions } => Ok(Box::new(OverrideTable::new(
                positions.iter().map(|(p, id)| (*p, *id)),
            ))),
            IdentifierConfig::Column { candidates } => {
                let keys = CandidateKeys::new(candidates.iter().cloned());
                keys.resolver_for(human)
                    .map(|r| Box::new(r) as Box<dyn IdentifierResolver>)
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "human table has none of the identifier columns {:?}",
                            candidates
                        ))
                    })
            }
        }
    }
}

/// A set of equivalence codings and the pairs to compare
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodingSetConfig {
    pub name: String,
    pub codings: Vec<CodingConfig>,
    #[serde(default)]
    pub compare: Vec<(String, String)>,
}

/// One coding; `codes` are 1 (equivalent) or 0 (different)
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodingConfig {
    pub name: String,
    pub codes: Vec<u8>,
}

impl CodingConfig {
    pub fn to_coding(&self) -> Result<EquivalenceCoding, ConfigError> {
        let codes = self
            .codes
            .iter()
            .map(|c| match c {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(ConfigError::Invalid(format!(
                    "coding '{}' has code {}, expected 0 or 1",
                    self.name, other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EquivalenceCoding::new(&self.name, codes))
    }
}

impl StudyConfig {
    /// Parse and validate a YAML study.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: StudyConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML study file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for corpus in &self.corpora {
            if corpus.name.trim().is_empty() {
                return Err(ConfigError::Invalid("corpus with empty name".to_string()));
            }
            if !names.insert(corpus.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate corpus '{}'",
                    corpus.name
                )));
            }
            corpus.validate()?;
        }

        let mut names = HashSet::new();
        for vector in &self.distributions {
            if !names.insert(vector.name()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate distribution '{}'",
                    vector.name()
                )));
            }
        }

        for set in &self.codings {
            set.validate()?;
        }
        Ok(())
    }
}

impl CorpusConfig {
    /// The method output this corpus joins against.
    pub fn method_tables(&self) -> MethodTables<'_> {
        match &self.text_field {
            Some(field) => MethodTables::PerText {
                field,
                tables: &self.method_tables,
            },
            None => MethodTables::Single(&self.method_rows),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match (&self.identifier, self.pattern_unreliable) {
            (IdentifierConfig::Override { .. }, false) => {
                return Err(ConfigError::Invalid(format!(
                    "corpus '{}' uses an override table but is not flagged pattern_unreliable",
                    self.name
                )))
            }
            (IdentifierConfig::Override { positions }, true) if positions.is_empty() => {
                return Err(ConfigError::Invalid(format!(
                    "corpus '{}' has an empty override table",
                    self.name
                )))
            }
            (IdentifierConfig::Override { .. }, true) => {}
            (_, true) => {
                return Err(ConfigError::Invalid(format!(
                    "corpus '{}' is flagged pattern_unreliable but has no override table",
                    self.name
                )))
            }
            (IdentifierConfig::Pattern { field }, false) if field.trim().is_empty() => {
                return Err(ConfigError::Invalid(format!(
                    "corpus '{}' has an empty pattern field",
                    self.name
                )))
            }
            (IdentifierConfig::Column { candidates }, false) if candidates.is_empty() => {
                return Err(ConfigError::Invalid(format!(
                    "corpus '{}' has no identifier column candidates",
                    self.name
                )))
            }
            _ => {}
        }

        if self.method.id_candidates.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "corpus '{}' has no method id candidates",
                self.name
            )));
        }

        match &self.text_field {
            Some(field) if field.trim().is_empty() => Err(ConfigError::Invalid(format!(
                "corpus '{}' has an empty text_field",
                self.name
            ))),
            Some(_) if self.method_tables.is_empty() => Err(ConfigError::Invalid(format!(
                "corpus '{}' sets text_field but has no method_tables",
                self.name
            ))),
            Some(_) if !self.method_rows.is_empty() => Err(ConfigError::Invalid(format!(
                "corpus '{}' has both method_rows and method_tables",
                self.name
            ))),
            None if !self.method_tables.is_empty() => Err(ConfigError::Invalid(format!(
                "corpus '{}' has method_tables but no text_field to select them",
                self.name
            ))),
            _ => Ok(()),
        }
    }
}

impl CodingSetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for coding in &self.codings {
            if !names.insert(coding.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate coding '{}' in '{}'",
                    coding.name, self.name
                )));
            }
            coding.to_coding()?;
        }
        for (left, right) in &self.compare {
            for name in [left, right] {
                if !names.contains(name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "coding set '{}' compares unknown coding '{}'",
                        self.name, name
                    )));
                }
            }
        }
        Ok(())
    }

    /// The coding named `name`, converted.
    pub fn coding(&self, name: &str) -> Result<EquivalenceCoding, ConfigError> {
        self.codings
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown coding '{}'", name)))?
            .to_coding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STUDY: &str = r#"
corpora:
  - name: kannada
    pattern_unreliable: true
    identifier:
      strategy: override
      positions:
        0: 81
        1: 16
    human_rows:
      - "Text (Kannada)": "Paragraph 81"
        "Human 1 Evaluation": "care.virtue"
        "Human 2 Evaluation Ranked": "care.virtue"
    method_rows:
      - paragraph_num: 81
        dominant_embedding: care.virtue
  - name: tamil
    identifier:
      strategy: column
      candidates: [Unit_ID]
    method:
      id_candidates: [id, couplet_num]
distributions:
  - name: English_Aesop
    scores: [[care, 0.4], [fairness, 0.3]]
codings:
  - name: kannada_translation
    codings:
      - name: mt_vs_h1
        codes: [1, 0, 1]
      - name: mt_vs_h2
        codes: [1, 1, 1]
    compare:
      - [mt_vs_h1, mt_vs_h2]
"#;

    #[test]
    fn parses_full_study() {
        let study = StudyConfig::from_yaml_str(STUDY).unwrap();
        assert_eq!(study.corpora.len(), 2);

        let kannada = &study.corpora[0];
        assert!(kannada.pattern_unreliable);
        assert_eq!(kannada.human.human1, "Human 1 Evaluation");
        assert_eq!(kannada.method.embedding, "dominant_embedding");
        assert_eq!(kannada.human_rows.len(), 1);
        match &kannada.identifier {
            IdentifierConfig::Override { positions } => assert_eq!(positions.get(&1), Some(&16)),
            other => panic!("unexpected identifier config: {:?}", other),
        }

        let tamil = &study.corpora[1];
        assert_eq!(tamil.method.id_candidates, vec!["id", "couplet_num"]);
        assert_eq!(tamil.method.lexicon, "dominant_lexicon");

        assert_eq!(study.distributions[0].name(), "English_Aesop");
        assert_eq!(study.codings[0].coding("mt_vs_h2").unwrap().codes, vec![true; 3]);
    }

    #[test]
    fn override_requires_pattern_unreliable_flag() {
        let yaml = r#"
corpora:
  - name: kannada
    identifier:
      strategy: override
      positions: { 0: 81 }
"#;
        let err = StudyConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("pattern_unreliable")));
    }

    #[test]
    fn flagged_corpus_requires_override() {
        let yaml = r#"
corpora:
  - name: kannada
    pattern_unreliable: true
    identifier:
      strategy: pattern
      field: "Text (Kannada)"
"#;
        assert!(matches!(
            StudyConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn duplicate_corpus_names_are_rejected() {
        let yaml = r#"
corpora:
  - name: tamil
    identifier: { strategy: pattern, field: text }
  - name: tamil
    identifier: { strategy: pattern, field: text }
"#;
        assert!(matches!(
            StudyConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn non_binary_codes_are_rejected() {
        let yaml = r#"
codings:
  - name: tamil_translation
    codings:
      - name: h1_vs_h2
        codes: [1, 2]
"#;
        assert!(matches!(
            StudyConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn compare_must_name_known_codings() {
        let yaml = r#"
codings:
  - name: tamil_translation
    codings:
      - name: h1_vs_h2
        codes: [1, 0]
    compare:
      - [h1_vs_h2, mt_vs_h1]
"#;
        assert!(matches!(
            StudyConfig::from_yaml_str(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        assert!(matches!(
            StudyConfig::from_yaml_str("corpora: [unclosed"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(STUDY.as_bytes()).unwrap();
        let study = StudyConfig::load(file.path()).unwrap();
        assert_eq!(study.corpora[0].name, "kannada");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            StudyConfig::load("/nonexistent/study.yaml"),
            Err(ConfigError::Io(_))
        ));
    }

    const PER_TEXT: &str = r#"
corpora:
  - name: tamil
    identifier: { strategy: column, candidates: [Unit_ID] }
    text_field: Text_Name
    human_rows:
      - { Text_Name: Thirukkural, Unit_ID: 1, "Human 1 Evaluation": care.virtue }
    method_tables:
      Thirukkural:
        - { couplet_num: 1, dominant_embedding: care.virtue }
      Aathichoodi:
        - { verse_num: 1, dominant_embedding: loyalty.vice }
"#;

    #[test]
    fn parses_per_text_method_tables() {
        let study = StudyConfig::from_yaml_str(PER_TEXT).unwrap();
        let tamil = &study.corpora[0];
        assert_eq!(tamil.text_field.as_deref(), Some("Text_Name"));
        assert_eq!(tamil.method_tables.len(), 2);
        assert!(tamil.method_rows.is_empty());
        assert!(matches!(
            tamil.method_tables(),
            MethodTables::PerText { field: "Text_Name", .. }
        ));
    }

    #[test]
    fn per_text_tables_need_a_text_field() {
        let yaml = PER_TEXT.replace("    text_field: Text_Name\n", "");
        let err = StudyConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("text_field")));
    }

    #[test]
    fn text_field_excludes_method_rows() {
        let yaml = format!(
            "{}    method_rows:\n      - {{ couplet_num: 1, dominant_embedding: care.virtue }}\n",
            PER_TEXT
        );
        let err = StudyConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("both")));
    }

    #[test]
    fn column_resolver_needs_a_present_column() {
        let config = IdentifierConfig::Column {
            candidates: vec!["Unit_ID".to_string()],
        };
        assert!(config.resolver(&Table::new()).is_err());
    }
}
