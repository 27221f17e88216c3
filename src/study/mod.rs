//! Annotation studies
//!
//! A study joins one corpus's human annotations to its automated-method
//! outputs and scores them. Computation lives here; formatting lives in
//! [`crate::report`].

mod join;
mod summary;

pub use join::{join_method_tables, join_tables, MethodTables, ResolutionReport};
pub use summary::{AgreementSummary, CodingSetReport, MethodAgreement, MethodScores, UnitOverlap};

use crate::config::{CorpusConfig, StudyConfig};
use crate::distribution::CrossCorpusReport;
use crate::error::{AgreementError, AgreementResult};
use crate::identifier::UnitId;
use crate::label::RankedLabels;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Origin of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Human1,
    Human2,
    Embedding,
    Lexicon,
}

impl Source {
    pub const METHODS: [Source; 2] = [Source::Embedding, Source::Lexicon];
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Source::Human1 => "H1",
            Source::Human2 => "H2",
            Source::Embedding => "Embedding",
            Source::Lexicon => "Lexicon",
        };
        f.pad(name)
    }
}

/// All labels for one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Text the unit belongs to, when units are numbered per text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub unit: UnitId,
    pub human1: RankedLabels,
    pub human2: RankedLabels,
    pub embedding: Option<String>,
    pub lexicon: Option<String>,
}

impl ComparisonRow {
    /// `"Thirukkural 12"` for a per-text unit, `"12"` otherwise.
    pub fn unit_label(&self) -> String {
        match &self.text {
            Some(text) => format!("{} {}", text, self.unit),
            None => self.unit.to_string(),
        }
    }

    /// Primary label from `source`, if present.
    pub fn label(&self, source: Source) -> Option<&str> {
        match source {
            Source::Human1 => self.human1.primary(),
            Source::Human2 => self.human2.primary(),
            Source::Embedding => self.embedding.as_deref(),
            Source::Lexicon => self.lexicon.as_deref(),
        }
    }
}

/// Joined rows of one corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub corpus: String,
    pub rows: Vec<ComparisonRow>,
    /// Automated methods the method table carries a column for
    pub methods: Vec<Source>,
    pub resolution: ResolutionReport,
}

impl ComparisonTable {
    /// Index-aligned labels from `source`, one per row.
    pub fn labels(&self, source: Source) -> Vec<Option<&str>> {
        self.rows.iter().map(|row| row.label(source)).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Results of a whole study file
#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    pub corpora: Vec<AgreementSummary>,
    pub codings: Vec<CodingSetReport>,
    pub cross_corpus: Option<CrossCorpusReport>,
}

impl StudyReport {
    /// Summary of the corpus named `name`.
    pub fn corpus(&self, name: &str) -> AgreementResult<&AgreementSummary> {
        self.corpora
            .iter()
            .find(|summary| summary.corpus == name)
            .ok_or_else(|| AgreementError::UnknownSource(format!("corpus '{}'", name)))
    }
}

/// Join a configured corpus.
pub fn build_comparison_table(corpus: &CorpusConfig) -> AgreementResult<ComparisonTable> {
    let resolver = corpus.identifier.resolver(&corpus.human_rows)?;
    join_method_tables(
        &corpus.name,
        &corpus.human_rows,
        corpus.method_tables(),
        resolver.as_ref(),
        &corpus.human,
        &corpus.method,
    )
}

/// Score corpora and coding sets, without the cross-corpus comparison.
///
/// With `corpus` set only that corpus is scored and coding sets are left
/// out; an unknown name is an [`AgreementError::UnknownSource`].
pub fn run_agreement(config: &StudyConfig, corpus: Option<&str>) -> AgreementResult<StudyReport> {
    if let Some(name) = corpus {
        if !config.corpora.iter().any(|c| c.name == name) {
            return Err(AgreementError::UnknownSource(format!("corpus '{}'", name)));
        }
    }

    let corpora = config
        .corpora
        .iter()
        .filter(|c| corpus.map_or(true, |name| name == c.name))
        .map(|c| AgreementSummary::compute(&build_comparison_table(c)?))
        .collect::<AgreementResult<Vec<_>>>()?;

    let codings = if corpus.is_some() {
        Vec::new()
    } else {
        config
            .codings
            .iter()
            .map(CodingSetReport::compute)
            .collect::<AgreementResult<Vec<_>>>()?
    };

    Ok(StudyReport {
        corpora,
        codings,
        cross_corpus: None,
    })
}

/// Score every corpus, coding set and the cross-corpus distributions.
pub fn run_study(config: &StudyConfig) -> AgreementResult<StudyReport> {
    let mut report = run_agreement(config, None)?;
    if !config.distributions.is_empty() {
        report.cross_corpus = Some(CrossCorpusReport::compute(&config.distributions)?);
    }

    info!(
        corpora = report.corpora.len(),
        coding_sets = report.codings.len(),
        distributions = config.distributions.len(),
        "study complete"
    );
    Ok(report)
}
