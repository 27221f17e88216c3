//! Agreement summary of one corpus

use super::{ComparisonTable, Source};
use crate::agreement::{
    cohen_kappa, compare_granularities, match_rate, matches_any_rate, pattern_kappa,
    valid_subset, GranularityComparison, MatchRate, PatternKappa, Proportion, Statistic,
};
use crate::config::CodingSetConfig;
use crate::error::AgreementResult;
use crate::identifier::UnitId;
use crate::label::{ranked_overlap, Granularity, RankedOverlap};
use serde::Serialize;
use tracing::{debug, warn};

/// One automated method scored against both annotators at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodScores {
    pub granularity: Granularity,
    pub vs_human1: MatchRate,
    pub vs_human2: MatchRate,
    pub vs_either: MatchRate,
    pub kappa_human1: Statistic,
    pub kappa_human2: Statistic,
    pub mean_kappa: Statistic,
    /// `mean_kappa / human kappa` at the same granularity
    pub human_reliability_share: Statistic,
}

/// One automated method, both granularities.
///
/// Valid subset: units where both annotators and the method have a label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodAgreement {
    pub method: Source,
    pub valid: usize,
    pub exact: MethodScores,
    pub base: MethodScores,
}

/// A unit where the annotators' primaries disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitOverlap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub unit: UnitId,
    pub human1: Option<String>,
    pub human2: Option<String>,
    pub overlap: RankedOverlap,
}

/// Everything scored for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementSummary {
    pub corpus: String,
    pub table: ComparisonTable,
    /// H1 vs H2 over units where both annotated
    pub human_baseline: GranularityComparison,
    pub methods: Vec<MethodAgreement>,
    pub disagreements: Vec<UnitOverlap>,
}

impl UnitOverlap {
    pub fn unit_label(&self) -> String {
        match &self.text {
            Some(text) => format!("{} {}", text, self.unit),
            None => self.unit.to_string(),
        }
    }
}

impl AgreementSummary {
    pub fn compute(table: &ComparisonTable) -> AgreementResult<Self> {
        let h1 = table.labels(Source::Human1);
        let h2 = table.labels(Source::Human2);
        let human_baseline = compare_granularities(&h1, &h2)?;

        let mut methods = Vec::new();
        for &method in &table.methods {
            let labels = table.labels(method);
            let valid = valid_subset(&[&h1[..], &h2[..], &labels[..]])?;
            if valid.is_empty() {
                warn!(
                    corpus = %table.corpus,
                    %method,
                    "no unit has both annotations and a method label, not scored"
                );
                continue;
            }
            methods.push(score_method(method, &valid, &h1, &h2, &labels, &human_baseline)?);
        }

        let disagreements = table
            .rows
            .iter()
            .filter_map(|row| {
                let overlap = ranked_overlap(&row.human1, &row.human2)?;
                (!overlap.primary_exact).then(|| UnitOverlap {
                    text: row.text.clone(),
                    unit: row.unit,
                    human1: row.human1.primary().map(str::to_string),
                    human2: row.human2.primary().map(str::to_string),
                    overlap,
                })
            })
            .collect();

        Ok(Self {
            corpus: table.corpus.clone(),
            table: table.clone(),
            human_baseline,
            methods,
            disagreements,
        })
    }

    pub fn method(&self, source: Source) -> Option<&MethodAgreement> {
        self.methods.iter().find(|m| m.method == source)
    }
}

/// Score `method` over the non-empty `valid` row subset.
fn score_method(
    method: Source,
    valid: &[usize],
    h1: &[Option<&str>],
    h2: &[Option<&str>],
    labels: &[Option<&str>],
    human: &GranularityComparison,
) -> AgreementResult<MethodAgreement> {
    let pick = |seq: &[Option<&str>]| -> Vec<Option<String>> {
        valid.iter().map(|&i| seq[i].map(str::to_string)).collect()
    };
    let (h1, h2, labels) = (pick(h1), pick(h2), pick(labels));

    let scores = |granularity: Granularity| -> AgreementResult<MethodScores> {
        let kappa_human1 = cohen_kappa(&labels, &h1, granularity)?;
        let kappa_human2 = cohen_kappa(&labels, &h2, granularity)?;
        let mean_kappa = Statistic::mean(&[&kappa_human1, &kappa_human2]);
        let human_reliability_share = mean_kappa.ratio(&human.at(granularity).kappa);
        Ok(MethodScores {
            granularity,
            vs_human1: match_rate(&labels, &h1, granularity)?,
            vs_human2: match_rate(&labels, &h2, granularity)?,
            vs_either: matches_any_rate(&labels, &h1, &h2, granularity)?,
            kappa_human1,
            kappa_human2,
            mean_kappa,
            human_reliability_share,
        })
    };

    let result = MethodAgreement {
        method,
        valid: valid.len(),
        exact: scores(Granularity::Exact)?,
        base: scores(Granularity::Base)?,
    };
    debug!(%method, valid = result.valid, "method scored");
    Ok(result)
}

/// Equivalence rates and pattern kappas for one coding set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodingSetReport {
    pub name: String,
    pub rates: Vec<(String, Proportion)>,
    pub pattern_kappas: Vec<PatternKappa>,
}

impl CodingSetReport {
    pub fn compute(config: &CodingSetConfig) -> AgreementResult<Self> {
        let mut rates = Vec::new();
        for coding in &config.codings {
            let coding = coding.to_coding()?;
            rates.push((coding.name.clone(), coding.equivalence_rate()?));
        }

        let mut pattern_kappas = Vec::new();
        for (left, right) in &config.compare {
            pattern_kappas.push(pattern_kappa(&config.coding(left)?, &config.coding(right)?)?);
        }

        Ok(Self {
            name: config.name.clone(),
            rates,
            pattern_kappas,
        })
    }
}
