//! Cross-corpus comparison
//!
//! Pairwise Spearman and Jensen-Shannon results over a set of named score
//! vectors, plus the matrices and per-corpus distributions that plots use.

use super::divergence::{jensen_shannon, to_distribution, JensenShannon};
use super::spearman::{average_ranks, spearman, RankOrder, SpearmanResult};
use super::types::ScoreVector;
use crate::agreement::Statistic;
use crate::bands::{CorrelationStrength, DivergenceBand, Significance};
use crate::error::{AgreementError, AgreementResult};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Descending ranks of each category (1 = highest score).
pub fn rankings(vector: &ScoreVector) -> Vec<(String, f64)> {
    vector
        .categories()
        .iter()
        .cloned()
        .zip(average_ranks(vector.scores(), RankOrder::Descending))
        .collect()
}

/// Score difference of one category between two corpora.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDifference {
    pub category: String,
    pub left: f64,
    pub right: f64,
    /// `right − left`
    pub difference: f64,
}

/// The `k` categories whose scores differ most between `left` and `right`,
/// largest absolute difference first.
pub fn top_differences(
    left: &ScoreVector,
    right: &ScoreVector,
    k: usize,
) -> AgreementResult<Vec<CategoryDifference>> {
    left.ensure_aligned(right)?;
    let mut diffs: Vec<CategoryDifference> = left
        .categories()
        .iter()
        .zip(left.scores().iter().zip(right.scores()))
        .map(|(category, (l, r))| CategoryDifference {
            category: category.clone(),
            left: *l,
            right: *r,
            difference: r - l,
        })
        .collect();
    diffs.sort_by(|a, b| {
        b.difference
            .abs()
            .partial_cmp(&a.difference.abs())
            .unwrap_or(Ordering::Equal)
    });
    diffs.truncate(k);
    Ok(diffs)
}

/// Both distribution statistics for one pair of corpora.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    pub left: String,
    pub right: String,
    pub spearman: SpearmanResult,
    pub jensen_shannon: JensenShannon,
    /// Every category, largest absolute difference first
    pub differences: Vec<CategoryDifference>,
}

impl PairwiseComparison {
    pub fn compute(left: &ScoreVector, right: &ScoreVector) -> AgreementResult<Self> {
        let result = Self {
            left: left.name().to_string(),
            right: right.name().to_string(),
            spearman: spearman(left, right)?,
            jensen_shannon: jensen_shannon(left, right)?,
            differences: top_differences(left, right, left.len())?,
        };
        debug!(
            left = %result.left,
            right = %result.right,
            rho = %result.spearman.rho,
            jsd = result.jensen_shannon.distance,
            "pairwise comparison"
        );
        Ok(result)
    }

    pub fn significance(&self) -> Option<Significance> {
        self.spearman.p_value.value().map(Significance::from_p)
    }

    pub fn strength(&self) -> Option<CorrelationStrength> {
        self.spearman.rho.value().map(CorrelationStrength::from_rho)
    }

    pub fn divergence_band(&self) -> DivergenceBand {
        DivergenceBand::from_jsd(self.jensen_shannon.distance)
    }
}

/// Everything computed across a set of corpora.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossCorpusReport {
    pub corpora: Vec<String>,
    pub categories: Vec<String>,
    /// Raw scores, one row per corpus
    pub scores: Vec<Vec<f64>>,
    /// Normalized distributions, one row per corpus
    pub distributions: Vec<Vec<f64>>,
    /// Descending category ranks, one row per corpus
    pub rankings: Vec<Vec<f64>>,
    /// Pairs in input order: (0,1), (0,2), ..., (1,2), ...
    pub comparisons: Vec<PairwiseComparison>,
    pub spearman_matrix: Vec<Vec<Statistic>>,
    pub jsd_matrix: Vec<Vec<f64>>,
}

impl CrossCorpusReport {
    /// Compare every pair of corpora. All vectors must share one category
    /// ordering.
    pub fn compute(vectors: &[ScoreVector]) -> AgreementResult<Self> {
        let Some(first) = vectors.first() else {
            return Err(AgreementError::UndefinedStatistic(
                "no score vectors to compare".to_string(),
            ));
        };
        for v in &vectors[1..] {
            first.ensure_aligned(v)?;
        }

        let n = vectors.len();
        let mut comparisons = Vec::new();
        let mut spearman_matrix = vec![vec![Statistic::undefined("not computed"); n]; n];
        let mut jsd_matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            spearman_matrix[i][i] = spearman(&vectors[i], &vectors[i])?.rho;
            for j in (i + 1)..n {
                let pair = PairwiseComparison::compute(&vectors[i], &vectors[j])?;
                spearman_matrix[i][j] = pair.spearman.rho.clone();
                spearman_matrix[j][i] = pair.spearman.rho.clone();
                jsd_matrix[i][j] = pair.jensen_shannon.distance;
                jsd_matrix[j][i] = pair.jensen_shannon.distance;
                comparisons.push(pair);
            }
        }

        info!(corpora = n, categories = first.len(), "cross-corpus comparison complete");

        Ok(Self {
            corpora: vectors.iter().map(|v| v.name().to_string()).collect(),
            categories: first.categories().to_vec(),
            scores: vectors.iter().map(|v| v.scores().to_vec()).collect(),
            distributions: vectors.iter().map(|v| to_distribution(v.scores())).collect(),
            rankings: vectors
                .iter()
                .map(|v| average_ranks(v.scores(), RankOrder::Descending))
                .collect(),
            comparisons,
            spearman_matrix,
            jsd_matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(name: &str, scores: [f64; 4]) -> ScoreVector {
        let categories = ["care", "fairness", "loyalty", "sanctity"];
        ScoreVector::new(name, categories.into_iter().zip(scores)).unwrap()
    }

    #[test]
    fn rankings_put_highest_first() {
        let v = vector("aesop", [0.2, 0.5, 0.1, 0.3]);
        let ranks = rankings(&v);
        assert_eq!(ranks[1], ("fairness".to_string(), 1.0));
        assert_eq!(ranks[2], ("loyalty".to_string(), 4.0));
    }

    #[test]
    fn top_differences_sorted_by_magnitude() {
        let english = vector("english", [0.2, 0.5, 0.1, 0.3]);
        let tamil = vector("tamil", [0.6, 0.45, 0.1, 0.1]);
        let diffs = top_differences(&english, &tamil, 2).unwrap();

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].category, "care");
        assert!((diffs[0].difference - 0.4).abs() < 1e-12);
        assert_eq!(diffs[1].category, "sanctity");
        assert!(diffs[1].difference < 0.0);
    }

    #[test]
    fn report_covers_all_pairs_in_order() {
        let vectors = vec![
            vector("english", [0.2, 0.5, 0.1, 0.3]),
            vector("thirukkural", [0.3, 0.4, 0.2, 0.1]),
            vector("aathichudi", [0.25, 0.45, 0.05, 0.35]),
        ];
        let report = CrossCorpusReport::compute(&vectors).unwrap();

        let pairs: Vec<(&str, &str)> = report
            .comparisons
            .iter()
            .map(|c| (c.left.as_str(), c.right.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("english", "thirukkural"),
                ("english", "aathichudi"),
                ("thirukkural", "aathichudi"),
            ]
        );

        for i in 0..3 {
            assert_eq!(report.jsd_matrix[i][i], 0.0);
            assert_eq!(report.spearman_matrix[i][i].value(), Some(1.0));
            for j in 0..3 {
                assert_eq!(report.jsd_matrix[i][j], report.jsd_matrix[j][i]);
            }
        }
        // english and aathichudi rank categories identically
        assert_eq!(report.spearman_matrix[0][2].value(), Some(1.0));
        assert_eq!(report.rankings[0], report.rankings[2]);
    }

    #[test]
    fn report_rejects_misaligned_corpus() {
        let a = vector("a", [0.1, 0.2, 0.3, 0.4]);
        let b = ScoreVector::new("b", [("care", 0.1), ("fairness", 0.2)]).unwrap();
        assert!(matches!(
            CrossCorpusReport::compute(&[a, b]),
            Err(AgreementError::MisalignedInputs(_))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(CrossCorpusReport::compute(&[]).is_err());
    }
}
