//! Distribution comparison across corpora
//!
//! Operates on per-category aggregate scores rather than per-unit labels.
//! Inputs must be aligned on one ordered category set; misalignment fails
//! immediately.

mod compare;
mod divergence;
mod spearman;
mod special;
mod types;

pub use compare::{rankings, top_differences, CategoryDifference, CrossCorpusReport, PairwiseComparison};
pub use divergence::{jensen_shannon, js_divergence, to_distribution, JensenShannon, NORMALIZATION_EPSILON};
pub use spearman::{average_ranks, spearman, spearman_values, RankOrder, SpearmanResult};
pub use types::ScoreVector;
