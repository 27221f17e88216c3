//! Agreement scoring
//!
//! Categorical agreement between index-aligned label sequences: match rates,
//! matches-any rates and Cohen's Kappa, each at an explicit [`Granularity`].
//!
//! [`Granularity`]: crate::label::Granularity

mod coding;
mod kappa;
mod scorer;
mod types;

pub use coding::{pattern_kappa, EquivalenceCoding, PatternKappa};
pub use kappa::{cohen_kappa, kappa_from_pairs};
pub use scorer::{
    compare_granularities, match_rate, matches_any_rate, pair_agreement, valid_subset,
};
pub use types::{GranularityComparison, MatchRate, PairAgreement, Proportion, Statistic};
