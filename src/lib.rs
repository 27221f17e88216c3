//! moral-agreement: Agreement Statistics for Moral-Foundation Annotation
//!
//! Measures how well automated moral-foundation classifiers agree with human
//! annotators, and how similar moral-score distributions are across corpora.
//!
//! # Core Concepts
//!
//! - **Labels**: free-text annotations normalized to ranked `foundation.polarity` labels
//! - **Units**: text units (paragraphs, couplets, verses) identified by a numeric id
//! - **Granularity**: labels compared exactly or on their base foundation only
//! - **Statistics**: match rates and Cohen's Kappa per pair; Spearman and
//!   Jensen-Shannon across corpora. Undefined statistics are values, not zeros.
//!
//! # Example
//!
//! ```
//! use moral_agreement::{match_rate, Granularity};
//!
//! let a = vec![Some("care.virtue"), Some("loyalty.vice"), None];
//! let b = vec![Some("care.virtue"), Some("loyalty.virtue"), Some("care.vice")];
//!
//! let exact = match_rate(&a, &b, Granularity::Exact).unwrap();
//! let base = match_rate(&a, &b, Granularity::Base).unwrap();
//! assert_eq!(exact.matches(), 1);
//! assert_eq!(base.matches(), 2);
//! ```

pub mod agreement;
pub mod bands;
pub mod config;
pub mod distribution;
mod error;
pub mod identifier;
pub mod label;
pub mod report;
pub mod study;
pub mod table;

pub use agreement::{
    cohen_kappa, compare_granularities, match_rate, matches_any_rate, pattern_kappa, valid_subset,
    EquivalenceCoding, GranularityComparison, MatchRate, PairAgreement, PatternKappa, Proportion,
    Statistic,
};
pub use config::StudyConfig;
pub use distribution::{jensen_shannon, spearman, CrossCorpusReport, JensenShannon, ScoreVector, SpearmanResult};
pub use error::{AgreementError, AgreementResult, ConfigError};
pub use identifier::{IdentifierResolver, UnitId};
pub use label::{base_category, parse_ranked, primary_label, Granularity, RankedLabels};
pub use study::{run_agreement, run_study, AgreementSummary, ComparisonTable, Source, StudyReport};
pub use table::{FieldValue, Record, Table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
