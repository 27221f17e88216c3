//! Agreement result types

use crate::error::{AgreementError, AgreementResult};
use crate::label::Granularity;
use serde::Serialize;
use std::fmt;

/// A statistic that may be mathematically undefined.
///
/// Undefined is distinct from a computed 0.0: kappa over a single category is
/// 0/0, and reporting it as 0.0 or 1.0 would be misleading.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Statistic {
    Defined { value: f64 },
    Undefined { reason: String },
}

impl Statistic {
    pub fn defined(value: f64) -> Self {
        Statistic::Defined { value }
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        Statistic::Undefined {
            reason: reason.into(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Statistic::Defined { value } => Some(*value),
            Statistic::Undefined { .. } => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Statistic::Undefined { .. })
    }

    /// Mean of several statistics; undefined if any input is.
    pub fn mean(stats: &[&Statistic]) -> Statistic {
        if stats.is_empty() {
            return Statistic::undefined("no statistics to average");
        }
        let mut sum = 0.0;
        for stat in stats {
            match stat {
                Statistic::Defined { value } => sum += value,
                Statistic::Undefined { reason } => {
                    return Statistic::undefined(format!("mean over undefined input: {}", reason))
                }
            }
        }
        Statistic::defined(sum / stats.len() as f64)
    }

    /// `self / other`, undefined when either side is or `other` is zero.
    pub fn ratio(&self, other: &Statistic) -> Statistic {
        match (self.value(), other.value()) {
            (Some(_), Some(d)) if d == 0.0 => Statistic::undefined("zero denominator"),
            (Some(n), Some(d)) => Statistic::defined(n / d),
            _ => Statistic::undefined("ratio over undefined input"),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Defined { value } => write!(f, "{:.3}", value),
            Statistic::Undefined { reason } => write!(f, "undefined ({})", reason),
        }
    }
}

/// `count` out of `total`, with `total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Proportion {
    pub count: usize,
    pub total: usize,
}

impl Proportion {
    /// Fails with `UndefinedStatistic` when `total` is zero.
    pub fn new(count: usize, total: usize, what: &str) -> AgreementResult<Self> {
        if total == 0 {
            return Err(AgreementError::UndefinedStatistic(format!(
                "{}: empty valid subset",
                what
            )));
        }
        Ok(Self { count, total })
    }

    pub fn fraction(&self) -> f64 {
        self.count as f64 / self.total as f64
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

impl fmt::Display for Proportion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.count, self.total, self.percent())
    }
}

/// Share of valid units on which labels matched, at one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchRate {
    pub granularity: Granularity,
    #[serde(flatten)]
    pub proportion: Proportion,
}

impl MatchRate {
    pub fn matches(&self) -> usize {
        self.proportion.count
    }

    pub fn total(&self) -> usize {
        self.proportion.total
    }

    pub fn fraction(&self) -> f64 {
        self.proportion.fraction()
    }

    pub fn percent(&self) -> f64 {
        self.proportion.percent()
    }
}

/// Agreement between two label sequences at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairAgreement {
    pub granularity: Granularity,
    pub rate: MatchRate,
    pub kappa: Statistic,
}

/// The same pair scored at both granularities, side by side.
///
/// `base.rate >= exact.rate` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GranularityComparison {
    pub exact: PairAgreement,
    pub base: PairAgreement,
}

impl GranularityComparison {
    pub fn at(&self, granularity: Granularity) -> &PairAgreement {
        match granularity {
            Granularity::Exact => &self.exact,
            Granularity::Base => &self.base,
        }
    }
}
