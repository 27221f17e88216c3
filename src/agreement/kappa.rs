//! Cohen's Kappa
//!
//! `κ = (p_o − p_e) / (1 − p_e)`, where `p_o` is observed agreement and `p_e`
//! the agreement expected from each rater's marginal label frequencies. The
//! label set is the union of both raters' labels over the valid subset.

use super::scorer::{project, valid_subset};
use super::types::Statistic;
use crate::error::AgreementResult;
use crate::label::Granularity;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Kappa between two aligned label sequences at `granularity`.
///
/// Returns `Statistic::Undefined` when the valid subset is empty or holds at
/// most one distinct label (`1 − p_e = 0`). Fails only on misaligned input.
pub fn cohen_kappa<L: AsRef<str>>(
    a: &[Option<L>],
    b: &[Option<L>],
    granularity: Granularity,
) -> AgreementResult<Statistic> {
    let valid = valid_subset(&[a, b])?;
    let pairs = valid.iter().filter_map(|&i| {
        Some((project(&a[i], granularity)?, project(&b[i], granularity)?))
    });
    let kappa = kappa_from_pairs(pairs);
    debug!(%granularity, valid = valid.len(), %kappa, "cohen kappa");
    Ok(kappa)
}

/// Kappa over already-paired ratings.
pub fn kappa_from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Statistic {
    let mut left: BTreeMap<&str, usize> = BTreeMap::new();
    let mut right: BTreeMap<&str, usize> = BTreeMap::new();
    let mut agreed = 0usize;
    let mut n = 0usize;

    for (x, y) in pairs {
        *left.entry(x).or_default() += 1;
        *right.entry(y).or_default() += 1;
        if x == y {
            agreed += 1;
        }
        n += 1;
    }

    if n == 0 {
        return Statistic::undefined("empty valid subset");
    }

    let categories: BTreeSet<&str> = left.keys().chain(right.keys()).copied().collect();
    if categories.len() <= 1 {
        return Statistic::undefined("single category across both raters");
    }

    let total = n as f64;
    let observed = agreed as f64 / total;
    let expected: f64 = categories
        .iter()
        .map(|c| {
            let l = left.get(c).copied().unwrap_or(0) as f64;
            let r = right.get(c).copied().unwrap_or(0) as f64;
            (l / total) * (r / total)
        })
        .sum();

    let denominator = 1.0 - expected;
    if denominator == 0.0 {
        return Statistic::undefined("chance agreement is 1");
    }
    Statistic::defined((observed - expected) / denominator)
}
