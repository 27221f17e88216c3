//! Match rates over index-aligned label sequences
//!
//! Every sequence passed to a scorer is aligned on the same units; `None`
//! marks a missing label. Each statistic uses its own valid subset: the
//! indices where every sequence it compares is present.

use super::kappa::cohen_kappa;
use super::types::{GranularityComparison, MatchRate, PairAgreement, Proportion};
use crate::error::{AgreementError, AgreementResult};
use crate::label::Granularity;
use tracing::debug;

/// Project an optional label to `granularity`.
pub(crate) fn project<L: AsRef<str>>(label: &Option<L>, granularity: Granularity) -> Option<&str> {
    label.as_ref().map(|l| granularity.apply(l.as_ref()))
}

pub(crate) fn check_aligned<L>(sequences: &[&[Option<L>]]) -> AgreementResult<usize> {
    let Some(first) = sequences.first() else {
        return Ok(0);
    };
    let expected = first.len();
    for sequence in &sequences[1..] {
        if sequence.len() != expected {
            return Err(AgreementError::length_mismatch(
                "label sequences",
                expected,
                sequence.len(),
            ));
        }
    }
    Ok(expected)
}

/// Indices where every sequence carries a label.
pub fn valid_subset<L>(sequences: &[&[Option<L>]]) -> AgreementResult<Vec<usize>> {
    let len = check_aligned(sequences)?;
    Ok((0..len)
        .filter(|&i| sequences.iter().all(|s| s[i].is_some()))
        .collect())
}

/// Share of the valid subset where `a` and `b` hold the same label.
pub fn match_rate<L: AsRef<str>>(
    a: &[Option<L>],
    b: &[Option<L>],
    granularity: Granularity,
) -> AgreementResult<MatchRate> {
    let valid = valid_subset(&[a, b])?;
    let matches = valid
        .iter()
        .filter(|&&i| project(&a[i], granularity) == project(&b[i], granularity))
        .count();

    let proportion = Proportion::new(matches, valid.len(), "match rate")?;
    debug!(%granularity, matches, valid = valid.len(), "match rate");
    Ok(MatchRate {
        granularity,
        proportion,
    })
}

/// Share of units where `candidate` equals at least one of two references.
///
/// Valid subset: candidate and both references present.
pub fn matches_any_rate<L: AsRef<str>>(
    candidate: &[Option<L>],
    reference_a: &[Option<L>],
    reference_b: &[Option<L>],
    granularity: Granularity,
) -> AgreementResult<MatchRate> {
    let valid = valid_subset(&[candidate, reference_a, reference_b])?;
    let matches = valid
        .iter()
        .filter(|&&i| {
            let c = project(&candidate[i], granularity);
            c == project(&reference_a[i], granularity) || c == project(&reference_b[i], granularity)
        })
        .count();

    let proportion = Proportion::new(matches, valid.len(), "matches-any rate")?;
    Ok(MatchRate {
        granularity,
        proportion,
    })
}

/// Match rate and kappa for one pair at one granularity.
pub fn pair_agreement<L: AsRef<str>>(
    a: &[Option<L>],
    b: &[Option<L>],
    granularity: Granularity,
) -> AgreementResult<PairAgreement> {
    Ok(PairAgreement {
        granularity,
        rate: match_rate(a, b, granularity)?,
        kappa: cohen_kappa(a, b, granularity)?,
    })
}

/// Score a pair at both exact and base granularity.
pub fn compare_granularities<L: AsRef<str>>(
    a: &[Option<L>],
    b: &[Option<L>],
) -> AgreementResult<GranularityComparison> {
    Ok(GranularityComparison {
        exact: pair_agreement(a, b, Granularity::Exact)?,
        base: pair_agreement(a, b, Granularity::Base)?,
    })
}
