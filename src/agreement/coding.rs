//! Binary equivalence codings
//!
//! Translation evaluation codes each item 1 (semantically equivalent) or 0
//! (different) for a pair of translators. A coding's equivalence rate is the
//! share of 1s. Kappa between two *codings* compares agreement patterns, which
//! is a different quantity from annotator-vs-annotator kappa, so it gets its
//! own result type.

use super::kappa::kappa_from_pairs;
use super::types::{Proportion, Statistic};
use crate::error::{AgreementError, AgreementResult};
use serde::Serialize;

/// One named equivalence coding, e.g. "machine translation vs human 1".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquivalenceCoding {
    pub name: String,
    pub codes: Vec<bool>,
}

impl EquivalenceCoding {
    pub fn new(name: impl Into<String>, codes: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            codes,
        }
    }

    /// Share of items coded equivalent.
    pub fn equivalence_rate(&self) -> AgreementResult<Proportion> {
        let equivalent = self.codes.iter().filter(|c| **c).count();
        Proportion::new(equivalent, self.codes.len(), &self.name)
    }
}

/// Kappa between two coding patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternKappa {
    pub left: String,
    pub right: String,
    pub kappa: Statistic,
}

/// Compare two codings item by item.
pub fn pattern_kappa(
    left: &EquivalenceCoding,
    right: &EquivalenceCoding,
) -> AgreementResult<PatternKappa> {
    if left.codes.len() != right.codes.len() {
        return Err(AgreementError::MisalignedInputs(format!(
            "codings '{}' ({} items) and '{}' ({} items)",
            left.name,
            left.codes.len(),
            right.name,
            right.codes.len()
        )));
    }

    let as_label = |c: &bool| if *c { "1" } else { "0" };
    let pairs = left
        .codes
        .iter()
        .zip(&right.codes)
        .map(|(l, r)| (as_label(l), as_label(r)));

    Ok(PatternKappa {
        left: left.name.clone(),
        right: right.name.clone(),
        kappa: kappa_from_pairs(pairs),
    })
}
