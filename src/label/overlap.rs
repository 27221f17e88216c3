//! Overlap between two full rankings
//!
//! Two annotators may disagree on the primary label while still sharing
//! labels lower in their rankings. This module reports that overlap.

use super::ranked::{Granularity, RankedLabels};
use serde::Serialize;
use std::collections::BTreeSet;

/// Comparison of two ranked annotations for the same unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOverlap {
    /// Primary labels agree at full granularity
    pub primary_exact: bool,
    /// Primary labels agree on foundation
    pub primary_base: bool,
    /// Labels present in both rankings
    pub shared: BTreeSet<String>,
}

impl RankedOverlap {
    /// Primaries disagree but the rankings still share at least one label.
    pub fn is_partial_agreement(&self) -> bool {
        !self.primary_exact && !self.shared.is_empty()
    }
}

/// Compare two rankings. Returns `None` when either ranking is empty.
pub fn ranked_overlap(a: &RankedLabels, b: &RankedLabels) -> Option<RankedOverlap> {
    let (pa, pb) = (a.primary()?, b.primary()?);

    let left: BTreeSet<&str> = a.iter().collect();
    let shared = b
        .iter()
        .filter(|label| left.contains(label))
        .map(str::to_string)
        .collect();

    Some(RankedOverlap {
        primary_exact: Granularity::Exact.apply(pa) == Granularity::Exact.apply(pb),
        primary_base: Granularity::Base.apply(pa) == Granularity::Base.apply(pb),
        shared,
    })
}
