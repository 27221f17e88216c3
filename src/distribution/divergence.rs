//! Jensen-Shannon divergence between score distributions

use super::types::ScoreVector;
use crate::error::{AgreementError, AgreementResult};
use serde::Serialize;

/// Added after shifting scores to non-negative so no category is exactly zero.
pub const NORMALIZATION_EPSILON: f64 = 1e-10;

/// Turn raw scores into a probability distribution.
///
/// Scores are shifted so the minimum becomes [`NORMALIZATION_EPSILON`], then
/// divided by their sum. Empty input gives an empty distribution.
pub fn to_distribution(scores: &[f64]) -> Vec<f64> {
    let Some(min) = scores.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let shifted: Vec<f64> = scores
        .iter()
        .map(|s| s - min + NORMALIZATION_EPSILON)
        .collect();
    let sum: f64 = shifted.iter().sum();
    shifted.into_iter().map(|s| s / sum).collect()
}

fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .filter(|(pi, _)| **pi > 0.0)
        .map(|(pi, qi)| pi * (pi / qi).ln())
        .sum()
}

/// Jensen-Shannon divergence (natural log) between two distributions.
pub fn js_divergence(p: &[f64], q: &[f64]) -> AgreementResult<f64> {
    if p.len() != q.len() {
        return Err(AgreementError::length_mismatch("distributions", p.len(), q.len()));
    }
    let m: Vec<f64> = p.iter().zip(q).map(|(a, b)| (a + b) / 2.0).collect();
    let divergence = (kl_divergence(p, &m) + kl_divergence(q, &m)) / 2.0;
    Ok(divergence.max(0.0))
}

/// Jensen-Shannon comparison of two score vectors.
///
/// `distance` is the square root of `divergence` and is the reported JSD
/// figure; bands and similarity are based on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JensenShannon {
    pub divergence: f64,
    pub distance: f64,
}

impl JensenShannon {
    /// `1 − distance`
    pub fn similarity(&self) -> f64 {
        1.0 - self.distance
    }
}

/// Normalize both vectors and compare them.
pub fn jensen_shannon(a: &ScoreVector, b: &ScoreVector) -> AgreementResult<JensenShannon> {
    a.ensure_aligned(b)?;
    let divergence = js_divergence(&to_distribution(a.scores()), &to_distribution(b.scores()))?;
    Ok(JensenShannon {
        divergence,
        distance: divergence.sqrt(),
    })
}
